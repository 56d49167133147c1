use std::fmt;
use std::sync::Arc;

use crate::{Axis, AxisSelection, Easing, ElementId, Offset};

/// A scroll animation callback.
///
/// Every callback of a [`Callbacks`] set shares this signature; the [`AnimationEvent`] carries
/// whatever the specific hook reports.
pub type Callback = Arc<dyn Fn(&AnimationEvent) + Send + Sync>;

/// What a callback observes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationEvent {
    /// The logical container the call was made for.
    pub context: ElementId,
    /// The concrete element this animation instance writes to.
    pub element: ElementId,
    /// Set for `step`, which fires once per animated axis.
    pub axis: Option<Axis>,
    /// Container offsets as last written by the animation.
    pub position: Offset,
    /// Time progress in `[0, 1]`.
    pub progress: f32,
    pub remaining_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallbackKind {
    Start,
    Step,
    Progress,
    Done,
    Complete,
    Fail,
    Always,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 7] = [
        Self::Start,
        Self::Step,
        Self::Progress,
        Self::Done,
        Self::Complete,
        Self::Fail,
        Self::Always,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Step => "step",
            Self::Progress => "progress",
            Self::Done => "done",
            Self::Complete => "complete",
            Self::Fail => "fail",
            Self::Always => "always",
        }
    }
}

/// The seven lifecycle hooks of a scroll animation.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub start: Option<Callback>,
    pub step: Option<Callback>,
    pub progress: Option<Callback>,
    pub done: Option<Callback>,
    pub complete: Option<Callback>,
    pub fail: Option<Callback>,
    pub always: Option<Callback>,
}

impl Callbacks {
    pub fn is_empty(&self) -> bool {
        CallbackKind::ALL.iter().all(|&k| self.get(k).is_none())
    }

    pub fn get(&self, kind: CallbackKind) -> Option<&Callback> {
        match kind {
            CallbackKind::Start => self.start.as_ref(),
            CallbackKind::Step => self.step.as_ref(),
            CallbackKind::Progress => self.progress.as_ref(),
            CallbackKind::Done => self.done.as_ref(),
            CallbackKind::Complete => self.complete.as_ref(),
            CallbackKind::Fail => self.fail.as_ref(),
            CallbackKind::Always => self.always.as_ref(),
        }
    }

    pub fn set(&mut self, kind: CallbackKind, callback: Option<Callback>) {
        let slot = match kind {
            CallbackKind::Start => &mut self.start,
            CallbackKind::Step => &mut self.step,
            CallbackKind::Progress => &mut self.progress,
            CallbackKind::Done => &mut self.done,
            CallbackKind::Complete => &mut self.complete,
            CallbackKind::Fail => &mut self.fail,
            CallbackKind::Always => &mut self.always,
        };
        *slot = callback;
    }

    pub fn with(
        mut self,
        kind: CallbackKind,
        f: impl Fn(&AnimationEvent) + Send + Sync + 'static,
    ) -> Self {
        self.set(kind, Some(Arc::new(f)));
        self
    }

    /// Returns a new set where every present callback is replaced by `f(kind, callback)`.
    pub fn map(&self, mut f: impl FnMut(CallbackKind, &Callback) -> Callback) -> Self {
        let mut out = Self::default();
        for kind in CallbackKind::ALL {
            if let Some(cb) = self.get(kind) {
                out.set(kind, Some(f(kind, cb)));
            }
        }
        out
    }

    pub(crate) fn fire(&self, kind: CallbackKind, event: &AnimationEvent) {
        if let Some(cb) = self.get(kind) {
            cb(event);
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        for kind in CallbackKind::ALL {
            if self.get(kind).is_some() {
                list.entry(&kind.name());
            }
        }
        list.finish()
    }
}

/// Which animation queue a call goes through.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueName {
    /// The engine's default queue (`"fx"`); it starts its head automatically.
    #[default]
    Default,
    /// A custom named queue; the engine never starts it on its own.
    Named(String),
    /// No queue at all: the animation starts immediately, alongside anything else.
    Unqueued,
}

impl QueueName {
    pub const DEFAULT_NAME: &'static str = "fx";

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

/// Per-call configuration for [`crate::Scroller::scroll_to`] and
/// [`crate::Scroller::stop_scroll`].
#[derive(Clone, Debug, Default)]
pub struct ScrollOptions {
    /// Falls back to [`ScrollerConfig::default_duration_ms`].
    pub duration_ms: Option<u64>,
    /// Falls back to [`ScrollerConfig::default_easing`].
    pub easing: Option<Easing>,
    pub queue: QueueName,
    /// Chain after whatever is already queued instead of replacing it.
    pub append: bool,
    /// Restricts the axes the call affects. `None` means both, unless the position names
    /// specific axes.
    pub axis: Option<AxisSelection>,
    /// Only read by `stop_scroll`: finish the running animation at its target instead of
    /// freezing it in place.
    pub jump_to_target_position: bool,
    pub callbacks: Callbacks,
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn with_queue(mut self, queue: QueueName) -> Self {
        self.queue = queue;
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn with_axis(mut self, axis: impl Into<AxisSelection>) -> Self {
        self.axis = Some(axis.into());
        self
    }

    pub fn with_jump_to_target_position(mut self, jump: bool) -> Self {
        self.jump_to_target_position = jump;
        self
    }

    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_callback(
        mut self,
        kind: CallbackKind,
        f: impl Fn(&AnimationEvent) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.set(kind, Some(Arc::new(f)));
        self
    }
}

/// Engine-wide defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollerConfig {
    pub default_duration_ms: u64,
    pub default_easing: Easing,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 400,
            default_easing: Easing::Swing,
        }
    }
}

impl ScrollerConfig {
    pub fn with_default_duration_ms(mut self, duration_ms: u64) -> Self {
        self.default_duration_ms = duration_ms;
        self
    }

    pub fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }
}
