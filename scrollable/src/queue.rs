use std::collections::{BTreeMap, VecDeque};

use crate::{
    AnimationEvent, Axis, CallbackKind, Callbacks, Easing, ElementId, Offset, QueueName,
    ScrollHost, ScrollOptions, ScrollTarget, TaskState, Tween,
};

/// One animated element of a task, with the callbacks that instance is allowed to report.
#[derive(Clone, Debug)]
pub struct Track {
    pub element: ElementId,
    pub callbacks: Callbacks,
}

/// One scheduled scroll animation.
#[derive(Debug)]
pub(crate) struct Task {
    pub(crate) id: u64,
    pub(crate) container: ElementId,
    /// Resolved, clamped destinations.
    targets: Vec<(Axis, f64)>,
    tracks: Vec<Track>,
    duration_ms: u64,
    easing: Easing,
    tweens: Vec<(Axis, Tween)>,
    current: Offset,
    pub(crate) state: TaskState,
}

impl Task {
    pub(crate) fn new(
        id: u64,
        container: ElementId,
        targets: Vec<(Axis, f64)>,
        tracks: Vec<Track>,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            id,
            container,
            targets,
            tracks,
            duration_ms,
            easing,
            tweens: Vec::new(),
            current: Offset::default(),
            state: TaskState::Queued,
        }
    }

    /// Captures the container's current offsets as the tween origins and fires `start`.
    pub(crate) fn start<H: ScrollHost + ?Sized>(&mut self, host: &H, now_ms: u64) {
        for axis in Axis::ALL {
            self.current.set(axis, host.scroll_offset(self.container, axis));
        }
        self.tweens = self
            .targets
            .iter()
            .map(|&(axis, to)| {
                let from = self.current.get(axis);
                (axis, Tween::new(from, to, now_ms, self.duration_ms, self.easing))
            })
            .collect();
        self.state = TaskState::Running;
        strace!(
            task = self.id,
            container = self.container.0,
            "scroll task started"
        );
        self.fire_all(CallbackKind::Start, 0.0, self.duration_ms);
    }

    /// Advances one interpolation step. Returns `true` once every axis reached its target.
    pub(crate) fn step<H: ScrollHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> bool {
        let mut done = true;
        let mut progress = 1.0f32;
        let mut remaining_ms = 0u64;
        for &(axis, tween) in &self.tweens {
            self.current.set(axis, tween.sample(now_ms));
            done &= tween.is_done(now_ms);
            progress = progress.min(tween.progress(now_ms));
            remaining_ms = remaining_ms.max(tween.remaining_ms(now_ms));
        }
        self.write(host);
        self.sync_idle_axes(&*host);
        self.report_step(progress, remaining_ms);
        done
    }

    pub(crate) fn finish(&mut self) {
        self.state = TaskState::Done;
        strace!(task = self.id, "scroll task done");
        self.fire_all(CallbackKind::Done, 1.0, 0);
        self.fire_all(CallbackKind::Complete, 1.0, 0);
        self.fire_all(CallbackKind::Always, 1.0, 0);
    }

    /// Freezes the task where it is. The last written offsets stay final.
    pub(crate) fn abort<H: ScrollHost + ?Sized>(&mut self, host: &H, now_ms: u64) {
        self.state = TaskState::Aborted;
        self.sync_idle_axes(host);
        let (progress, remaining_ms) = self.timing(now_ms);
        sdebug!(
            task = self.id,
            x = self.current.x,
            y = self.current.y,
            "scroll task aborted"
        );
        self.fire_all(CallbackKind::Fail, progress, remaining_ms);
        self.fire_all(CallbackKind::Always, progress, remaining_ms);
    }

    /// Writes the targets immediately and completes as if the animation had run out.
    pub(crate) fn jump_to_end<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        for &(axis, to) in &self.targets {
            self.current.set(axis, to);
        }
        self.write(host);
        self.sync_idle_axes(&*host);
        self.report_step(1.0, 0);
        self.finish();
    }

    pub(crate) fn discard(mut self) {
        self.state = TaskState::Discarded;
        strace!(task = self.id, "queued scroll task discarded");
    }

    /// Re-reads the axes this task does not animate; other queues may be moving them.
    ///
    /// Skipped once the container is gone, so events keep the last known offsets.
    fn sync_idle_axes<H: ScrollHost + ?Sized>(&mut self, host: &H) {
        if host.kind(self.container).is_none() {
            return;
        }
        for axis in Axis::ALL {
            if !self.tweens.iter().any(|&(a, _)| a == axis) {
                self.current.set(axis, host.scroll_offset(self.container, axis));
            }
        }
    }

    fn timing(&self, now_ms: u64) -> (f32, u64) {
        self.tweens.iter().fold((1.0f32, 0u64), |(p, r), (_, t)| {
            (p.min(t.progress(now_ms)), r.max(t.remaining_ms(now_ms)))
        })
    }

    fn write<H: ScrollHost + ?Sized>(&self, host: &mut H) {
        for track in &self.tracks {
            for &(axis, _) in &self.tweens {
                host.set_scroll_offset(track.element, axis, self.current.get(axis));
            }
        }
    }

    fn report_step(&self, progress: f32, remaining_ms: u64) {
        for track in &self.tracks {
            for &(axis, _) in &self.tweens {
                let event = self.event(track, Some(axis), progress, remaining_ms);
                track.callbacks.fire(CallbackKind::Step, &event);
            }
            let event = self.event(track, None, progress, remaining_ms);
            track.callbacks.fire(CallbackKind::Progress, &event);
        }
    }

    fn fire_all(&self, kind: CallbackKind, progress: f32, remaining_ms: u64) {
        for track in &self.tracks {
            let event = self.event(track, None, progress, remaining_ms);
            track.callbacks.fire(kind, &event);
        }
    }

    fn event(
        &self,
        track: &Track,
        axis: Option<Axis>,
        progress: f32,
        remaining_ms: u64,
    ) -> AnimationEvent {
        AnimationEvent {
            context: track.element,
            element: track.element,
            axis,
            position: self.current,
            progress,
            remaining_ms,
        }
    }
}

/// A queued placeholder whose position is resolved only when it reaches the head of its
/// queue.
#[derive(Debug)]
pub(crate) struct ProxyTask {
    pub(crate) target: ScrollTarget,
    /// Normalized options, without their callbacks.
    pub(crate) options: ScrollOptions,
    pub(crate) callbacks: Callbacks,
}

#[derive(Debug)]
pub(crate) enum QueueItem {
    Animation(Task),
    Proxy(ProxyTask),
    /// A zero-cost marker that only advances the queue.
    Sentinel,
}

impl QueueItem {
    fn is_work(&self) -> bool {
        !matches!(self, Self::Sentinel)
    }

    pub(crate) fn discard(self) {
        match self {
            Self::Animation(task) => task.discard(),
            Self::Proxy(_) => {
                strace!("queued scroll proxy discarded");
            }
            Self::Sentinel => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct QueueKey {
    pub(crate) container: ElementId,
    pub(crate) queue: QueueName,
}

impl QueueKey {
    pub(crate) fn new(container: ElementId, queue: QueueName) -> Self {
        Self { container, queue }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Queue {
    pub(crate) running: Option<Task>,
    pub(crate) pending: VecDeque<QueueItem>,
}

impl Queue {
    pub(crate) fn is_idle(&self) -> bool {
        self.running.is_none() && self.pending.is_empty()
    }

    /// Running task plus queued tasks and proxies; sentinels are not counted.
    pub(crate) fn len(&self) -> usize {
        usize::from(self.running.is_some())
            + self.pending.iter().filter(|item| item.is_work()).count()
    }
}

/// All animation queues of a scroller, keyed by (container, queue name), plus the
/// unqueued animations.
#[derive(Debug, Default)]
pub(crate) struct QueueRegistry {
    queues: BTreeMap<QueueKey, Queue>,
    pub(crate) unqueued: Vec<Task>,
}

impl QueueRegistry {
    pub(crate) fn get(&self, key: &QueueKey) -> Option<&Queue> {
        self.queues.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &QueueKey) -> Option<&mut Queue> {
        self.queues.get_mut(key)
    }

    pub(crate) fn entry(&mut self, key: &QueueKey) -> &mut Queue {
        self.queues.entry(key.clone()).or_default()
    }

    pub(crate) fn remove(&mut self, key: &QueueKey) -> Option<Queue> {
        self.queues.remove(key)
    }

    pub(crate) fn remove_if_idle(&mut self, key: &QueueKey) {
        if self.queues.get(key).is_some_and(Queue::is_idle) {
            self.queues.remove(key);
        }
    }

    pub(crate) fn is_idle(&self, key: &QueueKey) -> bool {
        self.queues.get(key).is_none_or(Queue::is_idle)
    }

    pub(crate) fn keys(&self) -> Vec<QueueKey> {
        self.queues.keys().cloned().collect()
    }

    pub(crate) fn take_running(&mut self, key: &QueueKey) -> Option<Task> {
        self.queues.get_mut(key)?.running.take()
    }

    pub(crate) fn is_animating(&self) -> bool {
        !self.unqueued.is_empty() || self.queues.values().any(|q| q.running.is_some())
    }

    pub(crate) fn is_container_busy(&self, container: ElementId) -> bool {
        self.unqueued.iter().any(|t| t.container == container)
            || self
                .queues
                .iter()
                .any(|(k, q)| k.container == container && !q.is_idle())
    }
}
