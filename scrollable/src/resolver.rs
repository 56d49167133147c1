use std::sync::Arc;

use crate::primitives::bind_callback_context;
use crate::queue::Track;
use crate::{
    AnimationEvent, Axis, Callback, Callbacks, ElementId, ElementKind, ScrollHost, ScrollRoot,
    Surface,
};

/// Process-lifetime state shared by the resolvers of one scroller.
#[derive(Clone, Debug, Default)]
pub struct DetectionCache {
    scroll_root: Option<ScrollRoot>,
    probes: u32,
}

impl DetectionCache {
    /// The detected scroll root, if the probe ran already.
    pub fn scroll_root(&self) -> Option<ScrollRoot> {
        self.scroll_root
    }

    /// How many times the probe ran. Stays at most 1.
    pub fn probes(&self) -> u32 {
        self.probes
    }

    fn detect<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> ScrollRoot {
        if let Some(root) = self.scroll_root {
            return root;
        }
        let root = probe_scroll_root(host);
        self.probes += 1;
        self.scroll_root = Some(root);
        root
    }
}

/// Scrolls a sandboxed window and checks which root candidate picked up the offset.
///
/// Falls back to `documentElement` when the host cannot sandbox or neither candidate moved.
fn probe_scroll_root<H: ScrollHost + ?Sized>(host: &mut H) -> ScrollRoot {
    let Some(window) = host.create_probe_window() else {
        swarn!("host cannot create a probe window; assuming documentElement scrolls");
        return ScrollRoot::DocumentElement;
    };

    let html = host.document_element(window);
    let body = host.body(window);
    host.set_scroll_offset(window, Axis::Y, 1.0);

    let moved = |el: Option<ElementId>| el.is_some_and(|el| host.scroll_offset(el, Axis::Y) > 0.0);
    let root = if moved(html) {
        ScrollRoot::DocumentElement
    } else if moved(body) {
        ScrollRoot::Body
    } else {
        swarn!("probe window did not scroll; assuming documentElement scrolls");
        ScrollRoot::DocumentElement
    };

    host.destroy_probe_window(window);
    sdebug!(?root, "detected window scroll root");
    root
}

fn candidate<H: ScrollHost + ?Sized>(
    host: &H,
    window: ElementId,
    root: ScrollRoot,
) -> Option<ElementId> {
    match root {
        ScrollRoot::DocumentElement => host.document_element(window),
        ScrollRoot::Body => host.body(window),
    }
}

/// Maps a normalized container to the element(s) that actually get animated.
///
/// The strategy is picked at build time through the scroller's type parameter.
pub trait TargetResolver {
    /// Non-window containers resolve to themselves; unknown handles to an empty surface.
    fn resolve_target<H: ScrollHost + ?Sized>(
        &self,
        cache: &mut DetectionCache,
        host: &mut H,
        container: ElementId,
    ) -> Surface;

    /// Resolves the surface and builds one animation track per element, each reporting to
    /// `callbacks` with `container` as the context.
    fn animate<H: ScrollHost + ?Sized>(
        &self,
        cache: &mut DetectionCache,
        host: &mut H,
        container: ElementId,
        callbacks: &Callbacks,
    ) -> Vec<Track> {
        let surface = self.resolve_target(cache, host, container);
        let callbacks = bind_callback_context(callbacks, container);
        surface
            .elements()
            .iter()
            .map(|&element| Track {
                element,
                callbacks: callbacks.clone(),
            })
            .collect()
    }
}

/// Detects once which root candidate owns window scrolling and animates only that one.
///
/// Quirks-mode documents always scroll through `body`, regardless of the cached result.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetectOnce;

impl TargetResolver for DetectOnce {
    fn resolve_target<H: ScrollHost + ?Sized>(
        &self,
        cache: &mut DetectionCache,
        host: &mut H,
        container: ElementId,
    ) -> Surface {
        match host.kind(container) {
            None => Surface::default(),
            Some(ElementKind::Window) => {
                let root = if host.is_quirks_mode(container) {
                    ScrollRoot::Body
                } else {
                    cache.detect(host)
                };
                candidate(host, container, root)
                    .map(Surface::single)
                    .unwrap_or_default()
            }
            Some(_) => Surface::single(container),
        }
    }
}

/// Animates both root candidates of a window on every call.
///
/// Writes to the candidate that does not own scrolling are ignored by the host; callbacks of
/// that instance are filtered out so every hook fires once per logical event. The reporting
/// instance is the one on `documentElement` (or `body` if the document has none).
#[derive(Clone, Copy, Debug, Default)]
pub struct DualAnimate;

impl DualAnimate {
    fn reporting_element(surface: &Surface) -> Option<ElementId> {
        surface.elements().first().copied()
    }
}

impl TargetResolver for DualAnimate {
    fn resolve_target<H: ScrollHost + ?Sized>(
        &self,
        _cache: &mut DetectionCache,
        host: &mut H,
        container: ElementId,
    ) -> Surface {
        match host.kind(container) {
            None => Surface::default(),
            Some(ElementKind::Window) => Surface::new(
                [host.document_element(container), host.body(container)]
                    .into_iter()
                    .flatten()
                    .collect(),
            ),
            Some(_) => Surface::single(container),
        }
    }

    fn animate<H: ScrollHost + ?Sized>(
        &self,
        cache: &mut DetectionCache,
        host: &mut H,
        container: ElementId,
        callbacks: &Callbacks,
    ) -> Vec<Track> {
        let surface = self.resolve_target(cache, host, container);
        let Some(reporter) = Self::reporting_element(&surface) else {
            return Vec::new();
        };
        let callbacks = bind_callback_context(&filter_callbacks(callbacks, reporter), container);
        surface
            .elements()
            .iter()
            .map(|&element| Track {
                element,
                callbacks: callbacks.clone(),
            })
            .collect()
    }
}

/// Only lets through invocations made by the animation instance on `element`.
fn filter_callbacks(callbacks: &Callbacks, element: ElementId) -> Callbacks {
    callbacks.map(|_, cb| {
        let cb = Arc::clone(cb);
        let filtered: Callback = Arc::new(move |event: &AnimationEvent| {
            if event.element == element {
                cb(event);
            }
        });
        filtered
    })
}
