//! Low-level building blocks shared by the scroller and the target resolvers.
use std::sync::Arc;

use crate::queue::{QueueItem, QueueKey, QueueRegistry};
use crate::{AnimationEvent, Axis, Callback, Callbacks, ElementId, ScrollHost, ScrollOptions};

/// Clamps `position` to `[0, max_extent]`.
///
/// A negative (or NaN) `max_extent` is treated as 0.
pub fn clamp_position(position: f64, max_extent: f64) -> f64 {
    let max = max_extent.max(0.0);
    position.min(max).max(0.0)
}

/// The maximum scrollable extent of `container` along `axis`: content minus viewport,
/// floored at 0.
pub fn max_scroll<H: ScrollHost + ?Sized>(host: &H, container: ElementId, axis: Axis) -> f64 {
    (host.content_extent(container, axis) - host.viewport_extent(container, axis)).max(0.0)
}

/// Splits an options bag into its callbacks and everything else.
///
/// The input is left untouched; the returned options carry an empty callback set.
pub fn extract_callbacks(options: &ScrollOptions) -> (Callbacks, ScrollOptions) {
    let mut rest = options.clone();
    let callbacks = std::mem::take(&mut rest.callbacks);
    (callbacks, rest)
}

/// Wraps every present callback so it reports `context` as the event context.
///
/// Animations of a window run on one of its root candidates, but callers expect to hear
/// about the window they asked to scroll.
pub fn bind_callback_context(callbacks: &Callbacks, context: ElementId) -> Callbacks {
    callbacks.map(|_, cb| {
        let cb = Arc::clone(cb);
        let bound: Callback = Arc::new(move |event: &AnimationEvent| {
            let event = AnimationEvent { context, ..*event };
            cb(&event)
        });
        bound
    })
}

/// Inserts `item` into the queue identified by `key`.
///
/// Returns `true` when the caller must advance the queue now:
/// - the default queue starts its head on its own whenever nothing is running;
/// - custom queues never do, so a sentinel is appended after the item, and the queue is
///   reported as stuck if the new item is the only one not yet started.
pub(crate) fn enqueue_animation(
    queues: &mut QueueRegistry,
    key: &QueueKey,
    item: QueueItem,
) -> bool {
    let queue = queues.entry(key);
    queue.pending.push_back(item);

    if !key.queue.is_custom() {
        return queue.running.is_none();
    }

    let stuck = queue.running.is_none() && queue.pending.len() == 1;
    queue.pending.push_back(QueueItem::Sentinel);
    if stuck {
        strace!(
            container = key.container.0,
            "custom queue idle after insert; advancing explicitly"
        );
    }
    stuck
}
