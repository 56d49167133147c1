//! Headless, queued scroll animations.
//!
//! This crate schedules smooth scrolls of a window, an embedded frame or any scrollable
//! element, and stops them again. It owns the parts where ordering and platform quirks live:
//! per-container animation queues, position resolution (absolute, percentage, keyword and
//! relative positions, clamped to the scrollable range), the choice of which root element
//! actually scrolls a window, and the stop protocol.
//!
//! It is UI-agnostic. An adapter is expected to provide:
//! - a [`ScrollHost`] that classifies nodes and reads/writes scroll offsets and extents
//! - a clock: call [`Scroller::tick`] once per frame/timer tick
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod error;
mod host;
mod normalize;
mod options;
mod position;
mod primitives;
mod queue;
mod resolver;
mod scroller;
mod state;
mod tween;
mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use host::ScrollHost;
pub use normalize::{
    normalize_axis_name, normalize_container, normalize_options, normalize_position,
    normalize_queue,
};
pub use options::{
    AnimationEvent, Callback, CallbackKind, Callbacks, QueueName, ScrollOptions, ScrollerConfig,
};
pub use position::{Coordinate, Keyword, Position, ScrollTarget};
pub use primitives::{bind_callback_context, clamp_position, extract_callbacks, max_scroll};
pub use queue::Track;
pub use resolver::{DetectOnce, DetectionCache, DualAnimate, TargetResolver};
pub use scroller::{ScrollContext, Scroller};
pub use state::{Offset, ScrollRange};
pub use tween::{Easing, Tween};
pub use types::{Axis, AxisSelection, ElementId, ElementKind, ScrollRoot, Surface, TaskState};
