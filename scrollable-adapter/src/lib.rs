//! Adapter utilities for the `scrollable` crate.
//!
//! The `scrollable` crate is UI-agnostic: it talks to the outside world through
//! [`scrollable::ScrollHost`] and is advanced by explicit `tick(now_ms)` calls. This crate
//! provides small, framework-neutral helpers for adapters and tests:
//!
//! - [`MemoryHost`], an in-memory document tree with browser-like scroll root behavior
//! - [`FrameDriver`], a fixed-rate clock for headless frame loops
//! - [`CallbackLog`], a recorder for animation callbacks
#![forbid(unsafe_code)]

mod driver;
mod log;
mod memory;


pub use driver::FrameDriver;
pub use log::{CallbackLog, LoggedEvent};
pub use memory::{MemoryHost, Size, WindowHandles};
