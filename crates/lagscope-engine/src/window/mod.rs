//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single diagnostic window, and wires
//! them to the GPU layer. The loop is driven continuously: the app paces
//! itself inside its frame callback instead of relying on the event loop's
//! timing.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
