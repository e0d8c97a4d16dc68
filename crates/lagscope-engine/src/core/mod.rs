//! Application contract and per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, Scene, SceneError, WindowCtx};
