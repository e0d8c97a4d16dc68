//! Lagscope engine crate.
//!
//! Owns the platform + GPU runtime pieces and the frame-pacing core used by
//! the probe binary. The timing core (`time`) is deliberately free of any
//! platform coupling so pacing behavior can be tested against a fake clock.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
