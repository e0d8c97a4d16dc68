//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - switching the present mode (vsync) at runtime
//! - acquiring frames, including the early post-present acquisition used by
//!   the "early clear" latency experiment

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
