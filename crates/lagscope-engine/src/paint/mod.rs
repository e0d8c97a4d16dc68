//! Color model shared between the runtime and renderers.

mod color;

pub use color::Color;
