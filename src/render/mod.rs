//! Ready-made [`Renderer`](crate::scheduler::Renderer) implementations.
//!
//! - [`TextRenderer`]: line-oriented text or JSON-lines output to any writer
//! - [`RecordingRenderer`]: keeps every call in memory for later inspection

pub mod recording;
pub mod text;

pub use recording::{RecordingRenderer, RenderEvent};
pub use text::{OutputFormat, TextRenderer};
