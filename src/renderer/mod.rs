//! WebGPU rendering module
//!
//! The frame is described as a `Scene`, tessellated into colored triangles
//! and drawn with a single flat-shaded pipeline. Text is left to the host.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{DrawCmd, Font, Scene, TextNode, text_layout};
