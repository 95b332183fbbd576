//! WebGPU rendering module
//!
//! One alpha-blended triangle-list pipeline; the CPU assembles the whole
//! scene as colored vertices in screen space.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
