//! WebGPU rendering module
//!
//! The scene is recorded as 2D draw commands, tessellated into colored
//! triangles on the CPU and drawn in a single pass.

pub mod draw;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use draw::{Color, DrawCommand, DrawList, Style};
pub use pipeline::RenderState;
pub use scene::{FrameOptions, compose_frame, legend_origin};
pub use shapes::{tessellate, tessellate_into};
pub use vertex::Vertex;
