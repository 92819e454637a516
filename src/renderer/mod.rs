pub mod camera;
pub mod gpu;
pub mod mesh_buffers;

pub use camera::{Camera, CameraMode};
pub use gpu::{FireUniforms, GpuState, background_color};
