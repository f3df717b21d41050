//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) for all rendering in the fragment shader.
//! Rendering is a pure function of the game state; nothing flows back.

pub mod frame;
pub mod sdf_pipeline;

pub use frame::{FrameData, pack};
pub use sdf_pipeline::SdfRenderState;
