//! WebGPU rendering module
//!
//! A single colored-quad pipeline; every sprite is generated geometry, no
//! texture assets to load.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
