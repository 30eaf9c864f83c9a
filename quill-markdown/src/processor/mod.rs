//! The post rendering pipeline.
//!
//! - [`types`]: configuration options, builder, and the renderer struct
//! - [`core`]: the rendering pipeline itself
//! - [`process`]: recovery wrappers for batch rendering
pub mod core;
pub mod process;
pub mod types;

pub use process::{process_safe, render_with_recovery};
pub use types::{PostRenderer, RenderOptions, RenderOptionsBuilder};
