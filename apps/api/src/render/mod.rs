// Document rendering: theme resolution, rich-text flattening, photo
// rasterization, section layout and PDF encoding.
// Layout and encoding are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod assembler;
pub mod pdf;
pub mod photo;
pub mod rich_text;
pub mod sections;
pub mod surface;
pub mod theme;

// Re-export the public API consumed by the route handlers.
pub use assembler::{render_cv, RenderError};
pub use photo::PhotoLoader;
