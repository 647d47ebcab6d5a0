mod geometry;
mod globe;
mod renderer;

pub use globe::GlobeViewport;
pub use renderer::{render_globe, GlobeLayers};
