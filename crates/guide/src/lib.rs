pub mod config;
pub mod document;
pub mod error;
pub mod map;
pub mod pipeline;
pub mod render;

pub use config::{AppConfig, MapConfig};
pub use document::{Block, GuideDocument, Picture};
pub use error::{GuideError, Result};
pub use map::{MapScope, draw_map};
pub use pipeline::{GuideSummary, assemble, run, run_with_rng};
pub use render::write_docx;
