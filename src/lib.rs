//! Layout and auto-design engine for photo albums.
//!
//! Photos are laid out on spreads using a catalog of geometric templates,
//! then post-processed so faces stay clear of the gutter and both pages of a
//! spread carry a similar visual weight.

pub mod autodesign;
pub mod config;
pub mod error;
pub mod faces;
pub mod geometry;
pub mod layout;
pub mod manifest;
pub mod models;
pub mod planner;

pub use autodesign::{AutoDesigner, GenerationConfig, OptimizerConfig, PlacementOptimizer};
pub use error::{LayoutError, LayoutResult};
pub use layout::{apply_template, TemplateCatalog};
