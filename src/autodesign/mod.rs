//! Automatic album design: page filling, whole-album generation and the
//! placement optimizer that post-processes generated spreads.

pub mod fill;
pub mod generate;
pub mod optimizer;

pub use optimizer::{OptimizationReport, OptimizerConfig, PlacementOptimizer};

use crate::layout::TemplateCatalog;
use crate::models::LayoutTemplate;

/// Largest template the generator will pick for a single page
pub const DEFAULT_MAX_PHOTOS_PER_PAGE: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub max_photos_per_page: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_photos_per_page: DEFAULT_MAX_PHOTOS_PER_PAGE,
        }
    }
}

/// Fills pages and generates albums from a template catalog
pub struct AutoDesigner<'a> {
    catalog: &'a TemplateCatalog,
    config: GenerationConfig,
}

impl<'a> AutoDesigner<'a> {
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self::with_config(catalog, GenerationConfig::default())
    }

    pub fn with_config(catalog: &'a TemplateCatalog, config: GenerationConfig) -> Self {
        Self { catalog, config }
    }
}

/// Template with the most photos among `candidates`, earliest one on ties
fn largest_template<'t>(
    candidates: impl IntoIterator<Item = &'t LayoutTemplate>,
) -> Option<&'t LayoutTemplate> {
    candidates.into_iter().reduce(|best, template| {
        if template.photo_count() > best.photo_count() {
            template
        } else {
            best
        }
    })
}
