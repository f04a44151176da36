pub mod applier;
pub mod catalog;

pub use applier::apply_template;
pub use catalog::{TemplateCatalog, CUSTOM_CATEGORY, MAX_SUGGESTIONS};
