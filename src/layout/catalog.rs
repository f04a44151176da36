use log::debug;
use uuid::Uuid;

use crate::error::{LayoutError, LayoutResult};
use crate::models::{LayoutTemplate, PhotoMetadata, ZoneGeometry};

/// Upper bound on the number of suggestions returned for a photo selection
pub const MAX_SUGGESTIONS: usize = 5;

pub const CUSTOM_CATEGORY: &str = "Custom";

/// Built-in templates followed by custom templates, in registration order
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<LayoutTemplate>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutTemplate> {
        self.templates.iter()
    }

    /// All templates when `photo_count` is `None`, otherwise those needing at most that many photos
    pub fn templates_for(&self, photo_count: Option<usize>) -> Vec<&LayoutTemplate> {
        self.templates
            .iter()
            .filter(|template| photo_count.map_or(true, |count| template.photo_count() <= count))
            .collect()
    }

    pub fn templates_in_category(&self, category: &str) -> Vec<&LayoutTemplate> {
        self.templates
            .iter()
            .filter(|template| template.category() == category)
            .collect()
    }

    /// Append a user-defined template; names need not be unique
    pub fn register_custom_template(
        &mut self,
        name: &str,
        zones: Vec<ZoneGeometry>,
    ) -> LayoutResult<&LayoutTemplate> {
        let template = LayoutTemplate::new(name, CUSTOM_CATEGORY, zones, None)?;
        debug!(
            "Registered custom template '{}' with {} zones",
            template.name(),
            template.photo_count()
        );

        self.templates.push(template);
        Ok(&self.templates[self.templates.len() - 1])
    }

    /// Up to five templates that fit the selection, most photos first
    pub fn suggestions_for(&self, photos: &[PhotoMetadata]) -> Vec<&LayoutTemplate> {
        let mut suggestions = self.templates_for(Some(photos.len()));
        // sort_by is stable, so equal counts stay in catalog order
        suggestions.sort_by(|a, b| b.photo_count().cmp(&a.photo_count()));
        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }

    /// First registered template holding exactly one photo
    pub fn single_photo_template(&self) -> Option<&LayoutTemplate> {
        self.templates
            .iter()
            .find(|template| template.photo_count() == 1)
    }

    /// Remove a template. The last single-photo template stays, since album
    /// generation relies on it to make progress.
    pub fn remove_template(&mut self, id: Uuid) -> LayoutResult<LayoutTemplate> {
        let index = self
            .templates
            .iter()
            .position(|template| template.id() == id)
            .ok_or(LayoutError::TemplateNotFound(id))?;

        let single_photo_templates = self
            .templates
            .iter()
            .filter(|template| template.photo_count() == 1)
            .count();
        if self.templates[index].photo_count() == 1 && single_photo_templates == 1 {
            return Err(LayoutError::LastSingleTemplate);
        }

        Ok(self.templates.remove(index))
    }
}

fn zone(x: f64, y: f64, width: f64, height: f64) -> ZoneGeometry {
    ZoneGeometry::new(x, y, width, height).with_z_index(1)
}

fn builtin_templates() -> Vec<LayoutTemplate> {
    vec![
        LayoutTemplate::from_parts(
            "Full Bleed",
            "Single Photo",
            vec![zone(0.0, 0.0, 12.0, 12.0)],
            None,
        ),
        LayoutTemplate::from_parts(
            "Side by Side",
            "Two Photos",
            vec![zone(0.0, 0.0, 5.9, 12.0), zone(6.1, 0.0, 5.9, 12.0)],
            None,
        ),
        LayoutTemplate::from_parts(
            "Hero with Two",
            "Three Photos",
            vec![
                zone(0.0, 0.0, 8.0, 12.0),
                zone(8.1, 0.0, 3.9, 5.9),
                zone(8.1, 6.1, 3.9, 5.9),
            ],
            None,
        ),
        LayoutTemplate::from_parts(
            "Four Grid",
            "Four Photos",
            vec![
                zone(0.0, 0.0, 5.9, 5.9),
                zone(6.1, 0.0, 5.9, 5.9),
                zone(0.0, 6.1, 5.9, 5.9),
                zone(6.1, 6.1, 5.9, 5.9),
            ],
            None,
        ),
        LayoutTemplate::from_parts(
            "Magazine Style",
            "Multiple Photos",
            vec![
                zone(0.0, 0.0, 8.0, 8.0),
                zone(8.1, 0.0, 3.9, 3.9),
                zone(8.1, 4.05, 3.9, 3.9),
                zone(0.0, 8.1, 3.9, 3.9),
                zone(4.05, 8.1, 3.9, 3.9),
                zone(8.1, 8.1, 3.9, 3.9),
            ],
            None,
        ),
    ]
}
