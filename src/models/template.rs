use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LayoutError, LayoutResult};
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZoneShape {
    #[default]
    Rectangle,
    Circle,
    Ellipse,
    Custom,
}

/// Placement of a drop zone on a page, without any photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub shape: ZoneShape,
    #[serde(default)]
    pub z_index: i32,
}

impl ZoneGeometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            shape: ZoneShape::Rectangle,
            z_index: 0,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundElement {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub pattern_id: Option<String>,
    pub color: String,
    pub opacity: f64,
}

impl Default for BackgroundElement {
    fn default() -> Self {
        Self {
            image_path: None,
            pattern_id: None,
            color: "#FFFFFF".to_string(),
            opacity: 1.0,
        }
    }
}

/// Named, immutable arrangement of drop zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    id: Uuid,
    name: String,
    category: String,
    zones: Vec<ZoneGeometry>,
    #[serde(default)]
    background: Option<BackgroundElement>,
}

impl LayoutTemplate {
    /// Build a template, rejecting empty zone lists and zones without positive extent
    pub fn new(
        name: &str,
        category: &str,
        zones: Vec<ZoneGeometry>,
        background: Option<BackgroundElement>,
    ) -> LayoutResult<Self> {
        if zones.is_empty() {
            return Err(LayoutError::EmptyTemplate);
        }

        if let Some((index, zone)) = zones
            .iter()
            .enumerate()
            .find(|(_, zone)| !zone.rect().is_valid())
        {
            return Err(LayoutError::InvalidGeometry {
                index,
                width: zone.width,
                height: zone.height,
            });
        }

        Ok(Self::from_parts(name, category, zones, background))
    }

    pub(crate) fn from_parts(
        name: &str,
        category: &str,
        zones: Vec<ZoneGeometry>,
        background: Option<BackgroundElement>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: category.to_string(),
            zones,
            background,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn zones(&self) -> &[ZoneGeometry] {
        &self.zones
    }

    pub fn background(&self) -> Option<&BackgroundElement> {
        self.background.as_ref()
    }

    /// Always equal to the number of zones
    pub fn photo_count(&self) -> usize {
        self.zones.len()
    }

    pub fn to_ref(&self) -> TemplateRef {
        TemplateRef {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

/// What a page remembers about the template it was stamped from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}
