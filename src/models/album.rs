use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::photo::{DetectedFace, PhotoFilter, PhotoMetadata};
use super::template::{BackgroundElement, TemplateRef, ZoneGeometry};
use crate::geometry::Rect;

/// A photo as placed inside a drop zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoAssignment {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub file_path: String,
    /// Zoom on top of the cover fit, never below 1.0
    pub scale: f64,
    /// Crop shift in inches, relative to the centred position
    pub offset_x: f64,
    pub offset_y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub filter: Option<PhotoFilter>,
    #[serde(default)]
    pub detected_faces: Vec<DetectedFace>,
    #[serde(default)]
    pub source_width: u32,
    #[serde(default)]
    pub source_height: u32,
}

impl PhotoAssignment {
    pub fn from_photo(photo: &PhotoMetadata) -> Self {
        Self {
            id: Uuid::new_v4(),
            photo_id: photo.id,
            file_path: photo.file_path.clone(),
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            rotation: 0.0,
            filter: None,
            detected_faces: photo.faces.clone(),
            source_width: photo.width,
            source_height: photo.height,
        }
    }

    pub fn has_faces(&self) -> bool {
        !self.detected_faces.is_empty()
    }

    pub fn reset_crop(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    pub id: Uuid,
    #[serde(flatten)]
    pub geometry: ZoneGeometry,
    #[serde(default)]
    pub photo: Option<PhotoAssignment>,
}

impl DropZone {
    /// Fresh zone with its own identity; the geometry is copied
    pub fn from_geometry(geometry: &ZoneGeometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry: geometry.clone(),
            photo: None,
        }
    }

    pub fn rect(&self) -> Rect {
        self.geometry.rect()
    }

    pub fn is_filled(&self) -> bool {
        self.photo.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Caption or title; carried for the renderer, never inspected by layout code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub id: Uuid,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_family: String,
    pub font_size: f64,
    pub color: String,
    #[serde(default)]
    pub alignment: TextAlignment,
    #[serde(default)]
    pub is_bold: bool,
    #[serde(default)]
    pub is_italic: bool,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub page_number: u32,
    #[serde(default)]
    pub drop_zones: Vec<DropZone>,
    #[serde(default)]
    pub text_elements: Vec<TextElement>,
    #[serde(default)]
    pub background: Option<BackgroundElement>,
    #[serde(default)]
    pub template: Option<TemplateRef>,
}

impl Page {
    pub fn new(page_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_number,
            drop_zones: Vec::new(),
            text_elements: Vec::new(),
            background: None,
            template: None,
        }
    }

    pub fn filled_count(&self) -> usize {
        self.drop_zones.iter().filter(|zone| zone.is_filled()).count()
    }

    pub fn assignments(&self) -> impl Iterator<Item = &PhotoAssignment> {
        self.drop_zones.iter().filter_map(|zone| zone.photo.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpreadType {
    Cover,
    #[default]
    Regular,
    BackCover,
}

/// Two facing pages; the gutter sits where `left` meets `right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub id: Uuid,
    pub spread_number: u32,
    #[serde(default)]
    pub left: Option<Page>,
    #[serde(default)]
    pub right: Option<Page>,
    #[serde(default)]
    pub spread_type: SpreadType,
}

impl Spread {
    /// Regular spread with both pages, numbered `2(n-1)` and `2(n-1)+1`
    pub fn regular(spread_number: u32) -> Self {
        let left_number = 2 * spread_number.saturating_sub(1);
        Self {
            id: Uuid::new_v4(),
            spread_number,
            left: Some(Page::new(left_number)),
            right: Some(Page::new(left_number + 1)),
            spread_type: SpreadType::Regular,
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.left.iter().chain(self.right.iter())
    }

    pub fn assigned_photo_ids(&self) -> Vec<Uuid> {
        self.pages()
            .flat_map(|page| page.assignments())
            .map(|assignment| assignment.photo_id)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageOrientation {
    Portrait,
    #[default]
    Landscape,
    Square,
}

/// Physical album format, lengths in inches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSettings {
    pub width: f64,
    pub height: f64,
    pub orientation: PageOrientation,
    pub pages_per_spread: u32,
    pub bleed_size: f64,
    pub safe_zone_size: f64,
    pub show_cut_lines: bool,
    pub show_safe_zones: bool,
    pub cover_type: String,
}

impl Default for AlbumSettings {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 12.0,
            orientation: PageOrientation::Landscape,
            pages_per_spread: 2,
            bleed_size: 0.125,
            safe_zone_size: 0.25,
            show_cut_lines: true,
            show_safe_zones: true,
            cover_type: "Standard".to_string(),
        }
    }
}

/// Settings plus the ordered spreads; what persistence collaborators save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumProject {
    pub id: Uuid,
    pub name: String,
    pub client_name: String,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub settings: AlbumSettings,
    #[serde(default)]
    pub spreads: Vec<Spread>,
}
