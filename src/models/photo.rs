use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::geometry::Rect;

/// Face found in a photo, in photo-local pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub person_name: Option<String>,
}

impl DetectedFace {
    pub fn new(x: f64, y: f64, width: f64, height: f64, confidence: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            confidence,
            person_id: None,
            person_name: None,
        }
    }

    pub fn with_person(mut self, person_id: &str) -> Self {
        self.person_id = Some(person_id.to_string());
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    #[default]
    None,
    BlackAndWhite,
    Sepia,
    Vintage,
    Brightness,
    Contrast,
    Saturation,
    Custom,
}

/// Filter settings carried on an assignment; applied by the renderer, not here
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhotoFilter {
    pub name: String,
    pub filter_type: FilterType,
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// A photo in the album's pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoMetadata {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub file_path: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub date_taken: Option<DateTime<Utc>>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub faces: Vec<DetectedFace>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub usage_count: u32,
}

impl PhotoMetadata {
    pub fn new(file_path: &str, width: u32, height: u32) -> Self {
        let file_name = std::path::Path::new(file_path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            id: Uuid::new_v4(),
            file_path: file_path.to_string(),
            file_name,
            date_taken: None,
            width,
            height,
            file_size: 0,
            faces: Vec::new(),
            tags: Vec::new(),
            is_used: false,
            usage_count: 0,
        }
    }

    pub fn with_faces(mut self, faces: Vec<DetectedFace>) -> Self {
        self.faces = faces;
        self
    }

    /// Usage bookkeeping for a photo that was just placed
    pub fn mark_used(&mut self) {
        self.is_used = true;
        self.usage_count += 1;
    }

    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn person_ids(&self) -> impl Iterator<Item = &str> {
        self.faces.iter().filter_map(|face| face.person_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_creation() {
        let photo = PhotoMetadata::new("/wedding/ceremony/IMG_0042.jpg", 6000, 4000);

        assert_eq!(photo.file_name, "IMG_0042.jpg");
        assert_eq!(photo.width, 6000);
        assert!(photo.has_dimensions());
        assert!(!photo.is_used);
        assert_eq!(photo.usage_count, 0);
    }

    #[test]
    fn test_mark_used_increments_counter() {
        let mut photo = PhotoMetadata::new("a.jpg", 10, 10);
        photo.mark_used();
        photo.mark_used();

        assert!(photo.is_used);
        assert_eq!(photo.usage_count, 2);
    }

    #[test]
    fn test_manifest_style_deserialization() {
        let json = r#"{
            "file_path": "/photos/b.jpg",
            "faces": [{"x": 1, "y": 2, "width": 3, "height": 4, "person_id": "bride"}]
        }"#;
        let photo: PhotoMetadata = serde_json::from_str(json).unwrap();

        assert_eq!(photo.file_path, "/photos/b.jpg");
        assert_eq!(photo.width, 0);
        assert_eq!(photo.faces.len(), 1);
        assert_eq!(photo.person_ids().collect::<Vec<_>>(), vec!["bride"]);
        assert_eq!(photo.faces[0].bounds(), Rect::new(1.0, 2.0, 3.0, 4.0));
    }
}
