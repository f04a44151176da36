use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::LayoutResult;
use crate::models::{DetectedFace, PhotoMetadata};

/// Bucket for faces nobody has identified yet
pub const UNKNOWN_PERSON: &str = "Unknown";

/// Pluggable face detection backend.
///
/// Layout code never calls this itself; photos must carry their faces before
/// they reach the auto-designer.
pub trait FaceDetector: Send + Sync {
    /// Faces in the image at `path`, in pixel coordinates of that image
    fn detect_faces(&self, path: &Path) -> LayoutResult<Vec<DetectedFace>>;
}

/// Run `detector` on every photo that has no faces yet.
///
/// Failures are logged and the photo is skipped. Returns the number of photos
/// that received faces.
pub fn attach_faces(photos: &mut [PhotoMetadata], detector: &dyn FaceDetector) -> usize {
    let mut updated = 0;

    for photo in photos.iter_mut().filter(|photo| photo.faces.is_empty()) {
        match detector.detect_faces(Path::new(&photo.file_path)) {
            Ok(faces) if faces.is_empty() => {}
            Ok(faces) => {
                debug!("Detected {} faces in {}", faces.len(), photo.file_path);
                photo.faces = faces;
                updated += 1;
            }
            Err(e) => warn!("Face detection failed for {}: {}", photo.file_path, e),
        }
    }

    updated
}

/// Photos grouped by the people on them; unidentified faces go under
/// [`UNKNOWN_PERSON`]. A photo is listed once per person.
pub fn group_photos_by_person(photos: &[PhotoMetadata]) -> BTreeMap<String, Vec<&PhotoMetadata>> {
    let mut groups: BTreeMap<String, Vec<&PhotoMetadata>> = BTreeMap::new();

    for photo in photos {
        for face in &photo.faces {
            let person = face.person_id.as_deref().unwrap_or(UNKNOWN_PERSON);
            let group = groups.entry(person.to_string()).or_default();
            if !group.iter().any(|member| member.id == photo.id) {
                group.push(photo);
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    struct StubDetector;

    impl FaceDetector for StubDetector {
        fn detect_faces(&self, path: &Path) -> LayoutResult<Vec<DetectedFace>> {
            match path.file_stem().and_then(|stem| stem.to_str()) {
                Some("portrait") => Ok(vec![DetectedFace::new(10.0, 10.0, 50.0, 50.0, 0.97)]),
                Some("broken") => Err(LayoutError::FaceDetection {
                    path: path.to_path_buf(),
                    reason: "unreadable".to_string(),
                }),
                _ => Ok(Vec::new()),
            }
        }
    }

    #[test]
    fn test_attach_faces_only_fills_missing() {
        let existing = DetectedFace::new(1.0, 1.0, 2.0, 2.0, 0.5).with_person("flower_girl");
        let mut photos = vec![
            PhotoMetadata::new("/p/portrait.jpg", 100, 100),
            PhotoMetadata::new("/p/landscape.jpg", 100, 100),
            PhotoMetadata::new("/p/broken.jpg", 100, 100),
            PhotoMetadata::new("/p/portrait.jpg", 100, 100).with_faces(vec![existing.clone()]),
        ];

        let updated = attach_faces(&mut photos, &StubDetector);

        assert_eq!(updated, 1);
        assert_eq!(photos[0].faces.len(), 1);
        assert!(photos[1].faces.is_empty());
        assert!(photos[2].faces.is_empty());
        assert_eq!(photos[3].faces, vec![existing]);
    }

    #[test]
    fn test_group_photos_by_person() {
        let photos = vec![
            PhotoMetadata::new("a.jpg", 1, 1).with_faces(vec![
                DetectedFace::new(0.0, 0.0, 1.0, 1.0, 0.9).with_person("bride"),
                DetectedFace::new(2.0, 0.0, 1.0, 1.0, 0.9).with_person("groom"),
            ]),
            PhotoMetadata::new("b.jpg", 1, 1).with_faces(vec![
                DetectedFace::new(0.0, 0.0, 1.0, 1.0, 0.9).with_person("bride"),
                DetectedFace::new(3.0, 0.0, 1.0, 1.0, 0.9).with_person("bride"),
            ]),
            PhotoMetadata::new("c.jpg", 1, 1)
                .with_faces(vec![DetectedFace::new(0.0, 0.0, 1.0, 1.0, 0.9)]),
            PhotoMetadata::new("d.jpg", 1, 1),
        ];

        let groups = group_photos_by_person(&photos);

        assert_eq!(groups.len(), 3);
        let bride: Vec<&str> = groups["bride"].iter().map(|p| p.file_path.as_str()).collect();
        assert_eq!(bride, vec!["a.jpg", "b.jpg"]);
        assert_eq!(groups["groom"].len(), 1);
        assert_eq!(groups[UNKNOWN_PERSON][0].file_path, "c.jpg");
    }
}
