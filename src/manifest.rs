use log::{info, warn};
use std::path::Path;

use crate::error::LayoutResult;
use crate::models::PhotoMetadata;

/// Read a JSON array of photos, filling in what the manifest leaves out.
///
/// Missing file names come from the path. Missing pixel dimensions and file
/// sizes are read from the file; photos that cannot be probed are kept with
/// unknown dimensions.
pub fn load_manifest(path: &Path) -> LayoutResult<Vec<PhotoMetadata>> {
    let content = std::fs::read_to_string(path)?;
    let mut photos: Vec<PhotoMetadata> = serde_json::from_str(&content)?;

    for photo in photos.iter_mut() {
        complete_photo(photo);
    }

    info!("Loaded {} photos from {}", photos.len(), path.display());
    Ok(photos)
}

fn complete_photo(photo: &mut PhotoMetadata) {
    let file = Path::new(&photo.file_path);

    if photo.file_name.is_empty() {
        if let Some(name) = file.file_name() {
            photo.file_name = name.to_string_lossy().to_string();
        }
    }

    if photo.file_size == 0 {
        if let Ok(metadata) = std::fs::metadata(file) {
            photo.file_size = metadata.len();
        }
    }

    if !photo.has_dimensions() {
        match image::image_dimensions(file) {
            Ok((width, height)) => {
                photo.width = width;
                photo.height = height;
            }
            Err(e) => warn!("Could not read dimensions of {}: {}", photo.file_path, e),
        }
    }
}
