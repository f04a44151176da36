pub mod album;
pub mod photo;
pub mod template;

pub use album::{
    AlbumProject, AlbumSettings, DropZone, Page, PageOrientation, PhotoAssignment, Spread,
    SpreadType, TextAlignment, TextElement,
};
pub use photo::{DetectedFace, FilterType, PhotoFilter, PhotoMetadata};
pub use template::{BackgroundElement, LayoutTemplate, TemplateRef, ZoneGeometry, ZoneShape};
