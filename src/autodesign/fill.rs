use log::debug;

use super::{largest_template, AutoDesigner};
use crate::layout::apply_template;
use crate::models::{LayoutTemplate, Page, PhotoAssignment, PhotoMetadata};

impl<'a> AutoDesigner<'a> {
    /// Template a blank page gets when `available` photos are on hand
    pub fn select_fill_template(&self, available: usize) -> Option<&'a LayoutTemplate> {
        largest_template(self.catalog.templates_for(Some(available)))
    }

    /// Fill the empty zones of `page` with unused photos, in input order.
    ///
    /// A page without zones first receives the largest template that the
    /// unused photos can fill. Zones that already hold a photo are left alone.
    /// Placed photos are marked as used. Returns the number of photos placed.
    pub fn auto_fill_page(&self, page: &mut Page, photos: &mut [PhotoMetadata]) -> usize {
        if page.drop_zones.is_empty() {
            let available = photos.iter().filter(|photo| !photo.is_used).count();
            match self.select_fill_template(available) {
                Some(template) => apply_template(page, template),
                None => {
                    debug!(
                        "No template fits {} photos, page {} stays empty",
                        available, page.page_number
                    );
                    return 0;
                }
            }
        }

        let mut unused = photos.iter_mut().filter(|photo| !photo.is_used);
        let mut placed = 0;

        for zone in page.drop_zones.iter_mut().filter(|zone| zone.photo.is_none()) {
            let Some(photo) = unused.next() else {
                break;
            };
            zone.photo = Some(PhotoAssignment::from_photo(photo));
            photo.mark_used();
            placed += 1;
        }

        debug!("Auto-filled page {} with {} photos", page.page_number, placed);
        placed
    }
}
