use log::{debug, info, warn};
use std::collections::VecDeque;

use super::{largest_template, AutoDesigner};
use crate::layout::apply_template;
use crate::models::{AlbumSettings, LayoutTemplate, Page, PhotoAssignment, PhotoMetadata, Spread};

type PhotoQueue<'p> = VecDeque<&'p mut PhotoMetadata>;

impl<'a> AutoDesigner<'a> {
    /// Template for the next generated page when `remaining` photos are queued.
    ///
    /// Pages hold at most `max_photos_per_page` photos. Falls back to the
    /// catalog's single-photo template when nothing else fits.
    pub fn select_generation_template(&self, remaining: usize) -> Option<&'a LayoutTemplate> {
        let limit = remaining.min(self.config.max_photos_per_page);
        largest_template(self.catalog.templates_for(Some(limit)))
            .or_else(|| self.catalog.single_photo_template())
    }

    /// Lay out every photo, in order, onto consecutive regular spreads.
    ///
    /// Each photo is placed at most once and marked as used. No photos means
    /// no spreads.
    pub fn auto_generate_album(
        &self,
        photos: &mut [PhotoMetadata],
        settings: &AlbumSettings,
    ) -> Vec<Spread> {
        let total = photos.len();
        let mut queue: PhotoQueue<'_> = photos.iter_mut().collect();
        let mut spreads = Vec::new();
        let mut spread_number = 1;

        while !queue.is_empty() {
            let mut spread = Spread::regular(spread_number);
            let before = queue.len();

            for page in [spread.left.as_mut(), spread.right.as_mut()].into_iter().flatten() {
                if queue.is_empty() {
                    break;
                }
                self.fill_page_from_queue(page, &mut queue);
            }

            if queue.len() == before {
                warn!(
                    "No template could take any of the {} remaining photos, stopping generation",
                    queue.len()
                );
                break;
            }

            debug!(
                "Generated spread {} with {} photos",
                spread_number,
                before - queue.len()
            );
            spreads.push(spread);
            spread_number += 1;
        }

        info!(
            "Auto-generated {} spreads from {} photos ({}x{} in pages)",
            spreads.len(),
            total,
            settings.width,
            settings.height
        );
        spreads
    }

    fn fill_page_from_queue(&self, page: &mut Page, queue: &mut PhotoQueue<'_>) {
        let Some(template) = self.select_generation_template(queue.len()) else {
            debug!("No template available for page {}", page.page_number);
            return;
        };
        apply_template(page, template);

        for zone in page.drop_zones.iter_mut() {
            let Some(photo) = queue.pop_front() else {
                break;
            };
            zone.photo = Some(PhotoAssignment::from_photo(photo));
            photo.mark_used();
        }
    }
}
