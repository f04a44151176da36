use log::debug;

use crate::models::{DropZone, LayoutTemplate, Page};

/// Stamp a template onto a page.
///
/// Existing zones and their photos are discarded and replaced by fresh zones
/// copied from the template. The page background is only replaced when the
/// template carries one.
pub fn apply_template(page: &mut Page, template: &LayoutTemplate) {
    page.drop_zones = template
        .zones()
        .iter()
        .map(DropZone::from_geometry)
        .collect();
    page.template = Some(template.to_ref());

    if let Some(background) = template.background() {
        page.background = Some(background.clone());
    }

    debug!(
        "Applied template '{}' to page {} ({} zones)",
        template.name(),
        page.page_number,
        page.drop_zones.len()
    );
}
