//! Post-processing of generated spreads.
//!
//! Three best-effort passes run over each spread, in order:
//!
//! 1. Gutter safety: faces in zones next to the gutter are moved out of the
//!    safe-zone band, first by shifting the crop, then by swapping photos on
//!    the same page.
//! 2. Visual balance: photos are swapped between differently sized zones of a
//!    page until the face weight of both pages is within tolerance.
//! 3. Grouping: photos of the same person are gathered on one page.
//!
//! Face rectangles are mapped from photo pixels to page inches with a cover
//! fit: the photo is scaled so it covers the zone, multiplied by the
//! assignment's `scale`, centred, then shifted by the crop offset. Zone
//! rotation is not taken into account.

use log::debug;
use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::geometry::Rect;
use crate::models::{AlbumSettings, DropZone, Page, PhotoAssignment, Spread};

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Largest accepted difference between the face weights of both pages
    pub balance_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: 1.0,
        }
    }
}

/// What the optimizer changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimizationReport {
    pub nudged: usize,
    pub gutter_swaps: usize,
    pub balance_swaps: usize,
    pub grouping_swaps: usize,
}

impl OptimizationReport {
    pub fn total(&self) -> usize {
        self.nudged + self.gutter_swaps + self.balance_swaps + self.grouping_swaps
    }

    fn merge(self, other: Self) -> Self {
        Self {
            nudged: self.nudged + other.nudged,
            gutter_swaps: self.gutter_swaps + other.gutter_swaps,
            balance_swaps: self.balance_swaps + other.balance_swaps,
            grouping_swaps: self.grouping_swaps + other.grouping_swaps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Where a photo's pixels land on the page for a given crop
struct CropFrame {
    zone: Rect,
    inches_per_pixel: f64,
    origin_x: f64,
    origin_y: f64,
    max_offset_x: f64,
}

impl CropFrame {
    fn new(zone: Rect, photo: &PhotoAssignment) -> Option<Self> {
        if photo.source_width == 0 || photo.source_height == 0 || !zone.is_valid() {
            return None;
        }

        let width = photo.source_width as f64;
        let height = photo.source_height as f64;
        let inches_per_pixel =
            (zone.width / width).max(zone.height / height) * photo.scale.max(1.0);
        let drawn_width = width * inches_per_pixel;
        let drawn_height = height * inches_per_pixel;

        Some(Self {
            zone,
            inches_per_pixel,
            origin_x: zone.x + (zone.width - drawn_width) / 2.0,
            origin_y: zone.y + (zone.height - drawn_height) / 2.0,
            max_offset_x: ((drawn_width - zone.width) / 2.0).max(0.0),
        })
    }

    /// Faces that end up at least partly inside the zone, in page coordinates
    fn visible_faces(&self, photo: &PhotoAssignment, offset_x: f64, offset_y: f64) -> Vec<Rect> {
        photo
            .detected_faces
            .iter()
            .map(|face| {
                let pixels = face.bounds();
                Rect::new(
                    pixels.x * self.inches_per_pixel,
                    pixels.y * self.inches_per_pixel,
                    pixels.width * self.inches_per_pixel,
                    pixels.height * self.inches_per_pixel,
                )
                .translate(self.origin_x + offset_x, self.origin_y + offset_y)
            })
            .filter(|face| face.intersects(&self.zone))
            .collect()
    }
}

/// Rearranges photos within a spread; never adds or removes photos
#[derive(Debug, Clone)]
pub struct PlacementOptimizer {
    page_width: f64,
    page_height: f64,
    safe_zone: f64,
    config: OptimizerConfig,
}

impl PlacementOptimizer {
    pub fn new(settings: &AlbumSettings) -> Self {
        Self::with_config(settings, OptimizerConfig::default())
    }

    pub fn with_config(settings: &AlbumSettings, config: OptimizerConfig) -> Self {
        Self {
            page_width: settings.width,
            page_height: settings.height,
            safe_zone: settings.safe_zone_size.max(0.0),
            config,
        }
    }

    pub fn optimize_spread(&self, spread: &mut Spread) -> OptimizationReport {
        let mut report = OptimizationReport::default();

        if let Some(left) = spread.left.as_mut() {
            self.secure_gutter(left, Side::Left, &mut report);
        }
        if let Some(right) = spread.right.as_mut() {
            self.secure_gutter(right, Side::Right, &mut report);
        }
        if let (Some(left), Some(right)) = (spread.left.as_mut(), spread.right.as_mut()) {
            self.balance(left, right, &mut report);
            self.group_people(left, right, &mut report);
        }

        if report.total() > 0 {
            debug!("Optimized spread {}: {:?}", spread.spread_number, report);
        }
        report
    }

    /// Optimize every spread; spreads are independent so they run in parallel
    pub fn optimize_album(&self, spreads: &mut [Spread]) -> OptimizationReport {
        spreads
            .par_iter_mut()
            .map(|spread| self.optimize_spread(spread))
            .reduce(OptimizationReport::default, OptimizationReport::merge)
    }

    fn is_gutter_zone(&self, side: Side, zone: &Rect) -> bool {
        match side {
            Side::Left => zone.right() >= self.page_width - self.safe_zone - EPSILON,
            Side::Right => zone.x <= self.safe_zone + EPSILON,
        }
    }

    fn face_is_safe(&self, side: Side, face: &Rect) -> bool {
        match side {
            Side::Left => face.right() <= self.page_width - self.safe_zone + EPSILON,
            Side::Right => face.x >= self.safe_zone - EPSILON,
        }
    }

    /// Horizontal crop offset that keeps every visible face clear of the
    /// gutter band, starting from the given crop. `None` if no offset within
    /// the photo's slack does it.
    fn safe_offset(
        &self,
        side: Side,
        zone: &Rect,
        photo: &PhotoAssignment,
        offset_x: f64,
        offset_y: f64,
    ) -> Option<f64> {
        if !self.is_gutter_zone(side, zone) {
            return Some(offset_x);
        }
        let Some(frame) = CropFrame::new(*zone, photo) else {
            return Some(offset_x);
        };

        let faces = frame.visible_faces(photo, offset_x, offset_y);
        let shift = match side {
            Side::Left => {
                let limit = self.page_width - self.safe_zone;
                faces.iter().map(|face| limit - face.right()).fold(0.0, f64::min)
            }
            Side::Right => faces
                .iter()
                .map(|face| self.safe_zone - face.x)
                .fold(0.0, f64::max),
        };
        if shift.abs() <= EPSILON {
            return Some(offset_x);
        }

        let candidate = offset_x + shift;
        if candidate.abs() > frame.max_offset_x + EPSILON {
            return None;
        }

        // Shifting can bring previously cropped faces into view
        frame
            .visible_faces(photo, candidate, offset_y)
            .iter()
            .all(|face| self.face_is_safe(side, face))
            .then_some(candidate)
    }

    fn secure_gutter(&self, page: &mut Page, side: Side, report: &mut OptimizationReport) {
        for index in 0..page.drop_zones.len() {
            let zone = page.drop_zones[index].rect();
            if !self.is_gutter_zone(side, &zone) {
                continue;
            }
            let (fit, current) = match page.drop_zones[index].photo.as_ref() {
                Some(photo) => (
                    self.safe_offset(side, &zone, photo, photo.offset_x, photo.offset_y),
                    photo.offset_x,
                ),
                None => continue,
            };

            if let Some(offset_x) = fit {
                if (offset_x - current).abs() > EPSILON {
                    if let Some(photo) = page.drop_zones[index].photo.as_mut() {
                        photo.offset_x = offset_x;
                    }
                    debug!(
                        "Shifted crop on page {} zone {} by {:.3}in to clear the gutter",
                        page.page_number,
                        index,
                        offset_x - current
                    );
                    report.nudged += 1;
                }
                continue;
            }

            match self.find_gutter_swap(page, side, index) {
                Some((other, offset_here, offset_there)) => {
                    swap_within_page(page, index, other, offset_here, offset_there);
                    debug!(
                        "Swapped photos of zones {} and {} on page {} to clear the gutter",
                        index, other, page.page_number
                    );
                    report.gutter_swaps += 1;
                }
                None => debug!(
                    "Face in zone {} of page {} stays in the gutter band",
                    index, page.page_number
                ),
            }
        }
    }

    /// Another zone on the page whose photo can trade places with the photo
    /// in `index`, leaving both zones gutter-safe
    fn find_gutter_swap(&self, page: &Page, side: Side, index: usize) -> Option<(usize, f64, f64)> {
        let zone = &page.drop_zones[index];

        page.drop_zones
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .find_map(|(other, other_zone)| {
                let (into_here, into_there) = self.swap_offsets(side, zone, side, other_zone)?;
                Some((other, into_here, into_there))
            })
    }

    /// Offsets for exchanging the photos of two zones, or `None` if either
    /// zone is empty or would end up with a face in the gutter band.
    /// The first offset is for the photo arriving in `here`.
    fn swap_offsets(
        &self,
        here_side: Side,
        here: &DropZone,
        there_side: Side,
        there: &DropZone,
    ) -> Option<(f64, f64)> {
        let here_photo = here.photo.as_ref()?;
        let there_photo = there.photo.as_ref()?;

        let into_here = self.safe_offset(here_side, &here.rect(), there_photo, 0.0, 0.0)?;
        let into_there = self.safe_offset(there_side, &there.rect(), here_photo, 0.0, 0.0)?;
        Some((into_here, into_there))
    }

    fn page_area(&self) -> f64 {
        self.page_width * self.page_height
    }

    fn zone_weight(&self, zone: &Rect, photo: Option<&PhotoAssignment>) -> f64 {
        let page_area = self.page_area();
        if page_area <= 0.0 {
            return 0.0;
        }
        let faces = photo.map_or(0, |photo| photo.detected_faces.len());
        zone.area() / page_area * faces as f64
    }

    /// Area-weighted face count of a page
    fn page_weight(&self, page: &Page) -> f64 {
        page.drop_zones
            .iter()
            .map(|zone| self.zone_weight(&zone.rect(), zone.photo.as_ref()))
            .sum()
    }

    fn balance(&self, left: &mut Page, right: &mut Page, report: &mut OptimizationReport) {
        let max_rounds = left.drop_zones.len().pow(2) + right.drop_zones.len().pow(2);

        for _ in 0..max_rounds {
            let difference = self.page_weight(left) - self.page_weight(right);
            if difference.abs() <= self.config.balance_tolerance + EPSILON {
                break;
            }

            let left_swap = self.best_balance_swap(left, Side::Left, difference);
            let right_swap = self.best_balance_swap(right, Side::Right, difference);
            let (page, swap) = match (left_swap, right_swap) {
                (Some(l), Some(r)) if r.gap < l.gap => (&mut *right, r),
                (Some(l), _) => (&mut *left, l),
                (None, Some(r)) => (&mut *right, r),
                (None, None) => break,
            };

            swap_within_page(
                page,
                swap.first,
                swap.second,
                swap.first_offset,
                swap.second_offset,
            );
            debug!(
                "Swapped zones {} and {} on page {} for balance ({:.3} -> {:.3})",
                swap.first,
                swap.second,
                page.page_number,
                difference.abs(),
                swap.gap
            );
            report.balance_swaps += 1;
        }
    }

    /// Same-page swap between differently sized zones that most reduces the
    /// left/right weight difference
    fn best_balance_swap(&self, page: &Page, side: Side, difference: f64) -> Option<BalanceSwap> {
        let page_area = self.page_area();
        if page_area <= 0.0 {
            return None;
        }
        let zones = &page.drop_zones;
        let mut best: Option<BalanceSwap> = None;

        for first in 0..zones.len() {
            for second in first + 1..zones.len() {
                let (a, b) = (&zones[first], &zones[second]);
                let (Some(photo_a), Some(photo_b)) = (a.photo.as_ref(), b.photo.as_ref()) else {
                    continue;
                };
                let area_a = a.rect().area();
                let area_b = b.rect().area();
                if (area_a - area_b).abs() <= EPSILON {
                    continue;
                }

                let faces_a = photo_a.detected_faces.len() as f64;
                let faces_b = photo_b.detected_faces.len() as f64;
                let delta = (area_a - area_b) * (faces_b - faces_a) / page_area;
                let gap = match side {
                    Side::Left => (difference + delta).abs(),
                    Side::Right => (difference - delta).abs(),
                };
                let improves = gap < difference.abs() - EPSILON;
                if !improves || best.as_ref().is_some_and(|b| gap >= b.gap) {
                    continue;
                }

                if let Some((first_offset, second_offset)) = self.swap_offsets(side, a, side, b) {
                    best = Some(BalanceSwap {
                        first,
                        second,
                        first_offset,
                        second_offset,
                        gap,
                    });
                }
            }
        }

        best
    }

    /// People are handled one at a time. A later swap may split a person
    /// gathered earlier; the pass does not make every grouping hold at once.
    fn group_people(&self, left: &mut Page, right: &mut Page, report: &mut OptimizationReport) {
        let people: BTreeSet<String> = left
            .assignments()
            .chain(right.assignments())
            .flat_map(|photo| photo.detected_faces.iter())
            .filter_map(|face| face.person_id.clone())
            .collect();

        for person in &people {
            let left_count = count_showing(left, person);
            let right_count = count_showing(right, person);
            if left_count == 0 || right_count == 0 || left_count == right_count {
                continue;
            }
            let gather_left = left_count > right_count;

            let minority = if gather_left { &*right } else { &*left };
            let strays: Vec<usize> = minority
                .drop_zones
                .iter()
                .enumerate()
                .filter(|(_, zone)| zone.photo.as_ref().is_some_and(|p| shows_person(p, person)))
                .map(|(index, _)| index)
                .collect();

            for stray in strays {
                let target = {
                    let left_view: &Page = left;
                    let right_view: &Page = right;
                    let majority = if gather_left { left_view } else { right_view };
                    majority.drop_zones.iter().enumerate().find_map(|(index, zone)| {
                        if zone.photo.as_ref().map_or(true, |p| shows_person(p, person)) {
                            return None;
                        }
                        let (left_index, right_index) =
                            if gather_left { (index, stray) } else { (stray, index) };
                        self.cross_swap(left_view, right_view, left_index, right_index)
                            .map(|offsets| (left_index, right_index, offsets))
                    })
                };

                if let Some((left_index, right_index, (left_offset, right_offset))) = target {
                    exchange_across_pages(
                        left,
                        right,
                        left_index,
                        right_index,
                        left_offset,
                        right_offset,
                    );
                    debug!(
                        "Moved a photo of '{}' to page {}",
                        person,
                        if gather_left { left.page_number } else { right.page_number }
                    );
                    report.grouping_swaps += 1;
                }
            }
        }
    }

    /// Offsets for exchanging photos between the pages, provided both zones stay
    /// gutter-safe and the balance does not get worse than tolerated
    fn cross_swap(
        &self,
        left: &Page,
        right: &Page,
        left_index: usize,
        right_index: usize,
    ) -> Option<(f64, f64)> {
        let left_zone = &left.drop_zones[left_index];
        let right_zone = &right.drop_zones[right_index];
        let offsets = self.swap_offsets(Side::Left, left_zone, Side::Right, right_zone)?;

        let difference = self.page_weight(left) - self.page_weight(right);
        let left_rect = left_zone.rect();
        let right_rect = right_zone.rect();
        let left_after = self.page_weight(left)
            - self.zone_weight(&left_rect, left_zone.photo.as_ref())
            + self.zone_weight(&left_rect, right_zone.photo.as_ref());
        let right_after = self.page_weight(right)
            - self.zone_weight(&right_rect, right_zone.photo.as_ref())
            + self.zone_weight(&right_rect, left_zone.photo.as_ref());

        let allowed = self.config.balance_tolerance.max(difference.abs()) + EPSILON;
        ((left_after - right_after).abs() <= allowed).then_some(offsets)
    }
}

struct BalanceSwap {
    first: usize,
    second: usize,
    first_offset: f64,
    second_offset: f64,
    gap: f64,
}

fn shows_person(photo: &PhotoAssignment, person: &str) -> bool {
    photo
        .detected_faces
        .iter()
        .any(|face| face.person_id.as_deref() == Some(person))
}

fn count_showing(page: &Page, person: &str) -> usize {
    page.assignments()
        .filter(|photo| shows_person(photo, person))
        .count()
}

fn recropped(mut photo: PhotoAssignment, offset_x: f64) -> PhotoAssignment {
    photo.reset_crop();
    photo.offset_x = offset_x;
    photo
}

/// Exchange two photos on one page; each offset belongs to the photo arriving in that zone
fn swap_within_page(
    page: &mut Page,
    first: usize,
    second: usize,
    first_offset: f64,
    second_offset: f64,
) {
    let first_photo = page.drop_zones[first].photo.take();
    let second_photo = page.drop_zones[second].photo.take();
    page.drop_zones[first].photo = second_photo.map(|photo| recropped(photo, first_offset));
    page.drop_zones[second].photo = first_photo.map(|photo| recropped(photo, second_offset));
}

fn exchange_across_pages(
    left: &mut Page,
    right: &mut Page,
    left_index: usize,
    right_index: usize,
    left_offset: f64,
    right_offset: f64,
) {
    let from_left = left.drop_zones[left_index].photo.take();
    let from_right = right.drop_zones[right_index].photo.take();
    left.drop_zones[left_index].photo = from_right.map(|photo| recropped(photo, left_offset));
    right.drop_zones[right_index].photo = from_left.map(|photo| recropped(photo, right_offset));
}
