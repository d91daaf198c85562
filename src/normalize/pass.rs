use std::collections::BTreeMap;

use crate::analysis::model::{BoundingRegion, Element, ElementId, PolyPoint};
use crate::foundation::core::{
    POINTS_PER_INCH, PageOrigin, PageSize, PxBox, RegionUnit, Viewport,
};

/// Decides the unit of an undeclared polygon: coordinates all within
/// `[0, 1]` read as normalized page fractions, anything larger as inches.
pub fn detect_unit(polygon: &[PolyPoint]) -> RegionUnit {
    if polygon.iter().all(|p| p.x <= 1.0 && p.y <= 1.0) {
        RegionUnit::Normalized
    } else {
        RegionUnit::Inches
    }
}

/// Unit a region's coordinates are actually in: the declared unit when the
/// service reported one, the detection heuristic otherwise.
pub fn effective_unit(region: &BoundingRegion) -> RegionUnit {
    region.unit.unwrap_or_else(|| detect_unit(&region.polygon))
}

/// Mirrors a bottom-left-origin region onto the canonical top-left origin,
/// in the region's own unit. Integration layers that receive bottom-left
/// coordinates apply this before normalizing; [`normalize_region`] itself
/// is origin-agnostic.
pub fn flip_region_y(region: &BoundingRegion, page: PageSize) -> BoundingRegion {
    let unit = effective_unit(region);
    let page_height = match unit {
        RegionUnit::Normalized => 1.0,
        RegionUnit::Inches => page.height_pt / POINTS_PER_INCH,
        RegionUnit::Points => page.height_pt,
    };
    BoundingRegion {
        polygon: region
            .polygon
            .iter()
            .map(|p| PolyPoint {
                x: p.x,
                y: page_height - p.y,
            })
            .collect(),
        unit: region.unit,
        origin: Some(PageOrigin::TopLeft),
        page_number: region.page_number,
    }
}

/// Converts a raw polygon region into a canonical pixel box.
///
/// Takes the polygon's axis-aligned bounds, converts them to points
/// (normalized fractions scale by the page size, inches by 72), then to
/// pixels via `scale`, and truncates against the viewport. Returns `None`
/// for regions with fewer than four points or non-finite coordinates;
/// malformed regions are expected in noisy analysis output and must not
/// abort the run.
pub fn normalize_region(
    region: &BoundingRegion,
    page: PageSize,
    viewport: Viewport,
    scale: f64,
) -> Option<PxBox> {
    if region.polygon.len() < 4 {
        return None;
    }
    if region
        .polygon
        .iter()
        .any(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return None;
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in &region.polygon {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let (to_pt_x, to_pt_y) = match effective_unit(region) {
        RegionUnit::Normalized => (page.width_pt, page.height_pt),
        RegionUnit::Inches => (POINTS_PER_INCH, POINTS_PER_INCH),
        RegionUnit::Points => (1.0, 1.0),
    };

    let x = min_x * to_pt_x * scale;
    let y = min_y * to_pt_y * scale;
    let width = (max_x - min_x) * to_pt_x * scale;
    let height = (max_y - min_y) * to_pt_y * scale;

    Some(PxBox::new(x, y, width, height).clamp_to(viewport))
}

#[derive(Clone, Debug, Default)]
/// Per-run map from element id to its canonical primary box.
///
/// Built once per document run and passed by reference through the
/// pipeline; there is no process-wide cache. Elements whose primary region
/// was malformed have no entry.
pub struct BoundsCache {
    boxes: BTreeMap<ElementId, PxBox>,
}

impl BoundsCache {
    pub fn get(&self, id: ElementId) -> Option<PxBox> {
        self.boxes.get(&id).copied()
    }

    /// Records an element's canonical box. Integrations that resolve
    /// geometry through another path can seed a cache directly.
    pub fn insert(&mut self, id: ElementId, px_box: PxBox) {
        self.boxes.insert(id, px_box);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Ids with a resolved box, in id order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.boxes.keys().copied()
    }
}

/// Normalizes every element's primary region into a fresh cache.
///
/// `default_origin` applies to regions that do not declare their own
/// origin; bottom-left regions are flipped before normalization. Dropped
/// elements are logged and skipped, never fatal.
#[tracing::instrument(skip(elements))]
pub fn build_bounds_cache(
    elements: &[Element],
    page: PageSize,
    viewport: Viewport,
    scale: f64,
    default_origin: PageOrigin,
) -> BoundsCache {
    let mut cache = BoundsCache::default();
    for element in elements {
        let Some(region) = element.primary_region() else {
            tracing::debug!(id = element.id.0, "element has no regions, skipped");
            continue;
        };
        let origin = region.origin.unwrap_or(default_origin);
        let flipped;
        let region = match origin {
            PageOrigin::TopLeft => region,
            PageOrigin::BottomLeft => {
                flipped = flip_region_y(region, page);
                &flipped
            }
        };
        match normalize_region(region, page, viewport, scale) {
            Some(px_box) => {
                cache.boxes.insert(element.id, px_box);
            }
            None => {
                tracing::debug!(id = element.id.0, "malformed region, element skipped");
            }
        }
    }
    cache
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
