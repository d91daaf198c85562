use super::*;
use crate::analysis::model::{Element, ElementKind};

const LETTER: PageSize = PageSize {
    width_pt: 612.0,
    height_pt: 792.0,
};

fn viewport() -> Viewport {
    Viewport {
        width: 612,
        height: 792,
    }
}

fn region(points: &[(f64, f64)]) -> BoundingRegion {
    BoundingRegion {
        polygon: points.iter().map(|&(x, y)| PolyPoint { x, y }).collect(),
        unit: None,
        origin: None,
        page_number: Some(1),
    }
}

#[test]
fn unit_detection_splits_at_one() {
    assert_eq!(
        detect_unit(&region(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).polygon),
        RegionUnit::Normalized
    );
    assert_eq!(
        detect_unit(&region(&[(1.0, 1.0), (7.5, 1.0), (7.5, 2.0), (1.0, 2.0)]).polygon),
        RegionUnit::Inches
    );
}

#[test]
fn declared_unit_wins_over_detection() {
    let mut r = region(&[(0.5, 0.5), (0.9, 0.5), (0.9, 0.8), (0.5, 0.8)]);
    r.unit = Some(RegionUnit::Points);
    assert_eq!(effective_unit(&r), RegionUnit::Points);
    r.unit = None;
    assert_eq!(effective_unit(&r), RegionUnit::Normalized);
}

#[test]
fn normalized_full_page_maps_to_full_viewport() {
    let r = region(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let b = normalize_region(&r, LETTER, viewport(), 1.0).unwrap();
    assert_eq!(b, PxBox::new(0.0, 0.0, 612.0, 792.0));
}

#[test]
fn inches_convert_through_points() {
    // A 1in x 0.5in box at (1in, 2in), scale 1.0: 72pt = 72px.
    let r = region(&[(1.0, 2.0), (2.0, 2.0), (2.0, 2.5), (1.0, 2.5)]);
    let b = normalize_region(&r, LETTER, viewport(), 1.0).unwrap();
    assert_eq!(b, PxBox::new(72.0, 144.0, 72.0, 36.0));
}

#[test]
fn scale_multiplies_pixels() {
    let r = region(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
    let big = Viewport {
        width: 1224,
        height: 1584,
    };
    let b = normalize_region(&r, LETTER, big, 2.0).unwrap();
    assert_eq!(b, PxBox::new(144.0, 144.0, 144.0, 144.0));
}

#[test]
fn round_trip_recovers_source_bounds() {
    let r = region(&[(0.25, 0.25), (0.75, 0.25), (0.75, 0.5), (0.25, 0.5)]);
    let b = normalize_region(&r, LETTER, viewport(), 1.0).unwrap();
    let back_x = b.x / LETTER.width_pt;
    let back_y = b.y / LETTER.height_pt;
    let back_w = b.width / LETTER.width_pt;
    let back_h = b.height / LETTER.height_pt;
    assert!((back_x - 0.25).abs() < 1e-9);
    assert!((back_y - 0.25).abs() < 1e-9);
    assert!((back_w - 0.5).abs() < 1e-9);
    assert!((back_h - 0.25).abs() < 1e-9);
}

#[test]
fn malformed_regions_yield_none() {
    // Too few points.
    let r = region(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert!(normalize_region(&r, LETTER, viewport(), 1.0).is_none());

    // Non-finite coordinate.
    let r = region(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    assert!(normalize_region(&r, LETTER, viewport(), 1.0).is_none());
}

#[test]
fn edge_noise_is_truncated_not_translated() {
    // Slightly past the right page edge in inches.
    let r = region(&[(8.0, 1.0), (9.0, 1.0), (9.0, 1.5), (8.0, 1.5)]);
    let b = normalize_region(&r, LETTER, viewport(), 1.0).unwrap();
    assert_eq!(b.x, 576.0);
    assert_eq!(b.width, 36.0);
}

#[test]
fn flip_mirrors_y_in_region_units() {
    let r = region(&[(0.1, 0.1), (0.3, 0.1), (0.3, 0.2), (0.1, 0.2)]);
    let flipped = flip_region_y(&r, LETTER);
    let b = normalize_region(&flipped, LETTER, viewport(), 1.0).unwrap();
    // Bottom-left y=0.1..0.2 reads as top-left y=0.8..0.9.
    assert!((b.y - 0.8 * 792.0).abs() < 1e-9);
    assert!((b.height - 0.1 * 792.0).abs() < 1e-9);
    assert_eq!(flipped.origin, Some(PageOrigin::TopLeft));
}

fn element(id: u32, regions: Vec<BoundingRegion>) -> Element {
    Element {
        id: ElementId(id),
        text: format!("element {id}"),
        confidence: 1.0,
        regions,
        kind: ElementKind::Paragraph,
    }
}

#[test]
fn cache_skips_malformed_and_keeps_rest() {
    let elements = vec![
        element(
            0,
            vec![region(&[(0.1, 0.1), (0.4, 0.1), (0.4, 0.2), (0.1, 0.2)])],
        ),
        element(1, vec![region(&[(0.0, 0.0)])]),
        element(2, vec![]),
    ];
    let cache = build_bounds_cache(&elements, LETTER, viewport(), 1.0, PageOrigin::TopLeft);
    assert_eq!(cache.len(), 1);
    assert!(cache.get(ElementId(0)).is_some());
    assert!(cache.get(ElementId(1)).is_none());
    assert!(cache.get(ElementId(2)).is_none());
}

#[test]
fn cache_flips_bottom_left_regions() {
    let elements = vec![element(
        0,
        vec![region(&[(0.1, 0.1), (0.3, 0.1), (0.3, 0.2), (0.1, 0.2)])],
    )];
    let cache = build_bounds_cache(&elements, LETTER, viewport(), 1.0, PageOrigin::BottomLeft);
    let b = cache.get(ElementId(0)).unwrap();
    assert!((b.y - 0.8 * 792.0).abs() < 1e-9);
}
