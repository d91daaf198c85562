use super::*;

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
}

#[test]
fn fps_frame_math() {
    let fps = Fps::new(24, 1).unwrap();
    assert_eq!(fps.frame_duration_secs(), 1.0 / 24.0);
    assert_eq!(fps.secs_to_frames_floor(1.0), 24);
    assert_eq!(fps.secs_to_frames_floor(-2.0), 0);
}

#[test]
fn px_box_center_and_area() {
    let b = PxBox::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(b.center(), Point::new(60.0, 45.0));
    assert_eq!(b.area(), 5000.0);
}

#[test]
fn px_box_union_covers_both() {
    let a = PxBox::new(0.0, 0.0, 10.0, 10.0);
    let b = PxBox::new(50.0, 40.0, 10.0, 10.0);
    let u = a.union(b);
    assert_eq!(u, PxBox::new(0.0, 0.0, 60.0, 50.0));
}

#[test]
fn px_box_negative_dims_collapse_to_zero() {
    let b = PxBox::new(5.0, 5.0, -3.0, -1.0);
    assert_eq!(b.width, 0.0);
    assert_eq!(b.height, 0.0);
    assert_eq!(b.area(), 0.0);
}

#[test]
fn clamp_truncates_instead_of_shifting() {
    let viewport = Viewport {
        width: 100,
        height: 100,
    };

    // Overhangs the right edge: position kept, width cut.
    let b = PxBox::new(80.0, 10.0, 40.0, 20.0).clamp_to(viewport);
    assert_eq!(b, PxBox::new(80.0, 10.0, 20.0, 20.0));

    // Overhangs the left edge: the outside part is cut away.
    let b = PxBox::new(-30.0, 10.0, 40.0, 20.0).clamp_to(viewport);
    assert_eq!(b, PxBox::new(0.0, 10.0, 10.0, 20.0));

    // Fully outside collapses to zero area at the boundary.
    let b = PxBox::new(200.0, 200.0, 40.0, 20.0).clamp_to(viewport);
    assert_eq!(b.area(), 0.0);
}

#[test]
fn page_size_from_inches_is_points() {
    let page = PageSize::from_inches(8.5, 11.0);
    assert_eq!(page.width_pt, 612.0);
    assert_eq!(page.height_pt, 792.0);
}
