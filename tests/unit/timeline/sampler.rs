use super::*;
use crate::foundation::core::{Fps, Viewport};
use crate::timeline::ease::Ease;
use crate::timeline::model::HighlightKind;

fn key(t: f64, zoom: f64, pan_x: f64, opacity: f64) -> Keyframe {
    Keyframe {
        time_secs: t,
        zoom,
        pan_x,
        pan_y: 0.0,
        opacity,
    }
}

fn timeline(ease: Ease) -> PresentationTimeline {
    PresentationTimeline {
        fps: Fps { num: 30, den: 1 },
        viewport: Viewport {
            width: 612,
            height: 792,
        },
        pause_secs: 1.0,
        total_secs: 7.0,
        entries: vec![
            TimelineEntry {
                step_index: 0,
                start_secs: 0.0,
                end_secs: 3.0,
                caption: String::new(),
                keyframes: vec![
                    key(0.0, 1.0, 0.0, 0.0),
                    key(0.5, 2.0, 100.0, 1.0),
                    key(2.5, 2.0, 100.0, 1.0),
                    key(3.0, 1.0, 0.0, 0.0),
                ],
                highlight: HighlightKind::Element,
                ease,
            },
            TimelineEntry {
                step_index: 1,
                start_secs: 4.0,
                end_secs: 7.0,
                caption: String::new(),
                keyframes: vec![
                    key(4.0, 1.0, 0.0, 0.0),
                    key(4.5, 3.0, -50.0, 1.0),
                    key(6.5, 3.0, -50.0, 1.0),
                    key(7.0, 1.0, 0.0, 0.0),
                ],
                highlight: HighlightKind::Element,
                ease,
            },
        ],
    }
}

#[test]
fn outside_entries_is_identity() {
    let t = timeline(Ease::Linear);
    assert_eq!(sample(&t, -1.0), ViewportState::identity());
    assert_eq!(sample(&t, 3.5), ViewportState::identity());
    assert_eq!(sample(&t, 100.0), ViewportState::identity());
}

#[test]
fn hold_region_is_steady() {
    let t = timeline(Ease::Linear);
    let state = sample(&t, 1.5);
    assert_eq!(state.zoom, 2.0);
    assert_eq!(state.pan_x, 100.0);
    assert_eq!(state.opacity, 1.0);
}

#[test]
fn linear_ramp_interpolates_midway() {
    let t = timeline(Ease::Linear);
    let state = sample(&t, 0.25);
    assert_eq!(state.zoom, 1.5);
    assert_eq!(state.pan_x, 50.0);
    assert_eq!(state.opacity, 0.5);
}

#[test]
fn eased_ramp_passes_through_endpoints() {
    let t = timeline(Ease::InOutCubic);
    assert_eq!(sample(&t, 0.0), ViewportState::identity());
    let focused = sample(&t, 0.5);
    assert_eq!(focused.zoom, 2.0);
    assert_eq!(focused.opacity, 1.0);
}

#[test]
fn second_entry_samples_independently() {
    let t = timeline(Ease::Linear);
    let state = sample(&t, 5.0);
    assert_eq!(state.zoom, 3.0);
    assert_eq!(state.pan_x, -50.0);
}
