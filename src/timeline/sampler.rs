use crate::timeline::model::{Keyframe, PresentationTimeline, TimelineEntry};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Viewport transform at one playback instant.
pub struct ViewportState {
    /// Zoom factor.
    pub zoom: f64,
    /// Horizontal pan offset in scaled pixel space.
    pub pan_x: f64,
    /// Vertical pan offset in scaled pixel space.
    pub pan_y: f64,
    /// Highlight opacity in `[0, 1]`.
    pub opacity: f64,
}

impl ViewportState {
    /// Resting transform between entries: unzoomed, unpanned, hidden.
    pub fn identity() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            opacity: 0.0,
        }
    }

    fn from_keyframe(k: Keyframe) -> Self {
        Self {
            zoom: k.zoom,
            pan_x: k.pan_x,
            pan_y: k.pan_y,
            opacity: k.opacity,
        }
    }
}

/// Samples the timeline at an absolute playback time.
///
/// Drawing belongs to the renderer; this is the numeric half of the
/// keyframe contract, usable for spot checks and dry runs. Times outside
/// every entry sample to the identity state.
pub fn sample(timeline: &PresentationTimeline, time_secs: f64) -> ViewportState {
    let idx = timeline
        .entries
        .partition_point(|e| e.start_secs <= time_secs);
    if idx == 0 {
        return ViewportState::identity();
    }
    let entry = &timeline.entries[idx - 1];
    if time_secs > entry.end_secs {
        return ViewportState::identity();
    }
    sample_entry(entry, time_secs)
}

fn sample_entry(entry: &TimelineEntry, time_secs: f64) -> ViewportState {
    let keys = &entry.keyframes;
    if keys.is_empty() {
        return ViewportState::identity();
    }

    let idx = keys.partition_point(|k| k.time_secs <= time_secs);
    if idx == 0 {
        return ViewportState::from_keyframe(keys[0]);
    }
    if idx >= keys.len() {
        return ViewportState::from_keyframe(keys[keys.len() - 1]);
    }

    let a = keys[idx - 1];
    let b = keys[idx];
    let span = b.time_secs - a.time_secs;
    if span <= 0.0 {
        return ViewportState::from_keyframe(b);
    }
    let u = entry.ease.apply((time_secs - a.time_secs) / span);

    ViewportState {
        zoom: lerp(a.zoom, b.zoom, u),
        pan_x: lerp(a.pan_x, b.pan_x, u),
        pan_y: lerp(a.pan_y, b.pan_y, u),
        opacity: lerp(a.opacity, b.opacity, u),
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sampler.rs"]
mod tests;
