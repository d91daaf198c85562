use crate::align::aligner::AlignedHighlight;
use crate::config::PlanConfig;
use crate::foundation::core::{PxBox, Viewport};
use crate::foundation::error::{DocmotionError, DocmotionResult};
use crate::narration::NarrationStep;
use crate::timeline::model::{HighlightKind, Keyframe, PresentationTimeline, TimelineEntry};

/// Seconds between a slot boundary and its focus/hold keyframe, shortened
/// for steps too brief to fit the full ramp.
const FOCUS_LEAD_SECS: f64 = 0.5;

/// Pan offset that places the box center at the viewport center at the
/// given zoom. Pan is applied inside the scaled coordinate space, so the
/// offset scales with zoom.
pub fn center_on(px_box: PxBox, viewport: Viewport, zoom: f64) -> (f64, f64) {
    let c = px_box.center();
    (
        (viewport.width_px() / 2.0 - c.x) * zoom,
        (viewport.height_px() / 2.0 - c.y) * zoom,
    )
}

/// Zoom that makes the box fill `fill` of the viewport, clamped so tiny
/// or page-sized boxes never produce a degenerate transform.
pub fn auto_zoom(px_box: PxBox, viewport: Viewport, fill: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    if px_box.width <= 0.0 || px_box.height <= 0.0 {
        return max_zoom;
    }
    let fit_x = viewport.width_px() * fill / px_box.width;
    let fit_y = viewport.height_px() * fill / px_box.height;
    fit_x.min(fit_y).clamp(min_zoom, max_zoom)
}

/// Converts aligned steps into the keyframe schedule.
///
/// Slot arithmetic: `start[i] = sum(duration[0..i]) + i * pause`. Each slot
/// carries the fixed four-keyframe template: enter (zoom 1, opacity 0),
/// focus (zoomed onto the highlight, opacity 1), hold (same, before the
/// end), exit (zoom 1, opacity 0).
#[tracing::instrument(skip(highlights, steps, cfg))]
pub fn build_timeline(
    highlights: &[AlignedHighlight],
    steps: &[NarrationStep],
    cfg: &PlanConfig,
) -> DocmotionResult<PresentationTimeline> {
    if highlights.len() != steps.len() {
        return Err(DocmotionError::timeline(format!(
            "{} highlights for {} steps",
            highlights.len(),
            steps.len()
        )));
    }

    let mut entries = Vec::with_capacity(steps.len());
    let mut clock = 0.0f64;

    for (highlight, step) in highlights.iter().zip(steps) {
        let duration = step.duration_secs.max(0.0);
        let start = clock;
        let end = start + duration;
        let lead = FOCUS_LEAD_SECS.min(duration / 2.0);

        let zoom = step
            .zoom
            .unwrap_or_else(|| {
                auto_zoom(
                    highlight.pixel_box,
                    cfg.viewport,
                    cfg.zoom_fill,
                    cfg.min_zoom,
                    cfg.max_zoom,
                )
            })
            .clamp(cfg.min_zoom, cfg.max_zoom);
        let (pan_x, pan_y) = center_on(highlight.pixel_box, cfg.viewport, zoom);

        let rest = Keyframe {
            time_secs: start,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            opacity: 0.0,
        };
        let focus = Keyframe {
            time_secs: start + lead,
            zoom,
            pan_x,
            pan_y,
            opacity: 1.0,
        };
        let hold = Keyframe {
            time_secs: end - lead,
            ..focus
        };
        let exit = Keyframe {
            time_secs: end,
            ..rest
        };

        entries.push(TimelineEntry {
            step_index: highlight.step_index,
            start_secs: start,
            end_secs: end,
            caption: step.narrative.clone(),
            keyframes: vec![rest, focus, hold, exit],
            highlight: if highlight.needs_review {
                HighlightKind::Placeholder
            } else {
                HighlightKind::Element
            },
            ease: step.ease.unwrap_or_default(),
        });

        clock = end + cfg.inter_step_pause_secs;
    }

    let timeline = PresentationTimeline {
        fps: cfg.fps,
        viewport: cfg.viewport,
        pause_secs: cfg.inter_step_pause_secs,
        total_secs: entries.last().map(|e| e.end_secs).unwrap_or(0.0),
        entries,
    };
    timeline.validate()?;
    Ok(timeline)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
