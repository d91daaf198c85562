use crate::foundation::core::{Fps, Viewport};
use crate::foundation::error::{DocmotionError, DocmotionResult};
use crate::timeline::ease::Ease;

/// Tolerance for floating-point schedule comparisons.
const TIME_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A timestamped viewport-transform sample; the renderer interpolates
/// between consecutive keyframes.
pub struct Keyframe {
    /// Absolute time in seconds from presentation start.
    pub time_secs: f64,
    /// Zoom factor, 1.0 = fit page.
    pub zoom: f64,
    /// Horizontal pan offset in scaled pixel space.
    pub pan_x: f64,
    /// Vertical pan offset in scaled pixel space.
    pub pan_y: f64,
    /// Highlight opacity in `[0, 1]`.
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Whether a step's highlight box came from matched elements or from the
/// unresolved-alignment placeholder.
pub enum HighlightKind {
    /// Box derived from matched document elements.
    Element,
    /// Deterministic placeholder; the step needs manual review.
    Placeholder,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One narration step's slot on the animation schedule.
pub struct TimelineEntry {
    /// 0-based index into the narration step list.
    pub step_index: usize,
    /// Slot start in seconds.
    pub start_secs: f64,
    /// Slot end in seconds.
    pub end_secs: f64,
    /// Caption text passed through from the narration script.
    pub caption: String,
    /// Enter/focus/hold/exit keyframes, times nondecreasing.
    pub keyframes: Vec<Keyframe>,
    /// Source of the highlight box.
    pub highlight: HighlightKind,
    /// Easing curve between this entry's keyframes.
    pub ease: Ease,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Complete animation schedule handed to the presentation renderer.
pub struct PresentationTimeline {
    /// Playback frame rate for the renderer.
    pub fps: Fps,
    /// Viewport the pixel-space keyframes are anchored to.
    pub viewport: Viewport,
    /// Configured pause between consecutive steps, in seconds.
    pub pause_secs: f64,
    /// Total schedule length in seconds.
    pub total_secs: f64,
    /// Entries in step order.
    pub entries: Vec<TimelineEntry>,
}

impl PresentationTimeline {
    /// Checks the schedule invariants: the first entry starts at zero,
    /// starts strictly increase, slots never overlap, no gap exceeds the
    /// configured pause, and keyframe times stay inside their slot.
    pub fn validate(&self) -> DocmotionResult<()> {
        if let Some(first) = self.entries.first()
            && first.start_secs.abs() > TIME_EPS
        {
            return Err(DocmotionError::timeline("first entry must start at 0"));
        }

        for entry in &self.entries {
            if entry.end_secs < entry.start_secs {
                return Err(DocmotionError::timeline(format!(
                    "entry {} ends before it starts",
                    entry.step_index
                )));
            }
            let mut prev = entry.start_secs;
            for kf in &entry.keyframes {
                if kf.time_secs + TIME_EPS < prev {
                    return Err(DocmotionError::timeline(format!(
                        "entry {} keyframe times must be nondecreasing",
                        entry.step_index
                    )));
                }
                if kf.time_secs > entry.end_secs + TIME_EPS {
                    return Err(DocmotionError::timeline(format!(
                        "entry {} keyframe past entry end",
                        entry.step_index
                    )));
                }
                if !(0.0..=1.0).contains(&kf.opacity) {
                    return Err(DocmotionError::timeline(format!(
                        "entry {} keyframe opacity out of [0, 1]",
                        entry.step_index
                    )));
                }
                prev = kf.time_secs;
            }
        }

        for pair in self.entries.windows(2) {
            if pair[1].start_secs <= pair[0].start_secs {
                return Err(DocmotionError::timeline(
                    "entry start times must strictly increase",
                ));
            }
            if pair[0].end_secs > pair[1].start_secs + TIME_EPS {
                return Err(DocmotionError::timeline(format!(
                    "entries {} and {} overlap",
                    pair[0].step_index, pair[1].step_index
                )));
            }
            if pair[1].start_secs - pair[0].end_secs > self.pause_secs + TIME_EPS {
                return Err(DocmotionError::timeline(format!(
                    "gap between entries {} and {} exceeds the inter-step pause",
                    pair[0].step_index, pair[1].step_index
                )));
            }
        }

        if let Some(last) = self.entries.last()
            && last.end_secs > self.total_secs + TIME_EPS
        {
            return Err(DocmotionError::timeline(
                "total duration shorter than the last entry",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
