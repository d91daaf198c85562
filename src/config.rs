use crate::align::aligner::AlignParams;
use crate::foundation::core::{Fps, PageOrigin, Viewport};
use crate::foundation::error::{DocmotionError, DocmotionResult};
use crate::sections::taxonomy::Taxonomy;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Externally supplied planning parameters.
///
/// Every retargetable knob lives here, so the pipeline can be pointed at
/// a different document type or renderer without code changes. All fields
/// have working defaults; partial JSON configs fill in the rest.
pub struct PlanConfig {
    /// Target viewport in pixels.
    pub viewport: Viewport,
    /// Playback frame rate carried to the renderer.
    pub fps: Fps,
    /// Points-to-pixels scale factor.
    pub scale: f64,
    /// Origin convention of the analysis service's coordinates; validate
    /// against known sample documents when integrating a new service.
    pub page_origin: PageOrigin,
    /// Lower zoom clamp.
    pub min_zoom: f64,
    /// Upper zoom clamp.
    pub max_zoom: f64,
    /// Fraction of the viewport an auto-zoomed highlight should fill.
    pub zoom_fill: f64,
    /// Pause between consecutive steps in seconds.
    pub inter_step_pause_secs: f64,
    /// Vertical gap that splits a section into sub-sections, in pixels
    /// (one inch at the current scale is a sensible starting point).
    pub proximity_px: f64,
    /// Narration alignment thresholds.
    pub align: AlignParams,
    /// Ordered section taxonomy.
    pub taxonomy: Taxonomy,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport {
                width: 1280,
                height: 720,
            },
            fps: Fps { num: 30, den: 1 },
            scale: 1.0,
            page_origin: PageOrigin::TopLeft,
            min_zoom: 1.0,
            max_zoom: 3.0,
            zoom_fill: 0.7,
            inter_step_pause_secs: 0.5,
            proximity_px: 72.0,
            align: AlignParams::default(),
            taxonomy: Taxonomy::default(),
        }
    }
}

impl PlanConfig {
    pub fn validate(&self) -> DocmotionResult<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(DocmotionError::validation("viewport must be non-empty"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DocmotionError::validation("scale must be finite and > 0"));
        }
        if self.min_zoom <= 0.0 || self.max_zoom < self.min_zoom {
            return Err(DocmotionError::validation(
                "zoom clamp must satisfy 0 < min_zoom <= max_zoom",
            ));
        }
        if !(0.0..=1.0).contains(&self.zoom_fill) || self.zoom_fill == 0.0 {
            return Err(DocmotionError::validation("zoom_fill must be in (0, 1]"));
        }
        if self.inter_step_pause_secs < 0.0 {
            return Err(DocmotionError::validation(
                "inter_step_pause_secs must be >= 0",
            ));
        }
        if self.proximity_px <= 0.0 {
            return Err(DocmotionError::validation("proximity_px must be > 0"));
        }
        self.align.validate()?;
        self.taxonomy.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
