use std::collections::BTreeMap;

use crate::align::aligner::{AlignedHighlight, align_steps};
use crate::analysis::model::AnalysisResult;
use crate::config::PlanConfig;
use crate::foundation::error::DocmotionResult;
use crate::narration::NarrationStep;
use crate::normalize::pass::build_bounds_cache;
use crate::sections::grouper::{Section, group_sections};
use crate::timeline::builder::build_timeline;
use crate::timeline::model::PresentationTimeline;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Everything the presentation renderer needs: the keyframe schedule, the
/// per-step highlight boxes, and the section map for UI browsing.
pub struct PresentationPlan {
    /// The animation schedule.
    pub timeline: PresentationTimeline,
    /// One highlight per narration step, in step order.
    pub highlights: Vec<AlignedHighlight>,
    /// Section map keyed by taxonomy key; empty sections included.
    pub sections: BTreeMap<String, Section>,
    /// Step indices whose alignment needs manual review.
    pub review: Vec<usize>,
}

/// Runs the full planning pipeline: normalize coordinates, group sections,
/// align narration, build the timeline.
///
/// The only fatal paths are precondition failures (invalid config, a
/// pageless analysis result); everything downstream recovers locally, so a
/// partial best-effort plan always beats aborting the document.
#[tracing::instrument(skip(analysis, steps, config))]
pub fn build_plan(
    analysis: &AnalysisResult,
    steps: &[NarrationStep],
    config: &PlanConfig,
) -> DocmotionResult<PresentationPlan> {
    config.validate()?;
    let page = analysis.primary_page()?.to_page_size()?;

    let elements = analysis.collect_elements();
    let bounds = build_bounds_cache(
        &elements,
        page,
        config.viewport,
        config.scale,
        config.page_origin,
    );
    tracing::debug!(
        elements = elements.len(),
        resolved = bounds.len(),
        "normalized element bounds",
    );

    let sections = group_sections(&elements, &bounds, &config.taxonomy, config.proximity_px);
    let highlights = align_steps(steps, &elements, &bounds, config.viewport, config.align);
    let review: Vec<usize> = highlights
        .iter()
        .filter(|h| h.needs_review)
        .map(|h| h.step_index)
        .collect();
    if !review.is_empty() {
        tracing::warn!(count = review.len(), "steps flagged for manual review");
    }

    let timeline = build_timeline(&highlights, steps, config)?;

    Ok(PresentationPlan {
        timeline,
        highlights,
        sections,
        review,
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
