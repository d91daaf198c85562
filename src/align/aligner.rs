use std::collections::BTreeSet;

use crate::align::similarity::{exact_normalized, normalize_text, score_normalized, token_set};
use crate::analysis::model::{Element, ElementId};
use crate::foundation::core::{PxBox, Viewport};
use crate::narration::NarrationStep;
use crate::normalize::pass::BoundsCache;

/// Placeholder boxes stack outside the right viewport edge, one slot per
/// step, so consecutive unresolved steps never collide.
const PLACEHOLDER_MARGIN: f64 = 24.0;
const PLACEHOLDER_STRIDE: f64 = 40.0;
const PLACEHOLDER_WIDTH: f64 = 180.0;
const PLACEHOLDER_HEIGHT: f64 = 28.0;

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
/// Tuning knobs for narration alignment.
pub struct AlignParams {
    /// Minimum similarity for a non-exact best match to be accepted.
    pub accept_threshold: f64,
    /// Minimum similarity for a neighbor to join the merged highlight.
    pub merge_threshold: f64,
    /// Neighbor count above which the merge is abandoned; a very large
    /// cluster usually signals an overly generic keyword, not a genuine
    /// multi-fragment phrase.
    pub merge_cap: usize,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            accept_threshold: 0.5,
            merge_threshold: 0.7,
            merge_cap: 5,
        }
    }
}

impl AlignParams {
    pub fn validate(&self) -> crate::foundation::error::DocmotionResult<()> {
        for (name, v) in [
            ("accept_threshold", self.accept_threshold),
            ("merge_threshold", self.merge_threshold),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(crate::foundation::error::DocmotionError::validation(
                    format!("{name} must be in [0, 1], got {v}"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// The box a narration step should visually emphasize.
///
/// Exactly one per step, in step order. When no candidate cleared the
/// acceptance bar, `needs_review` is set, `matched` is empty and the box
/// is a deterministic off-document placeholder, never an omission: the
/// timeline must always have something to animate to.
pub struct AlignedHighlight {
    /// 0-based index into the step list.
    pub step_index: usize,
    /// Highlight box in canonical pixels.
    pub pixel_box: PxBox,
    /// Elements consumed by this step.
    pub matched: Vec<ElementId>,
    /// Set when automatic alignment failed and a placeholder substituted.
    pub needs_review: bool,
}

/// Deterministic placeholder for an unresolved step.
pub fn placeholder_box(step_index: usize, viewport: Viewport) -> PxBox {
    PxBox::new(
        viewport.width_px() + PLACEHOLDER_MARGIN,
        PLACEHOLDER_MARGIN + step_index as f64 * PLACEHOLDER_STRIDE,
        PLACEHOLDER_WIDTH,
        PLACEHOLDER_HEIGHT,
    )
}

struct Candidate {
    id: ElementId,
    norm_text: String,
    px_box: PxBox,
}

/// Aligns every narration step to the best-matching document elements.
///
/// Steps are processed in order with a no-reuse constraint: an element
/// consumed by an earlier step is excluded from later candidates, so the
/// same small fragment cannot light up for two different steps. Candidates
/// are ranked by exact match, then keyword overlap, then similarity score.
/// An accepted match absorbs nearby high-scoring fragments on the same
/// approximate row into one merged box.
#[tracing::instrument(skip(steps, elements, bounds))]
pub fn align_steps(
    steps: &[NarrationStep],
    elements: &[Element],
    bounds: &BoundsCache,
    viewport: Viewport,
    params: AlignParams,
) -> Vec<AlignedHighlight> {
    let candidates: Vec<Candidate> = elements
        .iter()
        .filter_map(|e| {
            bounds.get(e.id).map(|px_box| Candidate {
                id: e.id,
                norm_text: normalize_text(&e.text),
                px_box,
            })
        })
        .collect();

    let mut consumed: BTreeSet<ElementId> = BTreeSet::new();
    let mut out = Vec::with_capacity(steps.len());

    for (step_index, step) in steps.iter().enumerate() {
        let query = normalize_text(&step.highlight_text);
        match best_candidate(&query, &candidates, &consumed, params) {
            Some(best) => {
                let merged = merge_window(best, &query, &candidates, &consumed, params);
                let pixel_box = merged
                    .iter()
                    .map(|c| c.px_box)
                    .reduce(PxBox::union)
                    .unwrap_or(best.px_box);
                let matched: Vec<ElementId> = merged.iter().map(|c| c.id).collect();
                consumed.extend(matched.iter().copied());
                out.push(AlignedHighlight {
                    step_index,
                    pixel_box,
                    matched,
                    needs_review: false,
                });
            }
            None => {
                tracing::warn!(
                    step = step.step_number,
                    highlight = %step.highlight_text,
                    "no element cleared the acceptance threshold",
                );
                out.push(AlignedHighlight {
                    step_index,
                    pixel_box: placeholder_box(step_index, viewport),
                    matched: Vec::new(),
                    needs_review: true,
                });
            }
        }
    }

    out
}

/// Picks the acceptable top-ranked unconsumed candidate, if any.
///
/// Ranking is (exact, keyword overlap, score) descending; candidates are
/// visited in id order so ties resolve to the earliest document element.
fn best_candidate<'a>(
    query: &str,
    candidates: &'a [Candidate],
    consumed: &BTreeSet<ElementId>,
    params: AlignParams,
) -> Option<&'a Candidate> {
    let query_tokens = token_set(query);
    let mut best: Option<(&Candidate, (bool, bool, f64))> = None;

    for cand in candidates {
        if consumed.contains(&cand.id) {
            continue;
        }
        let score = score_normalized(query, &cand.norm_text);
        let exact = exact_normalized(query, &cand.norm_text);
        let keyword = token_set(&cand.norm_text)
            .intersection(&query_tokens)
            .next()
            .is_some();
        let rank = (exact, keyword, score);
        let better = match &best {
            Some((_, r)) => rank > *r,
            None => true,
        };
        if better {
            best = Some((cand, rank));
        }
    }

    let (cand, (exact, _, score)) = best?;
    let acceptable =
        !cand.norm_text.is_empty() && cand.px_box.area() > 0.0 && (exact || score > params.accept_threshold);
    acceptable.then_some(cand)
}

/// Gathers the best match plus unconsumed neighbors on the same
/// approximate row whose similarity also clears the merge bar. If more
/// than the cap qualify, the merge collapses back to the single best
/// match.
fn merge_window<'a>(
    best: &'a Candidate,
    query: &str,
    candidates: &'a [Candidate],
    consumed: &BTreeSet<ElementId>,
    params: AlignParams,
) -> Vec<&'a Candidate> {
    let mut extras: Vec<&Candidate> = Vec::new();
    for cand in candidates {
        if cand.id == best.id || consumed.contains(&cand.id) {
            continue;
        }
        let qualifies = exact_normalized(query, &cand.norm_text)
            || score_normalized(query, &cand.norm_text) > params.merge_threshold;
        if qualifies && same_row(best.px_box, cand.px_box) && near_column(best.px_box, cand.px_box)
        {
            extras.push(cand);
        }
    }

    if extras.len() > params.merge_cap {
        extras.clear();
    }

    let mut merged = vec![best];
    merged.extend(extras);
    merged
}

/// Vertical centers within half the taller box's height.
fn same_row(a: PxBox, b: PxBox) -> bool {
    (a.center().y - b.center().y).abs() <= a.height.max(b.height) * 0.5
}

/// Horizontal gap no wider than the wider of the two boxes.
fn near_column(a: PxBox, b: PxBox) -> bool {
    let gap = (a.x.max(b.x) - (a.x + a.width).min(b.x + b.width)).max(0.0);
    gap <= a.width.max(b.width)
}

#[cfg(test)]
#[path = "../../tests/unit/align/aligner.rs"]
mod tests;
