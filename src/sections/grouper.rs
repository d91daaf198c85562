use std::collections::BTreeMap;

use crate::analysis::model::{Element, ElementId};
use crate::foundation::core::PxBox;
use crate::normalize::pass::BoundsCache;
use crate::sections::taxonomy::Taxonomy;

/// Minimum keyword-hit ratio for an element to join a section.
const KEYWORD_SCORE_FLOOR: f64 = 0.3;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Spatially coherent cluster of a section's elements.
pub struct SubSection {
    /// Member element ids.
    pub elements: Vec<ElementId>,
    /// Union of the members' boxes.
    pub bounding_box: Option<PxBox>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Semantic grouping of elements under one taxonomy entry.
///
/// `bounding_box` is the union of all member boxes, or `None` for an empty
/// section. `sub_sections` partition `elements` by vertical proximity so a
/// keyword that recurs in a header and a footnote does not merge into one
/// box spanning the whole page; callers pick the relevant cluster.
pub struct Section {
    /// Taxonomy key.
    pub key: String,
    /// Human-readable name.
    pub display_name: String,
    /// Display color as a hex string.
    pub color: String,
    /// Member element ids in id order.
    pub elements: Vec<ElementId>,
    /// Union of member boxes.
    pub bounding_box: Option<PxBox>,
    /// Vertical-proximity clusters covering `elements` exactly once.
    pub sub_sections: Vec<SubSection>,
}

/// Ratio of taxonomy keywords found as case-insensitive substrings.
fn keyword_score(text_lower: &str, keywords: &[String]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let hits = keywords
        .iter()
        .filter(|kw| text_lower.contains(kw.to_lowercase().as_str()))
        .count();
    hits as f64 / keywords.len() as f64
}

/// Classifies elements into taxonomy sections.
///
/// Each element joins the first section (in taxonomy declaration order)
/// whose keyword score exceeds the floor; the fixed order is the tie-break
/// that keeps output deterministic across runs. Elements matching no entry
/// are simply invisible to the output, and elements without a resolved box
/// carry no usable geometry, so they are skipped the same way. Every
/// taxonomy entry appears in the returned map, empty or not.
#[tracing::instrument(skip(elements, bounds, taxonomy))]
pub fn group_sections(
    elements: &[Element],
    bounds: &BoundsCache,
    taxonomy: &Taxonomy,
    proximity_px: f64,
) -> BTreeMap<String, Section> {
    let mut sections: BTreeMap<String, Section> = taxonomy
        .sections
        .iter()
        .map(|spec| {
            (
                spec.key.clone(),
                Section {
                    key: spec.key.clone(),
                    display_name: spec.display_name.clone(),
                    color: spec.color.clone(),
                    elements: Vec::new(),
                    bounding_box: None,
                    sub_sections: Vec::new(),
                },
            )
        })
        .collect();

    for element in elements {
        if bounds.get(element.id).is_none() {
            continue;
        }
        let text_lower = element.text.to_lowercase();
        for spec in &taxonomy.sections {
            if keyword_score(&text_lower, &spec.keywords) > KEYWORD_SCORE_FLOOR {
                if let Some(section) = sections.get_mut(&spec.key) {
                    section.elements.push(element.id);
                }
                break;
            }
        }
    }

    for section in sections.values_mut() {
        section.bounding_box = union_of(&section.elements, bounds);
        section.sub_sections = cluster_by_vertical_gap(&section.elements, bounds, proximity_px);
        tracing::debug!(
            key = %section.key,
            members = section.elements.len(),
            clusters = section.sub_sections.len(),
        );
    }

    sections
}

fn union_of(ids: &[ElementId], bounds: &BoundsCache) -> Option<PxBox> {
    ids.iter()
        .filter_map(|id| bounds.get(*id))
        .reduce(PxBox::union)
}

/// Splits members into clusters wherever the gap between consecutive
/// vertical centers exceeds the proximity threshold.
fn cluster_by_vertical_gap(
    ids: &[ElementId],
    bounds: &BoundsCache,
    proximity_px: f64,
) -> Vec<SubSection> {
    let mut ordered: Vec<(ElementId, PxBox)> = ids
        .iter()
        .filter_map(|id| bounds.get(*id).map(|b| (*id, b)))
        .collect();
    ordered.sort_by(|a, b| {
        a.1.center()
            .y
            .total_cmp(&b.1.center().y)
            .then(a.0.cmp(&b.0))
    });

    let mut clusters = Vec::new();
    let mut current: Vec<(ElementId, PxBox)> = Vec::new();
    let mut prev_y = f64::NEG_INFINITY;
    for (id, px_box) in ordered {
        let y = px_box.center().y;
        if !current.is_empty() && y - prev_y > proximity_px {
            clusters.push(finish_cluster(std::mem::take(&mut current)));
        }
        current.push((id, px_box));
        prev_y = y;
    }
    if !current.is_empty() {
        clusters.push(finish_cluster(current));
    }
    clusters
}

fn finish_cluster(members: Vec<(ElementId, PxBox)>) -> SubSection {
    let bounding_box = members.iter().map(|(_, b)| *b).reduce(PxBox::union);
    SubSection {
        elements: members.into_iter().map(|(id, _)| id).collect(),
        bounding_box,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/grouper.rs"]
mod tests;
