//! docmotion turns the structured output of a document-analysis pass plus
//! a narration script into a deterministic, pixel-accurate presentation
//! plan: viewport keyframes (pan, zoom, opacity) and highlight regions a
//! renderer plays back in sync with narration audio.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: raw polygon regions (ambiguous unit and origin) ->
//!    canonical pixel boxes anchored to a known viewport
//! 2. **Group**: elements -> semantic sections via keyword scoring and
//!    vertical proximity clustering
//! 3. **Align**: narration steps -> highlight boxes via fuzzy text
//!    matching with a no-reuse constraint and flagged placeholders
//! 4. **Build**: aligned steps -> a monotonic, non-overlapping keyframe
//!    timeline
//!
//! All four passes are pure, synchronous, single-threaded transformations
//! over immutable inputs. There is no fatal error path inside the pipeline
//! proper: malformed regions are dropped, unresolved alignments are
//! flagged, empty sections stay queryable. A partial best-effort plan is
//! strictly preferable to aborting a document's presentation.
#![forbid(unsafe_code)]

mod align;
mod analysis;
mod config;
mod foundation;
mod narration;
mod normalize;
mod pipeline;
mod sections;
mod timeline;

pub use align::aligner::{AlignParams, AlignedHighlight, align_steps, placeholder_box};
pub use align::similarity::{normalize_text, similarity};
pub use analysis::model::{
    AnalysisResult, AnalyzedCell, AnalyzedFragment, AnalyzedKeyValue, AnalyzedParagraph,
    AnalyzedTable, BoundingRegion, Element, ElementId, ElementKind, PageInfo, PolyPoint,
};
pub use config::PlanConfig;
pub use foundation::core::{
    Fps, POINTS_PER_INCH, PageOrigin, PageSize, Point, PxBox, Rect, RegionUnit, Viewport,
};
pub use foundation::error::{DocmotionError, DocmotionResult};
pub use narration::NarrationStep;
pub use normalize::pass::{
    BoundsCache, build_bounds_cache, detect_unit, effective_unit, flip_region_y, normalize_region,
};
pub use pipeline::{PresentationPlan, build_plan};
pub use sections::grouper::{Section, SubSection, group_sections};
pub use sections::taxonomy::{SectionSpec, Taxonomy};
pub use timeline::builder::{auto_zoom, build_timeline, center_on};
pub use timeline::ease::Ease;
pub use timeline::model::{HighlightKind, Keyframe, PresentationTimeline, TimelineEntry};
pub use timeline::sampler::{ViewportState, sample};
