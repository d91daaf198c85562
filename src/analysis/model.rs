use crate::foundation::core::{PageOrigin, PageSize, RegionUnit};
use crate::foundation::error::{DocmotionError, DocmotionResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One vertex of a bounding polygon, in the region's own unit.
pub struct PolyPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Raw polygon region as emitted by the document-analysis service.
///
/// Immutable input. The unit and origin are optional because some services
/// do not declare them; absent values are resolved by the normalizer.
pub struct BoundingRegion {
    /// Polygon vertices; a well-formed region has at least four.
    pub polygon: Vec<PolyPoint>,
    /// Declared coordinate unit, if the service reports one.
    #[serde(default)]
    pub unit: Option<RegionUnit>,
    /// Declared page origin corner, if the service reports one.
    #[serde(default)]
    pub origin: Option<PageOrigin>,
    /// 1-based page the region belongs to.
    #[serde(default)]
    pub page_number: Option<u32>,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Stable per-run element identifier, assigned in document order.
pub struct ElementId(pub u32);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
/// Discriminates extracted content units; payload fields exist only for
/// the kinds that carry them.
pub enum ElementKind {
    /// Free-standing text paragraph.
    Paragraph,
    /// Whole table; its cells are separate elements.
    Table {
        /// Number of rows.
        row_count: u32,
        /// Number of columns.
        column_count: u32,
    },
    /// Single table cell.
    TableCell {
        /// 0-based row.
        row_index: u32,
        /// 0-based column.
        column_index: u32,
    },
    /// Key/value pair; the key text is kept for lookups.
    KeyValuePair {
        /// Key side of the pair.
        key: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One extracted content unit, flattened from the analysis result.
///
/// Created once per analysis pass and never mutated; the pipeline owns the
/// list for the lifetime of one document-processing run.
pub struct Element {
    /// Stable id in document order.
    pub id: ElementId,
    /// Extracted text content.
    pub text: String,
    /// Service confidence in `[0, 1]`.
    pub confidence: f64,
    /// Bounding regions; the first is primary.
    pub regions: Vec<BoundingRegion>,
    /// Kind tag with per-kind payload.
    pub kind: ElementKind,
}

impl Element {
    /// First region, the one the normalizer anchors the element to.
    pub fn primary_region(&self) -> Option<&BoundingRegion> {
        self.regions.first()
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Per-page dimensions as reported by the analysis service.
pub struct PageInfo {
    /// 1-based page number.
    pub page_number: u32,
    /// Page width in `unit`.
    pub width: f64,
    /// Page height in `unit`.
    pub height: f64,
    /// Unit the page dimensions are expressed in.
    pub unit: RegionUnit,
}

impl PageInfo {
    /// Converts the reported dimensions to points.
    ///
    /// Normalized page dimensions are meaningless and rejected; this is a
    /// caller-side precondition, not a recoverable anomaly.
    pub fn to_page_size(&self) -> DocmotionResult<PageSize> {
        match self.unit {
            RegionUnit::Inches => Ok(PageSize::from_inches(self.width, self.height)),
            RegionUnit::Points => Ok(PageSize::new(self.width, self.height)),
            RegionUnit::Normalized => Err(DocmotionError::validation(
                "page dimensions cannot be normalized fractions",
            )),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Extracted paragraph as it appears in the service payload.
pub struct AnalyzedParagraph {
    /// Paragraph text.
    pub content: String,
    /// Service confidence; absent means unreported.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Anchoring regions.
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Extracted table cell as it appears in the service payload.
pub struct AnalyzedCell {
    /// 0-based row.
    pub row_index: u32,
    /// 0-based column.
    pub column_index: u32,
    /// Cell text.
    pub content: String,
    /// Service confidence; absent means unreported.
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Anchoring regions.
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Extracted table as it appears in the service payload.
pub struct AnalyzedTable {
    /// Number of rows.
    pub row_count: u32,
    /// Number of columns.
    pub column_count: u32,
    /// Cells in service order.
    pub cells: Vec<AnalyzedCell>,
    /// Anchoring regions for the table as a whole.
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Text fragment with its own regions (key or value side of a pair).
pub struct AnalyzedFragment {
    /// Fragment text.
    pub content: String,
    /// Anchoring regions.
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Extracted key/value pair as it appears in the service payload.
pub struct AnalyzedKeyValue {
    /// Key side.
    pub key: AnalyzedFragment,
    /// Value side; some keys are extracted without a value.
    #[serde(default)]
    pub value: Option<AnalyzedFragment>,
    /// Service confidence; absent means unreported.
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Structured output of one document-analysis pass.
///
/// This crate never calls the analysis service; it only consumes this
/// shape, deserialized from the service response.
pub struct AnalysisResult {
    /// Per-page dimensions; the first page anchors normalization.
    #[serde(default)]
    pub pages: Vec<PageInfo>,
    /// Extracted paragraphs.
    #[serde(default)]
    pub paragraphs: Vec<AnalyzedParagraph>,
    /// Extracted tables with their cells.
    #[serde(default)]
    pub tables: Vec<AnalyzedTable>,
    /// Extracted key/value pairs.
    #[serde(default)]
    pub key_value_pairs: Vec<AnalyzedKeyValue>,
}

impl AnalysisResult {
    /// Page that anchors normalization; errors when the result has none.
    pub fn primary_page(&self) -> DocmotionResult<&PageInfo> {
        self.pages
            .first()
            .ok_or_else(|| DocmotionError::validation("analysis result has no pages"))
    }

    /// Flattens the per-kind payload lists into one element list with
    /// stable ids: paragraphs, then each table followed by its cells in
    /// service order, then key/value pairs.
    pub fn collect_elements(&self) -> Vec<Element> {
        let mut out = Vec::new();
        let mut next_id = 0u32;
        let mut id = || {
            let v = ElementId(next_id);
            next_id += 1;
            v
        };

        for p in &self.paragraphs {
            out.push(Element {
                id: id(),
                text: p.content.clone(),
                confidence: p.confidence.unwrap_or(1.0),
                regions: p.bounding_regions.clone(),
                kind: ElementKind::Paragraph,
            });
        }

        for t in &self.tables {
            out.push(Element {
                id: id(),
                text: t
                    .cells
                    .iter()
                    .map(|c| c.content.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                confidence: 1.0,
                regions: t.bounding_regions.clone(),
                kind: ElementKind::Table {
                    row_count: t.row_count,
                    column_count: t.column_count,
                },
            });
            for c in &t.cells {
                out.push(Element {
                    id: id(),
                    text: c.content.clone(),
                    confidence: c.confidence.unwrap_or(1.0),
                    regions: c.bounding_regions.clone(),
                    kind: ElementKind::TableCell {
                        row_index: c.row_index,
                        column_index: c.column_index,
                    },
                });
            }
        }

        for kv in &self.key_value_pairs {
            out.push(Element {
                id: id(),
                text: match &kv.value {
                    Some(v) if !v.content.is_empty() => {
                        format!("{}: {}", kv.key.content, v.content)
                    }
                    _ => kv.key.content.clone(),
                },
                confidence: kv.confidence.unwrap_or(1.0),
                regions: join_pair_regions(&kv.key, kv.value.as_ref()),
                kind: ElementKind::KeyValuePair {
                    key: kv.key.content.clone(),
                },
            });
        }

        out
    }
}

/// Builds the region list for a key/value element. When both sides carry a
/// primary region in the same unit their polygons are concatenated, so the
/// element's primary box spans the whole pair; otherwise the key side wins.
fn join_pair_regions(
    key: &AnalyzedFragment,
    value: Option<&AnalyzedFragment>,
) -> Vec<BoundingRegion> {
    let Some(key_region) = key.bounding_regions.first() else {
        return value
            .map(|v| v.bounding_regions.clone())
            .unwrap_or_default();
    };
    let Some(value_region) = value.and_then(|v| v.bounding_regions.first()) else {
        return key.bounding_regions.clone();
    };

    if key_region.unit == value_region.unit && key_region.page_number == value_region.page_number {
        let mut polygon = key_region.polygon.clone();
        polygon.extend_from_slice(&value_region.polygon);
        vec![BoundingRegion {
            polygon,
            unit: key_region.unit,
            origin: key_region.origin,
            page_number: key_region.page_number,
        }]
    } else {
        key.bounding_regions.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/model.rs"]
mod tests;
