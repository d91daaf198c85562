use super::*;

fn region(points: &[(f64, f64)]) -> BoundingRegion {
    BoundingRegion {
        polygon: points.iter().map(|&(x, y)| PolyPoint { x, y }).collect(),
        unit: None,
        origin: None,
        page_number: Some(1),
    }
}

fn quad(x: f64, y: f64, w: f64, h: f64) -> BoundingRegion {
    region(&[(x, y), (x + w, y), (x + w, y + h), (x, y + h)])
}

#[test]
fn collect_assigns_ids_in_document_order() {
    let result = AnalysisResult {
        pages: vec![],
        paragraphs: vec![AnalyzedParagraph {
            content: "intro".to_string(),
            confidence: Some(0.9),
            bounding_regions: vec![quad(0.1, 0.1, 0.2, 0.05)],
        }],
        tables: vec![AnalyzedTable {
            row_count: 1,
            column_count: 2,
            cells: vec![
                AnalyzedCell {
                    row_index: 0,
                    column_index: 0,
                    content: "a".to_string(),
                    confidence: None,
                    bounding_regions: vec![],
                },
                AnalyzedCell {
                    row_index: 0,
                    column_index: 1,
                    content: "b".to_string(),
                    confidence: None,
                    bounding_regions: vec![],
                },
            ],
            bounding_regions: vec![],
        }],
        key_value_pairs: vec![AnalyzedKeyValue {
            key: AnalyzedFragment {
                content: "Member Name".to_string(),
                bounding_regions: vec![quad(0.1, 0.3, 0.1, 0.02)],
            },
            value: Some(AnalyzedFragment {
                content: "John Doe".to_string(),
                bounding_regions: vec![quad(0.25, 0.3, 0.1, 0.02)],
            }),
            confidence: None,
        }],
    };

    let elements = result.collect_elements();
    assert_eq!(elements.len(), 5);
    assert_eq!(
        elements.iter().map(|e| e.id.0).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
    assert_eq!(elements[0].kind, ElementKind::Paragraph);
    assert_eq!(
        elements[1].kind,
        ElementKind::Table {
            row_count: 1,
            column_count: 2
        }
    );
    assert_eq!(elements[1].text, "a b");
    assert_eq!(
        elements[2].kind,
        ElementKind::TableCell {
            row_index: 0,
            column_index: 0
        }
    );
}

#[test]
fn key_value_text_joins_both_sides() {
    let result = AnalysisResult {
        key_value_pairs: vec![AnalyzedKeyValue {
            key: AnalyzedFragment {
                content: "Total Due".to_string(),
                bounding_regions: vec![quad(0.1, 0.5, 0.1, 0.02)],
            },
            value: Some(AnalyzedFragment {
                content: "$120.27".to_string(),
                bounding_regions: vec![quad(0.25, 0.5, 0.08, 0.02)],
            }),
            confidence: Some(0.8),
        }],
        ..AnalysisResult::default()
    };

    let elements = result.collect_elements();
    assert_eq!(elements[0].text, "Total Due: $120.27");
    assert_eq!(elements[0].confidence, 0.8);
    // Both sides share a unit, so the primary region spans the whole pair.
    assert_eq!(elements[0].regions.len(), 1);
    assert_eq!(elements[0].regions[0].polygon.len(), 8);
}

#[test]
fn key_value_without_value_keeps_key_text() {
    let result = AnalysisResult {
        key_value_pairs: vec![AnalyzedKeyValue {
            key: AnalyzedFragment {
                content: "Signature".to_string(),
                bounding_regions: vec![quad(0.1, 0.9, 0.2, 0.02)],
            },
            value: None,
            confidence: None,
        }],
        ..AnalysisResult::default()
    };

    let elements = result.collect_elements();
    assert_eq!(elements[0].text, "Signature");
    assert_eq!(elements[0].regions.len(), 1);
}

#[test]
fn element_kind_serializes_tagged() {
    let kind = ElementKind::TableCell {
        row_index: 2,
        column_index: 3,
    };
    let json = serde_json::to_value(&kind).unwrap();
    assert_eq!(json["kind"], "TableCell");
    assert_eq!(json["row_index"], 2);

    let back: ElementKind = serde_json::from_value(json).unwrap();
    assert_eq!(back, kind);
}

#[test]
fn primary_page_requires_pages() {
    let empty = AnalysisResult::default();
    assert!(empty.primary_page().is_err());
}

#[test]
fn page_size_conversion_rejects_normalized() {
    let page = PageInfo {
        page_number: 1,
        width: 8.5,
        height: 11.0,
        unit: RegionUnit::Inches,
    };
    let size = page.to_page_size().unwrap();
    assert_eq!(size.width_pt, 612.0);

    let bad = PageInfo {
        page_number: 1,
        width: 1.0,
        height: 1.0,
        unit: RegionUnit::Normalized,
    };
    assert!(bad.to_page_size().is_err());
}
