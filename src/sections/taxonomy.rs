use crate::foundation::error::{DocmotionError, DocmotionResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One entry of the section taxonomy.
///
/// Declaration order matters: elements are assigned to the first entry
/// whose keyword score clears the floor, so earlier entries win ties.
pub struct SectionSpec {
    /// Stable section key.
    pub key: String,
    /// Human-readable name for UI filtering.
    pub display_name: String,
    /// Display color as a hex string.
    pub color: String,
    /// Ordered keyword list matched as case-insensitive substrings.
    pub keywords: Vec<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Ordered section taxonomy, externally supplied so the pipeline can be
/// retargeted to a different document type without code changes.
pub struct Taxonomy {
    /// Entries in declaration (priority) order.
    pub sections: Vec<SectionSpec>,
}

impl Taxonomy {
    pub fn validate(&self) -> DocmotionResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for spec in &self.sections {
            if spec.key.is_empty() {
                return Err(DocmotionError::validation("taxonomy key must be non-empty"));
            }
            if !seen.insert(spec.key.as_str()) {
                return Err(DocmotionError::validation(format!(
                    "duplicate taxonomy key '{}'",
                    spec.key
                )));
            }
            if spec.keywords.is_empty() {
                return Err(DocmotionError::validation(format!(
                    "taxonomy entry '{}' has no keywords",
                    spec.key
                )));
            }
        }
        Ok(())
    }
}

impl Default for Taxonomy {
    /// Stock taxonomy tuned for statement-like documents.
    fn default() -> Self {
        fn spec(key: &str, display_name: &str, color: &str, keywords: &[&str]) -> SectionSpec {
            SectionSpec {
                key: key.to_string(),
                display_name: display_name.to_string(),
                color: color.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }

        Self {
            sections: vec![
                spec(
                    "member",
                    "Member Information",
                    "#4f9dff",
                    &["member", "name", "account", "customer", "holder"],
                ),
                spec(
                    "financial",
                    "Financial Details",
                    "#36c275",
                    &["total", "due", "amount", "balance", "payment", "charge"],
                ),
                spec(
                    "dates",
                    "Dates & Deadlines",
                    "#f2a33c",
                    &["date", "period", "effective", "expiration"],
                ),
                spec(
                    "contact",
                    "Contact Information",
                    "#b07cf7",
                    &["phone", "email", "address", "contact"],
                ),
                spec(
                    "summary",
                    "Summary",
                    "#e25f73",
                    &["summary", "overview", "statement", "notice"],
                ),
            ],
        }
    }
}
