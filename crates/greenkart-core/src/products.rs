use serde::{Deserialize, Serialize};

/// Name used when the product database returns no usable product name.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// Upstream letter grade to display grade. Ordered best to worst.
const GRADE_TABLE: [(&str, &str); 5] = [
    ("a", "A+"),
    ("b", "A"),
    ("c", "B"),
    ("d", "C"),
    ("e", "D"),
];

/// A product as the rest of the application sees it.
///
/// Built fresh on every lookup and never mutated afterwards. `eco_score`
/// always holds a display grade (see [`remap_grade`]); the raw upstream
/// letter never leaves the lookup crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub brand: Option<String>,
    /// Front image URL exactly as upstream reports it. Not validated.
    pub image_url: Option<String>,
    /// Comma-separated category list, kept verbatim.
    pub categories: Option<String>,
    pub eco_score: Option<String>,
}

/// Maps an upstream eco-score letter to its display grade.
///
/// `a..e` (any case) map through the fixed table `a→A+, b→A, c→B, d→C, e→D`.
/// Anything else is returned uppercased and otherwise unchanged.
#[must_use]
pub fn remap_grade(raw: &str) -> String {
    let lower = raw.to_lowercase();
    GRADE_TABLE
        .iter()
        .find(|(upstream, _)| *upstream == lower)
        .map_or_else(|| raw.to_uppercase(), |(_, display)| (*display).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_grade_known_letters() {
        assert_eq!(remap_grade("a"), "A+");
        assert_eq!(remap_grade("b"), "A");
        assert_eq!(remap_grade("c"), "B");
        assert_eq!(remap_grade("d"), "C");
        assert_eq!(remap_grade("e"), "D");
    }

    #[test]
    fn remap_grade_is_case_insensitive_on_known_letters() {
        assert_eq!(remap_grade("A"), "A+");
        assert_eq!(remap_grade("E"), "D");
    }

    #[test]
    fn remap_grade_uppercases_unknown_values() {
        assert_eq!(remap_grade("x"), "X");
        assert_eq!(remap_grade("unknown"), "UNKNOWN");
        assert_eq!(remap_grade("not-applicable"), "NOT-APPLICABLE");
    }

    #[test]
    fn remap_grade_preserves_quality_order() {
        let displays: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|g| remap_grade(g))
            .collect();
        assert_eq!(displays, vec!["A+", "A", "B", "C", "D"]);
    }

    #[test]
    fn product_record_serializes_camel_case() {
        let record = ProductRecord {
            name: "Test Soap".to_string(),
            brand: None,
            image_url: Some("https://images.example/soap.jpg".to_string()),
            categories: None,
            eco_score: Some("A".to_string()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["imageUrl"], "https://images.example/soap.jpg");
        assert_eq!(json["ecoScore"], "A");
    }
}
