//! Report data model.
//!
//! The input schema for a vehicle condition report. Every field is optional
//! or defaultable: an empty JSON object is a valid (blank) report, and
//! sections with no data simply never reach the layout stage.

pub mod builder;

pub use builder::build_commands;

use serde::{Deserialize, Serialize};

use crate::layout::PageGeometry;

/// A complete condition report as submitted by the inspection workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub metadata: Metadata,
    pub page: PageGeometry,
    pub title: Option<String>,
    /// Issue date, preformatted by the caller (e.g. "12/03/2024").
    pub date: Option<String>,
    /// Protocol or case number for traceability.
    pub protocol: Option<String>,
    pub vehicle: Vehicle,
    pub synthesis: Synthesis,
    pub components: Vec<ComponentAssessment>,
}

/// Document metadata carried through to the output file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vehicle {
    pub brand: Option<String>,
    pub model: Option<String>,
    /// Model year, free-form to allow "2019/2020" style values.
    pub year: Option<String>,
    pub plate: Option<String>,
    pub fuel: Option<String>,
    /// Market value as display text, e.g. "R$ 89.990".
    pub market_value: Option<String>,
}

/// The inspection synthesis: aggregated findings across the whole vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Synthesis {
    pub repaint_locations: Vec<String>,
    pub filler_putty_locations: Vec<String>,
    pub alignment_issues: Vec<String>,
    pub glass_replacements: Vec<String>,
    pub lower_structure_ok: Option<bool>,
    pub lower_structure_note: Option<String>,
    /// Free-text closing summary, rendered as the report footer.
    pub summary: Option<String>,
    /// Final risk classification, e.g. "Reparo estético".
    pub classification: Option<String>,
}

/// One inspected component and its verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentAssessment {
    pub name: String,
    pub status: String,
    pub note: Option<String>,
}

/// Largest price not above `value` whose digit root is 8, the traditional
/// "charm price" used by resellers. Values below 8 can never reach the root
/// and are returned unchanged.
pub fn suggested_asking_price(value: u64) -> u64 {
    if value < 8 {
        return value;
    }
    let mut price = value;
    // Digit roots cycle through 1..=9, so this loops at most 9 times.
    while digit_root(price) != 8 {
        price -= 1;
    }
    price
}

fn digit_root(mut n: u64) -> u64 {
    while n >= 10 {
        let mut sum = 0;
        while n > 0 {
            sum += n % 10;
            n /= 10;
        }
        n = sum;
    }
    n
}

/// Extracts the integer amount from a display price. Centavo suffixes after
/// a comma are dropped; text without digits yields `None`.
pub(crate) fn parse_amount(text: &str) -> Option<u64> {
    let integer_part = text.split(',').next().unwrap_or(text);
    let digits: String = integer_part
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Formats an amount as pt-BR currency text with dot-grouped thousands.
pub(crate) fn format_brl(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("R$ {}", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_a_valid_blank_report() {
        let report: Report = serde_json::from_str("{}").unwrap();
        assert_eq!(report, Report::default());
        assert!(report.title.is_none());
        assert!(report.components.is_empty());
    }

    #[test]
    fn test_parses_camel_case_fields() {
        let json = r#"{
            "title": "Laudo Cautelar",
            "vehicle": { "marketValue": "R$ 89.990", "plate": "BRA2E19" },
            "synthesis": {
                "fillerPuttyLocations": ["coluna traseira esquerda"],
                "lowerStructureOk": true
            },
            "components": [
                { "name": "Para-brisa", "status": "Substituído" }
            ]
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.vehicle.market_value.as_deref(), Some("R$ 89.990"));
        assert_eq!(
            report.synthesis.filler_putty_locations,
            vec!["coluna traseira esquerda"]
        );
        assert_eq!(report.synthesis.lower_structure_ok, Some(true));
        assert_eq!(report.components[0].status, "Substituído");
        assert!(report.components[0].note.is_none());
    }

    #[test]
    fn test_suggested_asking_price_walks_down_to_digit_root_eight() {
        assert_eq!(suggested_asking_price(45000), 44999); // 4+4+9+9+9 = 35 -> 8
        assert_eq!(suggested_asking_price(44998), 44990);
        assert_eq!(suggested_asking_price(100), 98);
        assert_eq!(suggested_asking_price(89990), 89990); // already at root 8
    }

    #[test]
    fn test_suggested_asking_price_small_values_unchanged() {
        assert_eq!(suggested_asking_price(8), 8);
        assert_eq!(suggested_asking_price(7), 7);
        assert_eq!(suggested_asking_price(0), 0);
    }

    #[test]
    fn test_parse_amount_strips_formatting() {
        assert_eq!(parse_amount("R$ 89.990"), Some(89990));
        assert_eq!(parse_amount("R$ 45.000,00"), Some(45000));
        assert_eq!(parse_amount("1200"), Some(1200));
        assert_eq!(parse_amount("a combinar"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn test_format_brl_groups_thousands() {
        assert_eq!(format_brl(89990), "R$ 89.990");
        assert_eq!(format_brl(1000), "R$ 1.000");
        assert_eq!(format_brl(998), "R$ 998");
        assert_eq!(format_brl(1234567), "R$ 1.234.567");
    }
}
