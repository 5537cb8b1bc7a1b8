//! Coercion of free-text form fields into numeric assumptions

use super::Assumptions;
use serde::{Deserialize, Deserializer, Serialize};

/// Parse user-entered text the forgiving way a calculator form does.
///
/// Everything except digits, `.` and `-` is stripped (so `"$1,250.50"` reads
/// as 1250.5), then the longest numeric prefix is parsed. Text with no
/// leading number reads as 0.
pub fn parse_number(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let bytes = cleaned.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut digits = 0;
    let mut seen_dot = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return 0.0;
    }

    match cleaned[..end].trim_end_matches('.').parse::<f64>() {
        // -0 reads as plain 0
        Ok(value) if value == 0.0 => 0.0,
        Ok(value) => value,
        Err(_) => 0.0,
    }
}

/// The nine calculator fields exactly as typed. Each field may arrive as
/// JSON text or a number; a missing or null field reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInputs {
    #[serde(deserialize_with = "text_or_number")]
    pub purchase_price: String,
    #[serde(deserialize_with = "text_or_number")]
    pub monthly_rent: String,
    #[serde(deserialize_with = "text_or_number")]
    pub down_payment_pct: String,
    #[serde(deserialize_with = "text_or_number")]
    pub interest_rate: String,
    #[serde(deserialize_with = "text_or_number")]
    pub opex_pct: String,
    #[serde(deserialize_with = "text_or_number")]
    pub appreciation_rate: String,
    #[serde(deserialize_with = "text_or_number")]
    pub rent_growth: String,
    #[serde(alias = "loanTerm", deserialize_with = "text_or_number")]
    pub loan_term_years: String,
    #[serde(alias = "sellingCost", deserialize_with = "text_or_number")]
    pub selling_cost_pct: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Number(f64),
}

/// Numbers are kept in their shortest round-trip decimal form
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<FieldValue>::deserialize(deserializer)? {
        Some(FieldValue::Text(text)) => text,
        Some(FieldValue::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

impl RawInputs {
    pub fn to_assumptions(&self) -> Assumptions {
        Assumptions {
            purchase_price: parse_number(&self.purchase_price),
            monthly_rent: parse_number(&self.monthly_rent),
            down_payment_pct: parse_number(&self.down_payment_pct),
            interest_rate: parse_number(&self.interest_rate),
            opex_pct: parse_number(&self.opex_pct),
            appreciation_rate: parse_number(&self.appreciation_rate),
            rent_growth: parse_number(&self.rent_growth),
            loan_term_years: parse_number(&self.loan_term_years),
            selling_cost_pct: parse_number(&self.selling_cost_pct),
        }
    }
}
