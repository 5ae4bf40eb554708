//! Turns the model's loosely typed JSON into an [`ExtractedRecord`].
//!
//! Nothing here fails. A field that is missing, mistyped or out of range
//! becomes `None` or an empty list; keys the model invents are ignored.

use serde_json::{Map, Value};

use crate::models::{ExtractedRecord, PlanType, CONFIDENCE_HIGH};

pub const KEY_AGES: &str = "idades";
pub const KEY_CARRIER: &str = "operadora";
pub const KEY_PLAN_VALUE: &str = "valor_atual";
pub const KEY_PLAN_TYPE: &str = "tipo_plano";
pub const KEY_BENEFICIARIES: &str = "nome_beneficiarios";
pub const KEY_PARTNERS: &str = "socios_detectados";
pub const KEY_PARTNER_COUNT: &str = "total_socios";
pub const KEY_NOTES: &str = "observacoes";

static NULL: Value = Value::Null;

pub fn normalize(raw: &Value) -> ExtractedRecord {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);
    let field = |key: &str| fields.get(key).unwrap_or(&NULL);

    let detected_partners = names(field(KEY_PARTNERS));
    let partner_count = partner_count(field(KEY_PARTNER_COUNT))
        .or_else(|| derived_partner_count(&detected_partners));

    ExtractedRecord {
        ages: ages(field(KEY_AGES)),
        carrier: carrier(field(KEY_CARRIER)),
        plan_value: plan_value(field(KEY_PLAN_VALUE)),
        plan_type: plan_type(field(KEY_PLAN_TYPE)),
        beneficiary_names: names(field(KEY_BENEFICIARIES)),
        detected_partners,
        partner_count,
        notes: notes(field(KEY_NOTES)),
        confidence: CONFIDENCE_HIGH.to_string(),
        ..ExtractedRecord::default()
    }
}

/// Whole, non-negative numbers and all-digit strings; anything else is dropped.
pub fn ages(value: &Value) -> Vec<u32> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items.iter().filter_map(age).collect()
}

fn age(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(whole) = n.as_u64() {
                u32::try_from(whole).ok()
            } else if let Some(float) = n.as_f64() {
                // 12.0 is an age, 12.5 and negatives are not.
                let whole = float.is_finite() && float >= 0.0 && float.fract() == 0.0;
                whole.then(|| float as u64).and_then(|w| u32::try_from(w).ok())
            } else {
                None
            }
        }
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    }
}

pub fn carrier(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    let carrier = stringify(value).to_uppercase().trim().to_string();
    (!carrier.is_empty()).then_some(carrier)
}

/// Decimal with a comma accepted as the separator, rounded to cents.
pub fn plan_value(value: &Value) -> Option<f64> {
    if !is_truthy(value) {
        return None;
    }
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.replace(',', ".").trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then(|| round_cents(parsed))
}

fn round_cents(value: f64) -> f64 {
    let cents = value * 100.0;
    // Near f64::MAX the scaled value overflows; such values have no fraction left anyway.
    if cents.is_finite() {
        cents.round() / 100.0
    } else {
        value
    }
}

pub fn plan_type(value: &Value) -> Option<PlanType> {
    if !is_truthy(value) {
        return None;
    }
    PlanType::from_literal(&stringify(value).to_uppercase())
}

/// Trimmed, non-empty entries of a list of names.
pub fn names(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| is_truthy(item))
        .map(|item| stringify(item).trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// A positive integer, given as a number or a string.
pub fn partner_count(value: &Value) -> Option<u32> {
    let count = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    u32::try_from(count).ok().filter(|count| *count > 0)
}

fn derived_partner_count(partners: &[String]) -> Option<u32> {
    if partners.is_empty() {
        return None;
    }
    u32::try_from(partners.len()).ok()
}

pub fn notes(value: &Value) -> Option<String> {
    is_truthy(value).then(|| stringify(value))
}

/// Emptiness in the JSON sense: null, false, 0, "", [] and {} are all falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
