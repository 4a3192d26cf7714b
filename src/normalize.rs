//! Defensive decoding of remote character records.
//!
//! Remote data is untrusted: every field is inspected explicitly and falls
//! back to its default when absent or of the wrong type. Only the keys named by
//! the [`Ruleset`] survive, so the output never carries extra attributes or
//! skills and never misses one.

use serde_json::Value;

use crate::character::{Character, SkillCheck, SkillCheckResult};
use crate::consts::{DEFAULT_ATTRIBUTE_VALUE, DEFAULT_DC, DEFAULT_SKILL_RANK};
use crate::ruleset::Ruleset;

/// Decodes an arbitrary JSON value into a fully populated [`Character`].
///
/// This never fails. `null`, arrays, scalars and objects with the wrong field
/// types all decode to a character whose unusable fields hold their defaults.
pub fn normalize(data: &Value, ruleset: &Ruleset) -> Character {
    let attributes = data.get("attributes");
    let skills = data.get("skills");

    Character {
        attributes: ruleset
            .attributes
            .iter()
            .map(|name| {
                let value = integer(attributes.and_then(|map| map.get(name)));
                (name.clone(), value.unwrap_or(DEFAULT_ATTRIBUTE_VALUE))
            })
            .collect(),
        skills: ruleset
            .skills
            .iter()
            .map(|skill| {
                let rank = integer(skills.and_then(|map| map.get(&skill.name)));
                (skill.name.clone(), rank.unwrap_or(DEFAULT_SKILL_RANK))
            })
            .collect(),
        selected_class: data
            .get("selectedClass")
            .and_then(Value::as_str)
            .map(str::to_string),
        skill_check: skill_check(data.get("skillCheck"), ruleset),
    }
}

pub fn normalize_all(records: &[Value], ruleset: &Ruleset) -> Vec<Character> {
    records
        .iter()
        .map(|record| normalize(record, ruleset))
        .collect()
}

fn skill_check(check: Option<&Value>, ruleset: &Ruleset) -> SkillCheck {
    SkillCheck {
        skill: field(check, "skill")
            .and_then(Value::as_str)
            .unwrap_or(ruleset.default_skill())
            .to_string(),
        dc: integer(field(check, "DC")).unwrap_or(DEFAULT_DC),
        result: field(check, "result").and_then(check_result),
    }
}

fn field<'a>(record: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    record.and_then(|record| record.get(name))
}

// Only a record with a numeric roll and a boolean success is kept.
fn check_result(result: &Value) -> Option<SkillCheckResult> {
    let roll = integer(result.get("roll"))?;
    let success = result.get("success").and_then(Value::as_bool)?;
    Some(SkillCheckResult { roll, success })
}

// Integral JSON numbers only. Floats count when they carry no fraction and
// fit in an i64; anything else falls back to the caller's default.
fn integer(value: Option<&Value>) -> Option<i64> {
    let Value::Number(number) = value? else {
        return None;
    };
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|float| {
                float.is_finite()
                    && float.fract() == 0.0
                    && *float >= i64::MIN as f64
                    && *float < i64::MAX as f64
            })
            .map(|float| float as i64)
    })
}
