// Import necessary modules from external crates.
use serde::Serialize;
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter};

use crate::consts::{DEFAULT_ATTRIBUTE_VALUE, DEFAULT_DC, DEFAULT_SKILL_RANK};
use crate::ruleset::Ruleset;

/// A single step applied to an attribute, skill rank or DC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Increment,
    Decrement,
}

impl Delta {
    pub fn value(self) -> i64 {
        match self {
            Delta::Increment => 1,
            Delta::Decrement => -1,
        }
    }
}

// The recorded outcome of the last skill check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillCheckResult {
    pub roll: i64,
    pub success: bool,
}

// A configured ability check. `result` stays None until an outcome is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCheck {
    pub skill: String,
    #[serde(rename = "DC")]
    pub dc: i64,
    pub result: Option<SkillCheckResult>,
}

// Rows of the skill check, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum CheckField {
    #[strum(to_string = "Check skill")]
    Skill,
    #[strum(to_string = "DC")]
    Dc,
    #[strum(to_string = "Result")]
    Result,
}

/// A character as stored remotely. The serialized form is exactly the
/// record posted to the roster endpoint; sorted maps keep its key order stable
/// between saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    pub attributes: BTreeMap<String, i64>,
    pub skills: BTreeMap<String, i64>,
    #[serde(rename = "selectedClass")]
    pub selected_class: Option<String>,
    #[serde(rename = "skillCheck")]
    pub skill_check: SkillCheck,
}

/// Ability modifier derived from an attribute value: floor((value - 10) / 2).
/// Saturates for remote values near the ends of the `i64` range.
pub fn modifier(value: i64) -> i64 {
    value.saturating_sub(DEFAULT_ATTRIBUTE_VALUE).div_euclid(2)
}

impl SkillCheck {
    pub fn new(ruleset: &Ruleset) -> Self {
        Self {
            skill: ruleset.default_skill().to_string(),
            dc: DEFAULT_DC,
            result: None,
        }
    }

    // Moves to the neighbouring skill, wrapping at both ends. A skill name
    // unknown to the ruleset restarts from the first skill.
    pub fn cycle_skill(&mut self, ruleset: &Ruleset, delta: Delta) {
        let count = ruleset.skills.len();
        if count == 0 {
            return;
        }
        let next = match ruleset.skill_index(&self.skill) {
            Some(index) => match delta {
                Delta::Increment => (index + 1) % count,
                Delta::Decrement => (index + count - 1) % count,
            },
            None => 0,
        };
        self.skill = ruleset.skills[next].name.clone();
    }

    // Returns false when the DC would drop below zero.
    pub fn adjust_dc(&mut self, delta: Delta) -> bool {
        let Some(dc) = self.dc.checked_add(delta.value()).filter(|dc| *dc >= 0) else {
            return false;
        };
        self.dc = dc;
        true
    }

    pub fn record(&mut self, roll: i64, success: bool) {
        self.result = Some(SkillCheckResult { roll, success });
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }
}

// Implementation of methods for the Character struct.
impl Character {
    // Fresh character: every attribute at 10, every skill at 0, no class.
    pub fn new(ruleset: &Ruleset) -> Self {
        Self {
            attributes: ruleset
                .attributes
                .iter()
                .map(|name| (name.clone(), DEFAULT_ATTRIBUTE_VALUE))
                .collect(),
            skills: ruleset
                .skills
                .iter()
                .map(|skill| (skill.name.clone(), DEFAULT_SKILL_RANK))
                .collect(),
            selected_class: None,
            skill_check: SkillCheck::new(ruleset),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<i64> {
        self.attributes.get(name).copied()
    }

    pub fn skill_rank(&self, name: &str) -> Option<i64> {
        self.skills.get(name).copied()
    }

    // Summed wide and clamped: loaded records may carry any i64.
    pub fn total_points(&self) -> i64 {
        let total: i128 = self.attributes.values().map(|value| i128::from(*value)).sum();
        total.clamp(i64::MIN.into(), i64::MAX.into()) as i64
    }

    pub fn remaining_points(&self, ruleset: &Ruleset) -> i64 {
        ruleset.max_points.saturating_sub(self.total_points())
    }

    pub fn attribute_modifier(&self, name: &str) -> Option<i64> {
        self.attribute(name).map(modifier)
    }

    // Rank plus the modifier of the governing attribute.
    pub fn skill_total(&self, ruleset: &Ruleset, name: &str) -> Option<i64> {
        let rank = self.skill_rank(name)?;
        let bonus = ruleset
            .skill(name)
            .and_then(|skill| self.attribute_modifier(&skill.attribute))
            .unwrap_or(0);
        Some(rank.saturating_add(bonus))
    }

    /// Applies the point-allocation rule for one step on one attribute.
    ///
    /// Returns the edited copy, or `None` when the step is rejected: the
    /// attribute is not part of the ruleset, the value would go negative, or
    /// the total would exceed `max_points`. Rejection is inert, not an error.
    pub fn modify_attribute(
        &self,
        ruleset: &Ruleset,
        attribute: &str,
        delta: Delta,
    ) -> Option<Character> {
        if !ruleset.has_attribute(attribute) {
            return None;
        }
        let current = self.attribute(attribute).unwrap_or(DEFAULT_ATTRIBUTE_VALUE);
        let step = delta.value();
        let value = current.checked_add(step).filter(|value| *value >= 0)?;
        if self.total_points().saturating_add(step) > ruleset.max_points {
            return None;
        }
        let mut updated = self.clone();
        updated.attributes.insert(attribute.to_string(), value);
        Some(updated)
    }

    pub fn increment(&self, ruleset: &Ruleset, attribute: &str) -> Option<Character> {
        self.modify_attribute(ruleset, attribute, Delta::Increment)
    }

    pub fn decrement(&self, ruleset: &Ruleset, attribute: &str) -> Option<Character> {
        self.modify_attribute(ruleset, attribute, Delta::Decrement)
    }

    // Skill ranks are outside the point budget; they only have to stay >= 0.
    pub fn adjust_skill(&self, ruleset: &Ruleset, skill: &str, delta: Delta) -> Option<Character> {
        if !ruleset.has_skill(skill) {
            return None;
        }
        let rank = self
            .skill_rank(skill)
            .unwrap_or(DEFAULT_SKILL_RANK)
            .checked_add(delta.value())
            .filter(|rank| *rank >= 0)?;
        let mut updated = self.clone();
        updated.skills.insert(skill.to_string(), rank);
        Some(updated)
    }

    // Steps through unselected -> first class -> ... -> last class -> unselected.
    pub fn cycle_class(&self, ruleset: &Ruleset, delta: Delta) -> Character {
        // Position 0 is "unselected", class i sits at i + 1.
        let slots = ruleset.classes.len() + 1;
        let current = self
            .selected_class
            .as_deref()
            .and_then(|name| ruleset.class_index(name))
            .map_or(0, |index| index + 1);
        let next = match delta {
            Delta::Increment => (current + 1) % slots,
            Delta::Decrement => (current + slots - 1) % slots,
        };
        let mut updated = self.clone();
        updated.selected_class = next
            .checked_sub(1)
            .map(|index| ruleset.classes[index].clone());
        updated
    }
}
