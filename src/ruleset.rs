// ruleset.rs

use crate::consts::{ATTRIBUTE_LIST, CLASS_LIST, MAX_POINTS, SKILL_LIST};

/// A skill known to the ruleset. The governing attribute only feeds the
/// displayed skill total; it never affects the point budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillDefinition {
    pub name: String,
    pub attribute: String,
}

impl SkillDefinition {
    pub fn new(name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: attribute.into(),
        }
    }
}

/// Immutable configuration the character core is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    pub max_points: i64,
    pub attributes: Vec<String>,
    pub classes: Vec<String>,
    pub skills: Vec<SkillDefinition>,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            max_points: MAX_POINTS,
            attributes: ATTRIBUTE_LIST.iter().map(|name| name.to_string()).collect(),
            classes: CLASS_LIST.iter().map(|name| name.to_string()).collect(),
            skills: SKILL_LIST
                .iter()
                .map(|(name, attribute)| SkillDefinition::new(*name, *attribute))
                .collect(),
        }
    }
}

impl Ruleset {
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attribute| attribute == name)
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skill(name).is_some()
    }

    pub fn skill(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    pub fn skill_index(&self, name: &str) -> Option<usize> {
        self.skills.iter().position(|skill| skill.name == name)
    }

    pub fn class_index(&self, name: &str) -> Option<usize> {
        self.classes.iter().position(|class| class == name)
    }

    // Skill checks default to the first skill; an empty skill list yields "".
    pub fn default_skill(&self) -> &str {
        self.skills
            .first()
            .map(|skill| skill.name.as_str())
            .unwrap_or_default()
    }
}
