// consts.rs

// Total attribute points a character may distribute.
pub const MAX_POINTS: i64 = 70;

pub const DEFAULT_ATTRIBUTE_VALUE: i64 = 10;
pub const DEFAULT_SKILL_RANK: i64 = 0;
pub const DEFAULT_DC: i64 = 10;

pub const ATTRIBUTE_LIST: [&str; 6] = [
    "Strength",
    "Dexterity",
    "Constitution",
    "Intelligence",
    "Wisdom",
    "Charisma",
];

pub const CLASS_LIST: [&str; 3] = ["Barbarian", "Wizard", "Bard"];

// (skill name, governing attribute)
pub const SKILL_LIST: [(&str, &str); 18] = [
    ("Acrobatics", "Dexterity"),
    ("Animal Handling", "Wisdom"),
    ("Arcana", "Intelligence"),
    ("Athletics", "Strength"),
    ("Deception", "Charisma"),
    ("History", "Intelligence"),
    ("Insight", "Wisdom"),
    ("Intimidation", "Charisma"),
    ("Investigation", "Intelligence"),
    ("Medicine", "Wisdom"),
    ("Nature", "Intelligence"),
    ("Perception", "Wisdom"),
    ("Performance", "Charisma"),
    ("Persuasion", "Charisma"),
    ("Religion", "Intelligence"),
    ("Sleight of Hand", "Dexterity"),
    ("Stealth", "Dexterity"),
    ("Survival", "Wisdom"),
];

pub const API_URL: &str = "http://localhost:8080/api/characters";

// Overrides the configured endpoint when set and non-empty.
pub const API_URL_ENV: &str = "CHARACTER_FORGE_API_URL";

// Field of the GET response object that holds the character array.
pub const PAYLOAD_FIELD: &str = "body";
