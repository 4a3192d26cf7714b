// ../tests/tests.rs
use character_forge::gateway::extract_records;
use character_forge::*;
use serde_json::{Value, json};
use std::fs;

fn short_ruleset() -> Ruleset {
    Ruleset {
        max_points: 70,
        attributes: ["STR", "DEX", "CON", "INT", "WIS", "CHA"]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        classes: vec!["Barbarian".to_string(), "Wizard".to_string()],
        skills: vec![
            SkillDefinition::new("Athletics", "STR"),
            SkillDefinition::new("Stealth", "DEX"),
        ],
    }
}

fn assert_exact_keys(character: &Character, ruleset: &Ruleset) {
    assert_eq!(character.attributes.len(), ruleset.attributes.len());
    for name in &ruleset.attributes {
        assert!(character.attributes.contains_key(name), "missing {name}");
    }
    assert_eq!(character.skills.len(), ruleset.skills.len());
    for skill in &ruleset.skills {
        assert!(character.skills.contains_key(&skill.name), "missing {}", skill.name);
    }
}

#[test]
fn test_new_character_defaults() {
    let ruleset = Ruleset::default();
    let character = Character::new(&ruleset);

    assert_exact_keys(&character, &ruleset);
    assert!(character.attributes.values().all(|value| *value == 10));
    assert!(character.skills.values().all(|rank| *rank == 0));
    assert_eq!(character.selected_class, None);
    assert_eq!(character.skill_check.skill, "Acrobatics");
    assert_eq!(character.skill_check.dc, 10);
    assert_eq!(character.skill_check.result, None);
    assert_eq!(character.total_points(), 60);
    assert_eq!(character.remaining_points(&ruleset), 10);
}

#[test]
fn test_increments_stop_at_max_points() {
    let ruleset = Ruleset::default();
    let mut character = Character::new(&ruleset);

    for step in 1..=10 {
        character = character
            .increment(&ruleset, "Strength")
            .unwrap_or_else(|| panic!("increment {step} should be accepted"));
    }
    assert_eq!(character.attribute("Strength"), Some(20));
    assert_eq!(character.total_points(), ruleset.max_points);

    for attribute in &ruleset.attributes {
        assert_eq!(character.increment(&ruleset, attribute), None);
    }
    // Freeing a point elsewhere makes room again.
    let lowered = character.decrement(&ruleset, "Wisdom").expect("decrement");
    assert!(lowered.increment(&ruleset, "Charisma").is_some());
}

#[test]
fn test_decrement_at_zero_is_rejected() {
    let ruleset = Ruleset::default();
    let mut character = Character::new(&ruleset);
    for _ in 0..10 {
        character = character.decrement(&ruleset, "Dexterity").expect("decrement");
    }
    assert_eq!(character.attribute("Dexterity"), Some(0));
    assert_eq!(character.decrement(&ruleset, "Dexterity"), None);
    assert_eq!(character.attribute("Dexterity"), Some(0));
}

#[test]
fn test_valid_edit_changes_exactly_one_attribute() {
    let ruleset = Ruleset::default();
    let character = Character::new(&ruleset);

    for attribute in &ruleset.attributes {
        for delta in [Delta::Increment, Delta::Decrement] {
            let edited = character
                .modify_attribute(&ruleset, attribute, delta)
                .expect("edit within budget");
            assert_eq!(edited.total_points(), character.total_points() + delta.value());
            let changed: Vec<&String> = ruleset
                .attributes
                .iter()
                .filter(|name| edited.attributes[*name] != character.attributes[*name])
                .collect();
            assert_eq!(changed, vec![attribute]);
            assert_eq!(edited.skills, character.skills);
            assert_eq!(edited.skill_check, character.skill_check);
        }
    }
}

#[test]
fn test_unknown_attribute_is_inert() {
    let ruleset = Ruleset::default();
    let character = Character::new(&ruleset);
    assert_eq!(character.increment(&ruleset, "Luck"), None);
    assert_eq!(character.decrement(&ruleset, "strength"), None);
}

#[test]
fn test_modifier_floors() {
    assert_eq!(modifier(10), 0);
    assert_eq!(modifier(11), 0);
    assert_eq!(modifier(12), 1);
    assert_eq!(modifier(9), -1);
    assert_eq!(modifier(8), -1);
    assert_eq!(modifier(7), -2);
    assert_eq!(modifier(0), -5);
    assert_eq!(modifier(20), 5);
}

#[test]
fn test_skill_ranks_and_totals() {
    let ruleset = Ruleset::default();
    let character = Character::new(&ruleset)
        .increment(&ruleset, "Dexterity")
        .and_then(|c| c.increment(&ruleset, "Dexterity"))
        .expect("within budget");

    let trained = character
        .adjust_skill(&ruleset, "Stealth", Delta::Increment)
        .expect("rank up");
    assert_eq!(trained.skill_rank("Stealth"), Some(1));
    // Skills sit outside the point budget.
    assert_eq!(trained.total_points(), character.total_points());
    assert_eq!(trained.skill_total(&ruleset, "Stealth"), Some(2));
    assert_eq!(trained.skill_total(&ruleset, "Athletics"), Some(0));

    assert_eq!(character.adjust_skill(&ruleset, "Stealth", Delta::Decrement), None);
    assert_eq!(character.adjust_skill(&ruleset, "Cooking", Delta::Increment), None);
}

#[test]
fn test_class_cycles_through_unselected() {
    let ruleset = Ruleset::default();
    let character = Character::new(&ruleset);

    let mut seen = Vec::new();
    let mut current = character.clone();
    for _ in 0..=ruleset.classes.len() {
        current = current.cycle_class(&ruleset, Delta::Increment);
        seen.push(current.selected_class.clone());
    }
    assert_eq!(
        seen,
        vec![
            Some("Barbarian".to_string()),
            Some("Wizard".to_string()),
            Some("Bard".to_string()),
            None
        ]
    );

    let last = character.cycle_class(&ruleset, Delta::Decrement);
    assert_eq!(last.selected_class.as_deref(), Some("Bard"));
}

#[test]
fn test_skill_check_editing() {
    let ruleset = Ruleset::default();
    let mut check = SkillCheck::new(&ruleset);

    check.cycle_skill(&ruleset, Delta::Decrement);
    assert_eq!(check.skill, "Survival");
    check.cycle_skill(&ruleset, Delta::Increment);
    assert_eq!(check.skill, "Acrobatics");

    for _ in 0..10 {
        assert!(check.adjust_dc(Delta::Decrement));
    }
    assert!(!check.adjust_dc(Delta::Decrement));
    assert_eq!(check.dc, 0);

    check.record(17, true);
    assert_eq!(check.result, Some(SkillCheckResult { roll: 17, success: true }));
    check.clear_result();
    assert_eq!(check.result, None);
}

#[test]
fn test_serialized_shape() {
    let ruleset = short_ruleset();
    let mut character = Character::new(&ruleset);
    character.skill_check.record(12, false);

    let value = serde_json::to_value(&character).expect("serialize");
    assert_eq!(
        value,
        json!({
            "attributes": {"STR": 10, "DEX": 10, "CON": 10, "INT": 10, "WIS": 10, "CHA": 10},
            "skills": {"Athletics": 0, "Stealth": 0},
            "selectedClass": null,
            "skillCheck": {"skill": "Athletics", "DC": 10, "result": {"roll": 12, "success": false}}
        })
    );
}

#[test]
fn test_serialized_key_order_is_stable() {
    let ruleset = Ruleset::default();
    let character = Character::new(&ruleset)
        .increment(&ruleset, "Wisdom")
        .expect("increment");

    let first = serde_json::to_string(&character).expect("serialize");
    let copy = normalize(&serde_json::from_str(&first).expect("parse"), &ruleset);
    assert_eq!(serde_json::to_string(&copy).expect("serialize"), first);

    let position = |key: &str| first.find(&format!("\"{key}\"")).expect(key);
    assert!(position("Charisma") < position("Dexterity"));
    assert!(position("Dexterity") < position("Wisdom"));
    assert!(position("Acrobatics") < position("Survival"));
}

#[test]
fn test_normalize_is_total() {
    let ruleset = Ruleset::default();
    let inputs = [
        json!({}),
        Value::Null,
        json!([]),
        json!([{"attributes": {"Strength": 12}}]),
        json!("character"),
        json!(42),
        json!(true),
        json!({"attributes": [1, 2, 3], "skills": "none", "skillCheck": []}),
        json!({"attributes": {"Strength": {"value": 12}}, "skillCheck": {"result": "won"}}),
        json!({"skillCheck": {"DC": null, "result": {"roll": 3}}}),
        json!({"skillCheck": {"result": {"success": true}}}),
    ];

    for input in inputs {
        let character = normalize(&input, &ruleset);
        assert_exact_keys(&character, &ruleset);
        assert_eq!(character.skill_check.result, None, "input {input}");
        assert_eq!(character.skill_check.dc, 10, "input {input}");
    }
}

#[test]
fn test_normalize_defaults_wrong_types() {
    let ruleset = short_ruleset();
    let payload = json!({"body": [{"attributes": {"STR": "ten"}}]});
    let records = extract_records(payload).expect("array payload");
    assert_eq!(records.len(), 1);

    let character = normalize(&records[0], &ruleset);
    assert_eq!(character.attribute("STR"), Some(10));
    assert!(character.attributes.values().all(|value| *value == 10));
    assert!(character.skills.values().all(|rank| *rank == 0));
    assert_eq!(character.selected_class, None);
    assert_eq!(character.skill_check.skill, "Athletics");
    assert_eq!(character, Character::new(&ruleset));
}

#[test]
fn test_normalize_numbers() {
    let ruleset = short_ruleset();
    let character = normalize(
        &json!({
            "attributes": {"STR": 12.0, "DEX": 11.5, "CON": -3, "INT": 1e300},
            "skillCheck": {"DC": 14.0, "result": {"roll": 9.0, "success": false}}
        }),
        &ruleset,
    );
    assert_eq!(character.attribute("STR"), Some(12));
    assert_eq!(character.attribute("DEX"), Some(10));
    assert_eq!(character.attribute("CON"), Some(-3));
    assert_eq!(character.attribute("INT"), Some(10));
    assert_eq!(character.skill_check.dc, 14);
    assert_eq!(
        character.skill_check.result,
        Some(SkillCheckResult { roll: 9, success: false })
    );
}

#[test]
fn test_extreme_values_saturate() {
    let ruleset = short_ruleset();
    let huge = normalize(
        &json!({
            "attributes": {"STR": i64::MAX, "DEX": 12},
            "skills": {"Athletics": i64::MAX},
            "skillCheck": {"DC": i64::MAX}
        }),
        &ruleset,
    );
    assert_eq!(huge.total_points(), i64::MAX);
    assert_eq!(huge.remaining_points(&ruleset), 70 - i64::MAX);
    assert_eq!(huge.skill_total(&ruleset, "Athletics"), Some(i64::MAX));
    assert_eq!(huge.increment(&ruleset, "DEX"), None);
    assert_eq!(huge.increment(&ruleset, "STR"), None);
    assert_eq!(huge.adjust_skill(&ruleset, "Athletics", Delta::Increment), None);
    let mut check = huge.skill_check.clone();
    assert!(!check.adjust_dc(Delta::Increment));
    assert_eq!(check.dc, i64::MAX);

    let tiny = normalize(
        &json!({"attributes": {"STR": i64::MIN, "DEX": i64::MIN}}),
        &ruleset,
    );
    assert_eq!(tiny.attribute_modifier("STR"), Some(i64::MIN / 2));
    assert_eq!(tiny.total_points(), i64::MIN);
    assert_eq!(tiny.remaining_points(&ruleset), i64::MAX);
    assert_eq!(tiny.decrement(&ruleset, "STR"), None);
    assert_eq!(modifier(i64::MAX), (i64::MAX - 10) / 2);
}

#[test]
fn test_normalize_fixture() {
    let json_str = fs::read_to_string("tests/dummy_remote_roster.json")
        .expect("Failed to read dummy remote roster JSON file");
    let payload: Value = serde_json::from_str(&json_str).expect("Failed to parse JSON");
    let records = extract_records(payload).expect("array payload");
    let ruleset = Ruleset::default();
    let roster: Vec<Character> = records
        .iter()
        .map(|record| normalize(record, &ruleset))
        .collect();

    assert_eq!(roster.len(), 4);

    let barbarian = &roster[0];
    assert_exact_keys(barbarian, &ruleset);
    assert_eq!(barbarian.attribute("Strength"), Some(14));
    assert_eq!(barbarian.attribute("Wisdom"), Some(13));
    assert!(!barbarian.attributes.contains_key("Luck"));
    assert_eq!(barbarian.skill_rank("Athletics"), Some(3));
    assert_eq!(barbarian.skill_rank("Arcana"), Some(0));
    assert!(!barbarian.skills.contains_key("Cooking"));
    assert_eq!(barbarian.selected_class.as_deref(), Some("Barbarian"));
    assert_eq!(barbarian.skill_check.skill, "Athletics");
    assert_eq!(barbarian.skill_check.dc, 15);
    assert_eq!(
        barbarian.skill_check.result,
        Some(SkillCheckResult { roll: 17, success: true })
    );

    for broken in &roster[1..] {
        assert_eq!(broken, &Character::new(&ruleset));
    }
}

#[test]
fn test_normalize_round_trip() {
    let ruleset = Ruleset::default();
    let fresh = Character::new(&ruleset);

    let mut edited = fresh
        .increment(&ruleset, "Strength")
        .and_then(|c| c.decrement(&ruleset, "Charisma"))
        .and_then(|c| c.adjust_skill(&ruleset, "Arcana", Delta::Increment))
        .expect("valid edits")
        .cycle_class(&ruleset, Delta::Increment);
    edited.skill_check.cycle_skill(&ruleset, Delta::Increment);
    edited.skill_check.adjust_dc(Delta::Increment);
    edited.skill_check.record(15, true);

    for character in [fresh, edited] {
        let serialized = serde_json::to_string(&character).expect("serialize");
        let value: Value = serde_json::from_str(&serialized).expect("parse");
        assert_eq!(normalize(&value, &ruleset), character);
    }
}

#[test]
fn test_extract_records_rejects_other_shapes() {
    for payload in [
        json!({"body": "not an array"}),
        json!({"body": {"0": {}}}),
        json!({"data": []}),
        json!([{}]),
        Value::Null,
    ] {
        assert!(
            matches!(extract_records(payload.clone()), Err(GatewayError::MalformedPayload(_))),
            "payload {payload} should be rejected"
        );
    }
}
