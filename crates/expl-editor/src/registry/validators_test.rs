use super::{BaseRuleSpecValidator, InteractionValidator, InteractiveMapValidator, ValidatorRegistry};
use expl_core::{RuleSpec, Warning, WarningType};
use serde_json::{json, Map, Value};

fn within(distance: f64, dest: &str) -> RuleSpec {
    RuleSpec {
        definition: json!({"rule_type": "atomic", "name": "Within", "inputs": {"d": distance, "p": [0, 0]}}),
        dest: dest.to_string(),
        feedback: vec!["Close!".to_string()],
        param_changes: Vec::new(),
    }
}

fn map_args(latitude: f64, longitude: f64) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("latitude".to_string(), json!({"value": latitude}));
    args.insert("longitude".to_string(), json!({"value": longitude}));
    args
}

fn messages(warnings: &[Warning]) -> Vec<&str> {
    warnings.iter().map(|w| w.message.as_str()).collect()
}

#[test]
fn base_validator_requires_default_rule_last() {
    let rules = vec![RuleSpec::default_rule("B"), within(1.0, "C")];
    let warnings = BaseRuleSpecValidator.validate("A", &Map::new(), &rules);
    assert_eq!(warnings, vec![Warning::critical("the last rule should be the default rule.")]);
}

#[test]
fn base_validator_flags_silent_self_loops() {
    let mut silent = within(1.0, "A");
    silent.feedback.clear();
    let rules = vec![silent, RuleSpec::default_rule("A")];
    let warnings = BaseRuleSpecValidator.validate("A", &Map::new(), &rules);
    assert_eq!(
        messages(&warnings),
        vec![
            "please specify what should happen in rule 1.",
            "please add a rule to cover what should happen in the general case.",
        ]
    );
    assert!(warnings.iter().all(|w| w.warning_type == WarningType::Error));
}

#[test]
fn base_validator_accepts_well_formed_rules() {
    let rules = vec![within(1.0, "A"), RuleSpec::default_rule("B")];
    assert!(BaseRuleSpecValidator.validate("A", &Map::new(), &rules).is_empty());
    assert!(BaseRuleSpecValidator.validate("A", &Map::new(), &[]).is_empty());
}

#[test]
fn interactive_map_checks_coordinates_and_distances() {
    let rules = vec![within(-2.0, "B"), RuleSpec::default_rule("B")];
    let warnings = InteractiveMapValidator.validate("A", &map_args(91.0, -181.0), &rules);
    assert_eq!(
        messages(&warnings),
        vec![
            "please pick a starting latitude between -90 and 90.",
            "please pick a starting longitude between -180 and 180.",
            "please ensure that all the rules refer to valid distances.",
        ]
    );
    assert!(warnings.iter().all(Warning::is_critical));
}

#[test]
fn interactive_map_reports_each_negative_distance_rule() {
    let mut not_within = within(-1.0, "C");
    not_within.definition["name"] = json!("NotWithin");
    let rules = vec![within(-1.0, "B"), not_within, RuleSpec::default_rule("A")];
    let warnings = InteractiveMapValidator.validate("A", &map_args(0.0, 0.0), &rules);
    let distance_warnings = warnings
        .iter()
        .filter(|w| w.message == "please ensure that all the rules refer to valid distances.")
        .count();
    assert_eq!(distance_warnings, 2);
}

#[test]
fn interactive_map_appends_base_warnings() {
    let rules = vec![within(2.0, "B"), within(3.0, "B")];
    let warnings = InteractiveMapValidator.validate("A", &map_args(10.0, 20.0), &rules);
    assert_eq!(messages(&warnings), vec!["the last rule should be the default rule."]);
}

#[test]
fn registry_falls_back_to_base_validator() {
    let registry = ValidatorRegistry::default();
    let rules = vec![within(-2.0, "B"), RuleSpec::default_rule("B")];
    assert!(registry
        .validate("TextInput", "A", &Map::new(), &rules)
        .is_empty());
    assert_eq!(
        registry
            .validate("InteractiveMap", "A", &map_args(0.0, 0.0), &rules)
            .len(),
        1
    );
    assert_eq!(registry.registered_ids().collect::<Vec<_>>(), vec!["InteractiveMap"]);
}

struct AlwaysWarn;

impl InteractionValidator for AlwaysWarn {
    fn validate(&self, _: &str, _: &Map<String, Value>, _: &[RuleSpec]) -> Vec<Warning> {
        vec![Warning::error("custom")]
    }
}

#[test]
fn registered_validator_replaces_fallback_for_its_id() {
    let mut registry = ValidatorRegistry::default();
    registry.register("TextInput", Box::new(AlwaysWarn));
    assert_eq!(
        registry.validate("TextInput", "A", &Map::new(), &[]),
        vec![Warning::error("custom")]
    );
}
