use expl_core::{RuleSpec, Warning};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Checks one interaction's customization args and rules. Messages are
/// written relative to the state; the warnings engine adds the state prefix.
pub trait InteractionValidator {
    fn validate(
        &self,
        state_name: &str,
        customization_args: &Map<String, Value>,
        rule_specs: &[RuleSpec],
    ) -> Vec<Warning>;
}

/// Rule checks shared by every interaction: the last rule must be the
/// default rule, and a rule that loops back without feedback leaves the
/// learner stuck.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseRuleSpecValidator;

impl BaseRuleSpecValidator {
    pub fn rule_spec_warnings(state_name: &str, rule_specs: &[RuleSpec]) -> Vec<Warning> {
        let Some((last, others)) = rule_specs.split_last() else {
            return Vec::new();
        };

        let mut warnings = Vec::new();
        for (index, rule_spec) in others.iter().enumerate() {
            if rule_spec.dest == state_name && rule_spec.feedback.is_empty() {
                warnings.push(Warning::error(format!(
                    "please specify what should happen in rule {}.",
                    index + 1
                )));
            }
        }

        if !last.is_default_rule() {
            warnings.push(Warning::critical("the last rule should be the default rule."));
        } else if last.dest == state_name && last.feedback.is_empty() {
            warnings.push(Warning::error(
                "please add a rule to cover what should happen in the general case.",
            ));
        }
        warnings
    }
}

impl InteractionValidator for BaseRuleSpecValidator {
    fn validate(
        &self,
        state_name: &str,
        _customization_args: &Map<String, Value>,
        rule_specs: &[RuleSpec],
    ) -> Vec<Warning> {
        Self::rule_spec_warnings(state_name, rule_specs)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveMapValidator;

impl InteractionValidator for InteractiveMapValidator {
    fn validate(
        &self,
        state_name: &str,
        customization_args: &Map<String, Value>,
        rule_specs: &[RuleSpec],
    ) -> Vec<Warning> {
        let mut warnings = Vec::new();

        if !arg_in_range(customization_args, "latitude", 90.0) {
            warnings.push(Warning::critical(
                "please pick a starting latitude between -90 and 90.",
            ));
        }
        if !arg_in_range(customization_args, "longitude", 180.0) {
            warnings.push(Warning::critical(
                "please pick a starting longitude between -180 and 180.",
            ));
        }

        let non_default = rule_specs.split_last().map(|(_, rest)| rest).unwrap_or(&[]);
        for _ in non_default.iter().filter(|rule_spec| has_negative_distance(rule_spec)) {
            warnings.push(Warning::critical(
                "please ensure that all the rules refer to valid distances.",
            ));
        }

        warnings.extend(BaseRuleSpecValidator::rule_spec_warnings(state_name, rule_specs));
        warnings
    }
}

fn has_negative_distance(rule_spec: &RuleSpec) -> bool {
    let name = rule_spec.definition.get("name").and_then(Value::as_str);
    matches!(name, Some("Within" | "NotWithin"))
        && rule_spec
            .definition
            .pointer("/inputs/d")
            .and_then(Value::as_f64)
            .is_some_and(|distance| distance < 0.0)
}

/// A missing or non-numeric value counts as out of range.
fn arg_in_range(customization_args: &Map<String, Value>, name: &str, bound: f64) -> bool {
    customization_args
        .get(name)
        .and_then(|arg| arg.get("value"))
        .and_then(Value::as_f64)
        .is_some_and(|value| (-bound..=bound).contains(&value))
}

/// Validators keyed by interaction id. Ids without a registration use the
/// fallback validator.
pub struct ValidatorRegistry {
    validators: BTreeMap<String, Box<dyn InteractionValidator>>,
    fallback: Box<dyn InteractionValidator>,
}

impl ValidatorRegistry {
    pub fn new(fallback: Box<dyn InteractionValidator>) -> Self {
        Self {
            validators: BTreeMap::new(),
            fallback,
        }
    }

    pub fn register(
        &mut self,
        interaction_id: impl Into<String>,
        validator: Box<dyn InteractionValidator>,
    ) {
        self.validators.insert(interaction_id.into(), validator);
    }

    pub fn registered_ids(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    pub fn validator_for(&self, interaction_id: &str) -> &dyn InteractionValidator {
        self.validators
            .get(interaction_id)
            .map(|validator| &**validator)
            .unwrap_or(&*self.fallback)
    }

    pub fn validate(
        &self,
        interaction_id: &str,
        state_name: &str,
        customization_args: &Map<String, Value>,
        rule_specs: &[RuleSpec],
    ) -> Vec<Warning> {
        self.validator_for(interaction_id)
            .validate(state_name, customization_args, rule_specs)
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        let mut registry = Self::new(Box::new(BaseRuleSpecValidator));
        registry.register("InteractiveMap", Box::new(InteractiveMapValidator));
        registry
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("registered", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "validators_test.rs"]
mod tests;
