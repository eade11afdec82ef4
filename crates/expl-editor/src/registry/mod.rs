mod interactions;
mod validators;

pub use interactions::{CustomizationArgSpec, InteractionRegistry, InteractionSpec};
pub use validators::{
    BaseRuleSpecValidator, InteractionValidator, InteractiveMapValidator, ValidatorRegistry,
};
