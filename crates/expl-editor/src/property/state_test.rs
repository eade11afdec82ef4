use crate::changes::ChangeRecord;
use crate::context::EditContext;
use crate::property::{PropertyError, SaveOutcome, StateProperties};
use crate::signals::EditorSignal;
use crate::states::{NewStateTemplate, StateGraphStore};
use crate::test_fixtures::state_to;
use expl_core::{ContentItem, NamingRules};
use serde_json::json;

fn store(ctx: &mut EditContext) -> StateGraphStore {
    let mut store = StateGraphStore::new(NewStateTemplate::default(), NamingRules::default());
    store.set_states(
        &mut ctx.signals,
        [("A".to_string(), state_to(&["END"]))].into_iter().collect(),
    );
    store
}

#[test]
fn commit_records_and_writes_into_live_state() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let mut properties = StateProperties::new();
    properties
        .init_for_state("A", &store.state("A").expect("A"))
        .expect("must init");
    let before = ctx.signals.next_seq();

    properties
        .content
        .set_displayed(vec![ContentItem::text("Hello {{name}}")]);
    let outcome = properties
        .content
        .save_displayed_value(&mut ctx, &mut store)
        .expect("must save");

    assert_eq!(outcome, SaveOutcome::Recorded);
    assert_eq!(store.state("A").expect("A").content[0].value, "Hello {{name}}");
    assert_eq!(
        ctx.changes.records(),
        &[ChangeRecord::EditStateProperty {
            state_name: "A".to_string(),
            property_name: "content".to_string(),
            new_value: json!([{"type": "text", "value": "Hello {{name}}"}]),
            old_value: json!([{"type": "text", "value": "Question?"}]),
        }]
    );
    assert!(ctx.signals.last_seq(EditorSignal::RefreshGraph) >= Some(before));
}

#[test]
fn uninitialized_state_property_fails_loudly() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let mut properties = StateProperties::new();
    assert!(matches!(
        properties.widget_id.save_displayed_value(&mut ctx, &mut store),
        Err(PropertyError::NotInitialized(name)) if name == "widget_id"
    ));
}

#[test]
fn commit_for_removed_state_is_rejected() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let mut properties = StateProperties::new();
    properties
        .init_for_state("Gone", &state_to(&["END"]))
        .expect("must init");
    properties.widget_id.set_displayed(Some("Continue".to_string()));
    assert!(matches!(
        properties.widget_id.save_displayed_value(&mut ctx, &mut store),
        Err(PropertyError::StateNotFound(name)) if name == "Gone"
    ));
    assert!(ctx.changes.is_empty());
}

#[test]
fn unchanged_value_is_not_recorded() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let mut properties = StateProperties::new();
    properties
        .init_for_state("A", &store.state("A").expect("A"))
        .expect("must init");
    let outcome = properties
        .widget_handlers
        .save_displayed_value(&mut ctx, &mut store)
        .expect("must not fail");
    assert_eq!(outcome, SaveOutcome::Discarded);
    assert!(ctx.changes.is_empty());
}
