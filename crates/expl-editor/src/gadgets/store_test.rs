use super::{GadgetEditError, GadgetStore};
use crate::changes::ChangeRecord;
use crate::confirm::{AutoConfirm, Confirmation, DeleteOutcome};
use crate::context::EditContext;
use crate::gadgets::{CapacityPanelValidator, PanelRule};
use crate::signals::EditorSignal;
use crate::test_fixtures::{gadget, skin};
use expl_core::NamingRules;
use serde_json::json;
use std::collections::BTreeMap;

fn store(ctx: &mut EditContext) -> GadgetStore {
    let mut store = GadgetStore::default();
    store.init(
        &mut ctx.signals,
        &skin(vec![
            ("bottom", vec![gadget("ScoreBar", "score"), gadget("AdviceBar", "advice")]),
            ("left", vec![]),
        ]),
    );
    store
}

fn assert_panels_match_gadgets(store: &GadgetStore) {
    let mut in_panels: Vec<String> = store.panels().into_values().flatten().collect();
    in_panels.sort();
    let keys: Vec<String> = store.gadgets().into_keys().collect();
    assert_eq!(in_panels, keys);
}

#[test]
fn init_builds_gadgets_and_panels() {
    let mut ctx = EditContext::new();
    let store = store(&mut ctx);
    assert_eq!(
        store.gadget_names_in_panel("bottom"),
        Some(vec!["score".to_string(), "advice".to_string()])
    );
    assert_eq!(store.gadget_names_in_panel("top"), None);
    assert_eq!(store.panel_of("advice"), Some("bottom"));
    assert!(ctx
        .signals
        .last_seq(EditorSignal::GadgetsChangedOrInitialized)
        .is_some());
    assert_panels_match_gadgets(&store);
}

#[test]
fn unique_gadget_name_appends_counter() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    assert_eq!(store.unique_gadget_name("ScoreBar"), "ScoreBar");
    store
        .add_gadget(&mut ctx, gadget("ScoreBar", "ScoreBar"), "left")
        .expect("must add");
    assert_eq!(store.unique_gadget_name("ScoreBar"), "ScoreBar2");
    store
        .add_gadget(&mut ctx, gadget("ScoreBar", "ScoreBar2"), "left")
        .expect("must add");
    assert_eq!(store.unique_gadget_name("ScoreBar"), "ScoreBar3");
}

#[test]
fn add_gadget_rejects_unknown_panel_and_duplicates() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    assert!(matches!(
        store.add_gadget(&mut ctx, gadget("ScoreBar", "new"), "top"),
        Err(GadgetEditError::PanelNotFound(_))
    ));
    assert!(matches!(
        store.add_gadget(&mut ctx, gadget("ScoreBar", "score"), "left"),
        Err(GadgetEditError::AlreadyExists(_))
    ));
    assert!(ctx.changes.is_empty());
}

#[test]
fn add_gadget_records_and_appends_to_panel() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    store
        .add_gadget(&mut ctx, gadget("AdviceBar", "hint"), "left")
        .expect("must add");
    assert_eq!(store.gadget_names_in_panel("left"), Some(vec!["hint".to_string()]));
    assert_eq!(
        ctx.changes.records(),
        &[ChangeRecord::AddGadget {
            gadget_dict: gadget("AdviceBar", "hint"),
            panel_name: "left".to_string(),
        }]
    );
    assert_panels_match_gadgets(&store);
}

#[test]
fn update_gadget_records_one_change_per_field() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let mut updated = store.gadget("score").expect("score");
    updated.visible_in_states = vec!["A".to_string(), "B".to_string()];

    assert_eq!(store.update_gadget(&mut ctx, &updated).expect("must update"), 1);
    assert_eq!(
        ctx.changes.records(),
        &[ChangeRecord::EditGadgetProperty {
            gadget_name: "score".to_string(),
            property_name: "visible_in_states".to_string(),
            new_value: json!(["A", "B"]),
            old_value: json!(["A"]),
        }]
    );

    updated.customization_args = serde_json::Map::new();
    updated.visible_in_states = vec![];
    assert_eq!(store.update_gadget(&mut ctx, &updated).expect("must update"), 2);
    assert_eq!(store.update_gadget(&mut ctx, &updated).expect("no-op"), 0);
    assert_eq!(ctx.changes.len(), 3);
}

#[test]
fn update_gadget_never_touches_gadget_id() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let mut updated = store.gadget("score").expect("score");
    updated.gadget_id = "Other".to_string();
    assert_eq!(store.update_gadget(&mut ctx, &updated).expect("must update"), 0);
    assert_eq!(store.gadget("score").expect("score").gadget_id, "ScoreBar");
}

#[test]
fn delete_gadget_requires_confirmation() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let outcome = store
        .delete_gadget(&mut ctx, &mut |_: &str| Confirmation::Cancelled, "score")
        .expect("must not fail");
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert!(store.gadget("score").is_some());

    let outcome = store
        .delete_gadget(&mut ctx, &mut AutoConfirm, "score")
        .expect("must delete");
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(store.gadget_names_in_panel("bottom"), Some(vec!["advice".to_string()]));
    assert_eq!(ctx.changes.len(), 1);
    assert_panels_match_gadgets(&store);

    assert!(matches!(
        store.delete_gadget(&mut ctx, &mut AutoConfirm, "score"),
        Err(GadgetEditError::NotFound(_))
    ));
}

#[test]
fn rename_gadget_keeps_panel_position() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    let renamed = store
        .rename_gadget(&mut ctx, "score", "  points ")
        .expect("must rename");
    assert_eq!(renamed, "points");
    assert_eq!(
        store.gadget_names_in_panel("bottom"),
        Some(vec!["points".to_string(), "advice".to_string()])
    );
    assert_eq!(store.gadget("points").expect("points").gadget_name, "points");
    assert!(matches!(
        store.rename_gadget(&mut ctx, "points", "advice"),
        Err(GadgetEditError::AlreadyExists(_))
    ));
    assert!(matches!(
        store.rename_gadget(&mut ctx, "points", "a|b"),
        Err(GadgetEditError::InvalidName { .. })
    ));
    assert_eq!(ctx.changes.len(), 1);
    assert_panels_match_gadgets(&store);
}

#[test]
fn move_appends_to_destination() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    store
        .move_gadget_between_panels(&mut ctx.signals, "score", "bottom", "left")
        .expect("must move");
    assert_eq!(store.gadget_names_in_panel("left"), Some(vec!["score".to_string()]));
    assert_eq!(store.gadget_names_in_panel("bottom"), Some(vec!["advice".to_string()]));
    assert!(ctx.changes.is_empty());
    assert_panels_match_gadgets(&store);
}

#[test]
fn rejected_move_restores_original_index() {
    let mut ctx = EditContext::new();
    let rules = BTreeMap::from([("left".to_string(), PanelRule { max_gadgets: 1 })]);
    let mut store = GadgetStore::new(
        NamingRules::default(),
        Box::new(CapacityPanelValidator::new(rules)),
    );
    store.init(
        &mut ctx.signals,
        &skin(vec![
            ("bottom", vec![gadget("ScoreBar", "score"), gadget("AdviceBar", "advice")]),
            ("left", vec![gadget("AdviceBar", "tip")]),
        ]),
    );

    let err = store
        .move_gadget_between_panels(&mut ctx.signals, "score", "bottom", "left")
        .expect_err("panel is full");
    assert!(matches!(err, GadgetEditError::PanelRejected { .. }));
    assert_eq!(
        store.gadget_names_in_panel("bottom"),
        Some(vec!["score".to_string(), "advice".to_string()])
    );
    assert_eq!(store.gadget_names_in_panel("left"), Some(vec!["tip".to_string()]));

    assert!(matches!(
        store.add_gadget(&mut ctx, gadget("ScoreBar", "extra"), "left"),
        Err(GadgetEditError::PanelRejected { .. })
    ));
}

#[test]
fn move_from_wrong_panel_is_reported() {
    let mut ctx = EditContext::new();
    let mut store = store(&mut ctx);
    assert!(matches!(
        store.move_gadget_between_panels(&mut ctx.signals, "score", "left", "bottom"),
        Err(GadgetEditError::NotInPanel { .. })
    ));
}
