use super::GraphCache;
use crate::registry::InteractionRegistry;
use crate::signals::{EditorSignal, SignalBus};
use crate::test_fixtures::state_to;
use std::collections::BTreeMap;

#[test]
fn cache_is_reused_until_refresh_signal() {
    let mut signals = SignalBus::new();
    let registry = InteractionRegistry::default();
    let mut states = BTreeMap::from([("A".to_string(), state_to(&["END"]))]);
    let mut cache = GraphCache::new();

    let first = cache
        .graph_data(&signals, "A", &states, &registry)
        .expect("init known")
        .clone();
    assert!(cache.is_fresh(&signals, "A"));

    states.insert("B".to_string(), state_to(&["END"]));
    let stale = cache
        .graph_data(&signals, "A", &states, &registry)
        .expect("init known");
    assert_eq!(*stale, first);

    signals.emit(EditorSignal::RefreshGraph);
    assert!(!cache.is_fresh(&signals, "A"));
    let refreshed = cache
        .graph_data(&signals, "A", &states, &registry)
        .expect("init known");
    assert!(refreshed.nodes.contains("B"));
}

#[test]
fn changing_initial_state_recomputes() {
    let signals = SignalBus::new();
    let registry = InteractionRegistry::default();
    let states = BTreeMap::from([
        ("A".to_string(), state_to(&["END"])),
        ("B".to_string(), state_to(&["END"])),
    ]);
    let mut cache = GraphCache::new();
    cache.graph_data(&signals, "A", &states, &registry);
    let graph = cache
        .graph_data(&signals, "B", &states, &registry)
        .expect("init known");
    assert_eq!(graph.init_state_id, "B");
}

#[test]
fn empty_initial_state_yields_nothing() {
    let signals = SignalBus::new();
    let mut cache = GraphCache::new();
    assert!(cache
        .graph_data(&signals, "", &BTreeMap::new(), &InteractionRegistry::default())
        .is_none());
    cache.invalidate();
    assert!(!cache.is_fresh(&signals, ""));
}
