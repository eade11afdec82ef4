use super::compute::{compute_graph, GraphData};
use crate::registry::InteractionRegistry;
use crate::signals::{EditorSignal, SignalBus};
use expl_core::State;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct CachedGraph {
    refresh_seq: Option<u64>,
    init_state_name: String,
    graph: GraphData,
}

/// Holds the most recently computed graph until the next refresh-graph
/// signal or a change of initial state.
#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    cached: Option<CachedGraph>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_fresh(&self, signals: &SignalBus, init_state_name: &str) -> bool {
        self.cached.as_ref().is_some_and(|cached| {
            cached.refresh_seq == signals.last_seq(EditorSignal::RefreshGraph)
                && cached.init_state_name == init_state_name
        })
    }

    /// Returns `None` until an initial state is known.
    pub fn graph_data(
        &mut self,
        signals: &SignalBus,
        init_state_name: &str,
        states: &BTreeMap<String, State>,
        interactions: &InteractionRegistry,
    ) -> Option<&GraphData> {
        if init_state_name.is_empty() {
            return None;
        }
        if !self.is_fresh(signals, init_state_name) {
            debug!(init_state_name, "recomputing graph");
            self.cached = Some(CachedGraph {
                refresh_seq: signals.last_seq(EditorSignal::RefreshGraph),
                init_state_name: init_state_name.to_string(),
                graph: compute_graph(init_state_name, states, interactions),
            });
        }
        self.cached.as_ref().map(|cached| &cached.graph)
    }
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
