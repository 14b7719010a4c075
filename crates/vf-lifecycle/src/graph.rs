// graph.rs — Generic labeled transition graph.
//
// Two rule tables in this system are structurally the same problem: the
// component lifecycle (strict role/trigger guards) and the purchase-order
// status graph (adjacency only). Both are "which target states may follow
// this state, and is there a multi-step path when the direct edge is
// missing". This type owns that shared part; guard checks layer on top of
// it in `machine.rs`.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Hard cap on DFS search depth (in hops). Path finding over a cyclic graph
/// is exponential in the worst case; this bound keeps it finite even if the
/// rule table grows unexpectedly dense.
pub const MAX_SEARCH_DEPTH: usize = 10;

/// A directed graph of allowed state transitions.
///
/// Edge order is preserved: `next_states` returns targets in the order the
/// rule table listed them, and path finding tries them in that order.
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph<S> {
    edges: HashMap<S, Vec<S>>,
}

impl<S: Copy + Eq + Hash> TransitionGraph<S> {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// Register the allowed targets for a state. Replaces any previous
    /// entry — each state has at most one outbound rule.
    pub fn set_edges(&mut self, from: S, to: impl IntoIterator<Item = S>) {
        self.edges.insert(from, to.into_iter().collect());
    }

    /// The allowed targets for a state, in rule order. Empty for states
    /// with no outbound rule (terminal states included).
    pub fn next_states(&self, from: S) -> &[S] {
        self.edges.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a direct edge `from → to` exists. This is the lightweight
    /// adjacency check used by path finding — no guards are consulted.
    pub fn is_valid_transition(&self, from: S, to: S) -> bool {
        self.next_states(from).contains(&to)
    }

    /// Depth-first search for a transition path from `from` to `to`.
    ///
    /// Returns the full status sequence including both endpoints, or an
    /// empty vector if no path exists within [`MAX_SEARCH_DEPTH`] hops.
    /// Targets are tried in rule order, so the result is the first path
    /// found by that order, not necessarily the shortest.
    pub fn find_path(&self, from: S, to: S) -> Vec<S> {
        self.dfs(from, to, &HashSet::new(), &[])
    }

    /// Direct-or-multi-step reachability decision.
    ///
    /// A direct edge wins (no path reported); otherwise a DFS path is
    /// attempted and reported with the number of intermediate stops.
    pub fn can_transition_to(&self, from: S, to: S) -> Reachability<S> {
        if self.is_valid_transition(from, to) {
            return Reachability::direct();
        }
        let path = self.find_path(from, to);
        if path.is_empty() {
            Reachability::unreachable()
        } else {
            Reachability::via_path(path)
        }
    }

    // The visited set is cloned per branch, not shared: a status explored
    // on one branch may still be revisited on a sibling branch. The `path`
    // argument carries the statuses already committed on this branch.
    fn dfs(&self, current: S, target: S, visited: &HashSet<S>, path: &[S]) -> Vec<S> {
        if current == target {
            let mut found = path.to_vec();
            found.push(target);
            return found;
        }
        if path.len() >= MAX_SEARCH_DEPTH || visited.contains(&current) {
            return Vec::new();
        }

        let mut visited = visited.clone();
        visited.insert(current);
        let mut branch = path.to_vec();
        branch.push(current);

        for &next in self.next_states(current) {
            let found = self.dfs(next, target, &visited, &branch);
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

/// The outcome of [`TransitionGraph::can_transition_to`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reachability<S> {
    pub allowed: bool,
    /// Full path including both endpoints, when the target is only
    /// reachable through intermediate transitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<S>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl<S> Reachability<S> {
    fn direct() -> Self {
        Self {
            allowed: true,
            path: None,
            reason: None,
        }
    }

    fn via_path(path: Vec<S>) -> Self {
        // Statuses strictly between source and target on the found path.
        let intermediate = path.len().saturating_sub(2);
        Self {
            allowed: true,
            path: Some(path),
            reason: Some(format!("requires {intermediate} intermediate transitions")),
        }
    }

    fn unreachable() -> Self {
        Self {
            allowed: false,
            path: None,
            reason: Some("no valid transition path".to_string()),
        }
    }
}
