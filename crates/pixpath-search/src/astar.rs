use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use log::{debug, trace};

use crate::node::{FrontierEntry, NodeId, SearchNode};
use crate::traits::SearchProblem;

/// Why a search ended without reaching a goal.
///
/// Both cases are ordinary outcomes of a query, not misuse of the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchFailure {
    /// The frontier ran dry: no goal is reachable from the initial state.
    Exhausted,
    /// A node with `g > limit` was popped before any goal.
    CostLimitExceeded { limit: f64, g: f64 },
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "frontier exhausted before reaching a goal"),
            Self::CostLimitExceeded { limit, g } => {
                write!(f, "cost limit {limit:.2} exceeded by a path of cost {g:.2}")
            }
        }
    }
}

impl std::error::Error for SearchFailure {}

/// Lifecycle of the engine across one [`AStar::search`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Running,
    Succeeded,
    FailedLimit,
    FailedExhausted,
}

impl SearchStatus {
    /// Whether the last search has finished, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Idle | Self::Running)
    }
}

/// Counters for the last search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes popped and expanded.
    pub expanded: usize,
    /// Nodes created, including the root.
    pub generated: usize,
    /// Generated nodes that replaced a costlier reached entry.
    pub improved: usize,
    /// Popped entries discarded because a cheaper node superseded them.
    pub stale_skipped: usize,
}

/// A* search engine over a borrowed [`SearchProblem`].
///
/// The engine owns the frontier, the reached table and the arena of search
/// nodes. Each [`search`](AStar::search) starts from a clean slate; the tables
/// of the last search remain readable until the next one. Node ids are only
/// honoured for the search that produced them.
pub struct AStar<'p, P: SearchProblem> {
    problem: &'p P,
    nodes: Vec<SearchNode<P::State>>,
    reached: HashMap<P::State, NodeId>,
    frontier: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    // bumped per search so stale node ids can be told apart
    generation: u32,
    status: SearchStatus,
    stats: SearchStats,
    // scratch buffer for successor queries
    sbuf: Vec<(P::State, f64)>,
}

impl<'p, P: SearchProblem> AStar<'p, P> {
    /// Create an idle engine for `problem`.
    pub fn new(problem: &'p P) -> Self {
        Self {
            problem,
            nodes: Vec::new(),
            reached: HashMap::new(),
            frontier: BinaryHeap::new(),
            next_seq: 0,
            generation: 0,
            status: SearchStatus::Idle,
            stats: SearchStats::default(),
            sbuf: Vec::with_capacity(8),
        }
    }

    /// The problem being searched.
    #[inline]
    pub fn problem(&self) -> &'p P {
        self.problem
    }

    /// Run A* from `initial` until a goal is popped.
    ///
    /// With `cost_limit` set, the search aborts as soon as a popped node has
    /// `g > limit`, even if cheaper alternatives remain on the frontier.
    /// Returns the goal node's id, or the reason no goal was reached.
    pub fn search(
        &mut self,
        initial: P::State,
        cost_limit: Option<f64>,
    ) -> Result<NodeId, SearchFailure> {
        self.reset();
        self.status = SearchStatus::Running;
        debug!("search from {initial:?} (cost limit {cost_limit:?})");

        let root = self.push_node(SearchNode::new(0.0, self.problem.h(initial), initial, None));
        self.reached.insert(initial, root);

        let mut sbuf = std::mem::take(&mut self.sbuf);

        let outcome = loop {
            let Some(current) = self.frontier.pop() else {
                break Err(SearchFailure::Exhausted);
            };

            let node = &self.nodes[current.node.index()];
            let (state, g) = (node.state(), node.g());

            // Skip stale entries.
            if self.reached.get(&state) != Some(&current.node) {
                self.stats.stale_skipped += 1;
                continue;
            }

            if let Some(limit) = cost_limit {
                if g > limit {
                    break Err(SearchFailure::CostLimitExceeded { limit, g });
                }
            }

            if self.problem.is_goal(state) {
                break Ok(current.node);
            }

            self.stats.expanded += 1;
            sbuf.clear();
            self.problem.successors(state, &mut sbuf);
            trace!("expand {state:?} g={g:.3} f={:.3}: {} successors", current.f, sbuf.len());

            for &(next, cost) in sbuf.iter() {
                debug_assert!(cost >= 0.0, "negative edge cost {cost} from {state:?}");
                let candidate_g = g + cost;
                if let Some(&existing) = self.reached.get(&next) {
                    if candidate_g >= self.nodes[existing.index()].g() {
                        continue;
                    }
                    self.stats.improved += 1;
                }
                let h = self.problem.h(next);
                let id = self.push_node(SearchNode::new(candidate_g, h, next, Some(current.node)));
                self.reached.insert(next, id);
            }
        };

        self.sbuf = sbuf;
        self.status = match outcome {
            Ok(_) => SearchStatus::Succeeded,
            Err(SearchFailure::Exhausted) => SearchStatus::FailedExhausted,
            Err(SearchFailure::CostLimitExceeded { .. }) => SearchStatus::FailedLimit,
        };
        debug!(
            "search finished: {:?}; {} expanded, {} generated, {} reached, {} left on frontier",
            self.status,
            self.stats.expanded,
            self.stats.generated,
            self.reached.len(),
            self.frontier.len()
        );
        outcome
    }

    /// States on the path from the root to `id`, root first.
    ///
    /// Only parent links are followed, so this works for any node produced by
    /// the last search, live in the reached table or not. Returns `None` for
    /// an id from an earlier search.
    pub fn reconstruct_path(&self, id: NodeId) -> Option<Vec<P::State>> {
        self.node(id)?;
        let mut path: Vec<P::State> = self.ancestors(id).map(|n| n.state()).collect();
        path.reverse();
        Some(path)
    }

    /// Walk from `id` up to the root, yielding `id`'s node first. Yields
    /// nothing for an id from an earlier search.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SearchNode<P::State>> + '_ {
        std::iter::successors(self.node(id), |n| {
            n.parent().map(|p| &self.nodes[p.index()])
        })
    }

    /// The node behind `id`, or `None` if `id` belongs to an earlier search.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&SearchNode<P::State>> {
        if id.generation() != self.generation {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Every node generated by the last search, in creation order.
    #[inline]
    pub fn nodes(&self) -> &[SearchNode<P::State>] {
        &self.nodes
    }

    /// Whether `state` was ever reached by the last search.
    #[inline]
    pub fn is_reached(&self, state: &P::State) -> bool {
        self.reached.contains_key(state)
    }

    /// The cheapest node found for `state` by the last search.
    #[inline]
    pub fn reached_node(&self, state: &P::State) -> Option<&SearchNode<P::State>> {
        self.reached.get(state).map(|id| &self.nodes[id.index()])
    }

    /// Number of distinct states in the reached table.
    #[inline]
    pub fn reached_len(&self) -> usize {
        self.reached.len()
    }

    /// Entries left on the frontier, stale ones included.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.reached.clear();
        self.frontier.clear();
        self.next_seq = 0;
        self.generation = self.generation.wrapping_add(1);
        self.stats = SearchStats::default();
        self.status = SearchStatus::Idle;
    }

    fn push_node(&mut self, node: SearchNode<P::State>) -> NodeId {
        let id = NodeId::new(self.nodes.len(), self.generation);
        self.frontier.push(FrontierEntry {
            f: node.f(),
            seq: self.next_seq,
            node: id,
        });
        self.next_seq += 1;
        self.nodes.push(node);
        self.stats.generated += 1;
        id
    }
}

impl<P: SearchProblem> fmt::Debug for AStar<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStar")
            .field("status", &self.status)
            .field("stats", &self.stats)
            .field("reached", &self.reached.len())
            .field("frontier", &self.frontier.len())
            .finish_non_exhaustive()
    }
}
