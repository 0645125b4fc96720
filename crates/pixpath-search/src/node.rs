use std::cmp::Ordering;

/// Handle to a [`SearchNode`] in an engine's node arena.
///
/// Each id carries the generation of the search that created it, so ids from
/// an earlier search are recognised as stale instead of aliasing new nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    idx: usize,
    generation: u32,
}

impl NodeId {
    #[inline]
    pub(crate) fn new(idx: usize, generation: u32) -> Self {
        Self { idx, generation }
    }

    /// Position of the node in the arena, in creation order.
    #[inline]
    pub fn index(self) -> usize {
        self.idx
    }

    #[inline]
    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// One step of a discovered path: `f = g + h` for `state`, reached from
/// `parent`.
///
/// Nodes are immutable once created. Several nodes may exist for one state;
/// only the one held in the engine's reached table is live.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode<S> {
    f: f64,
    g: f64,
    h: f64,
    state: S,
    parent: Option<NodeId>,
}

impl<S: Copy> SearchNode<S> {
    pub(crate) fn new(g: f64, h: f64, state: S, parent: Option<NodeId>) -> Self {
        Self {
            f: g + h,
            g,
            h,
            state,
            parent,
        }
    }

    /// Estimated total cost, `g + h`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Cost accumulated from the initial state.
    #[inline]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// Heuristic estimate of the remaining cost.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    #[inline]
    pub fn state(&self) -> S {
        self.state
    }

    /// The node this one was generated from, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// ---------------------------------------------------------------------------
// Frontier entry
// ---------------------------------------------------------------------------

/// Reference into the node arena, ordered for use in `BinaryHeap`.
///
/// Lower `f` pops first; among equal `f`, the lower (earlier) `seq` pops first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrontierEntry {
    pub(crate) f: f64,
    pub(crate) seq: u64,
    pub(crate) node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys so the max-heap behaves as a min-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}
