use std::fmt;

use pixpath_core::{GridPos, Range};

use crate::distance::manhattan;
use crate::traits::{GoalFn, HeuristicFn, SearchProblem};

/// The 5x5 demo grid used by [`GridProblem::default`].
pub const DEMO_GRID: [[u8; 5]; 5] = [
    [1, 10, 10, 10, 10],
    [1, 1, 10, 10, 10],
    [10, 1, 1, 1, 1],
    [10, 10, 1, 10, 1],
    [10, 10, 1, 10, 1],
];

/// Errors raised while building a [`GridProblem`] or addressing its tiles.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid has no rows, or its first row has no columns.
    Empty,
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A tile weight is zero, negative, or not finite.
    InvalidWeight { pos: GridPos, weight: f64 },
    /// A position lies outside the grid.
    OutOfBounds { pos: GridPos, rows: i32, cols: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid is empty"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(f, "grid row {row} has {found} columns, expected {expected}"),
            Self::InvalidWeight { pos, weight } => {
                write!(f, "grid tile {pos} has invalid weight {weight}")
            }
            Self::OutOfBounds { pos, rows, cols } => {
                write!(f, "position {pos} is outside the {rows}x{cols} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Cardinal movement over a 2-D grid of positive tile weights.
///
/// Moving between two adjacent tiles costs the mean of their weights. Unless
/// overridden, the goal is the bottom-right tile and the heuristic is the
/// Manhattan distance to it.
pub struct GridProblem {
    weights: Vec<f64>,
    rows: i32,
    cols: i32,
    goal: GoalFn<GridPos>,
    heuristic: HeuristicFn<GridPos>,
}

impl GridProblem {
    /// Build a problem from row-major weights.
    ///
    /// Fails if the grid is empty, ragged, or holds a weight that is not a
    /// finite positive number.
    pub fn new<T, R>(rows: &[R]) -> Result<Self, GridError>
    where
        T: Copy + Into<f64>,
        R: AsRef<[T]>,
    {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        if cols == 0 {
            return Err(GridError::Empty);
        }
        let mut weights = Vec::with_capacity(rows.len() * cols);
        for (ri, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: ri,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (ci, &w) in row.iter().enumerate() {
                let weight: f64 = w.into();
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(GridError::InvalidWeight {
                        pos: GridPos::new(ri as i32, ci as i32),
                        weight,
                    });
                }
                weights.push(weight);
            }
        }
        Ok(Self::build(weights, rows.len() as i32, cols as i32))
    }

    fn build(weights: Vec<f64>, rows: i32, cols: i32) -> Self {
        let corner = GridPos::new(rows - 1, cols - 1);
        Self {
            weights,
            rows,
            cols,
            goal: Box::new(move |p: GridPos| p == corner),
            heuristic: Box::new(move |p: GridPos| {
                manhattan(p.to_point(), corner.to_point()) as f64
            }),
        }
    }

    /// Target a single tile: sets the goal test and retargets the Manhattan
    /// heuristic at `goal`.
    pub fn with_goal(mut self, goal: GridPos) -> Self {
        self.goal = Box::new(move |p: GridPos| p == goal);
        self.heuristic =
            Box::new(move |p: GridPos| manhattan(p.to_point(), goal.to_point()) as f64);
        self
    }

    /// Replace the goal test, leaving the heuristic untouched.
    pub fn with_goal_fn(
        mut self,
        goal: impl Fn(GridPos) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.goal = Box::new(goal);
        self
    }

    /// Replace the heuristic.
    pub fn with_heuristic(
        mut self,
        h: impl Fn(GridPos) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.heuristic = Box::new(h);
        self
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Grid extent as a range of points (`x` = column, `y` = row).
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::with_size(self.cols, self.rows)
    }

    /// The bottom-right tile.
    #[inline]
    pub fn bottom_right(&self) -> GridPos {
        GridPos::new(self.rows - 1, self.cols - 1)
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.bounds().contains(pos.to_point())
    }

    /// Validate a position against the grid.
    pub fn pos(&self, row: i32, col: i32) -> Result<GridPos, GridError> {
        let pos = GridPos::new(row, col);
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GridError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Weight of the tile at `pos`, or `None` outside the grid.
    #[inline]
    pub fn weight(&self, pos: GridPos) -> Option<f64> {
        if !self.contains(pos) {
            return None;
        }
        self.weights
            .get((pos.row * self.cols + pos.col) as usize)
            .copied()
    }
}

impl Default for GridProblem {
    fn default() -> Self {
        let weights = DEMO_GRID.iter().flatten().map(|&w| f64::from(w)).collect();
        Self::build(weights, DEMO_GRID.len() as i32, DEMO_GRID[0].len() as i32)
    }
}

impl fmt::Debug for GridProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridProblem")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

impl SearchProblem for GridProblem {
    type State = GridPos;

    fn successors(&self, state: GridPos, buf: &mut Vec<(GridPos, f64)>) {
        let Some(here) = self.weight(state) else {
            return;
        };
        for n in state.neighbors_4() {
            if let Some(there) = self.weight(n) {
                buf.push((n, (here + there) / 2.0));
            }
        }
    }

    #[inline]
    fn is_goal(&self, state: GridPos) -> bool {
        (self.goal)(state)
    }

    #[inline]
    fn h(&self, state: GridPos) -> f64 {
        (self.heuristic)(state)
    }
}
