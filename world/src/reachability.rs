//! Flood-fill connectivity checks over the open interior cells.

use std::collections::VecDeque;

use pick_up_sticks_core::{BlockingSet, CellCoord};

use crate::geometry::GridGeometry;

/// Outcome of a single flood fill over the open interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloodSummary {
    /// Number of interior cells that are neither blocking nor the candidate.
    pub open: usize,
    /// Number of open cells reached from the seed.
    pub visited: usize,
}

impl FloodSummary {
    /// Reports whether the open region forms exactly one connected component.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.open > 0 && self.visited == self.open
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    Closed,
    Open,
    Visited,
}

/// Breadth-first connectivity engine with reusable scratch buffers.
///
/// The engine holds no state between calls beyond its scratch space, so the
/// verdict is a pure function of the geometry, blocking set and candidate.
#[derive(Clone, Debug, Default)]
pub struct ReachabilityEngine {
    states: Vec<CellState>,
    queue: VecDeque<CellCoord>,
}

impl ReachabilityEngine {
    /// Creates an engine with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether every open interior cell stays mutually reachable once
    /// `candidate` is added to `blocking`.
    ///
    /// Returns `false` without traversing when the candidate is already
    /// blocking or is not an interior cell, and when no open cell remains.
    pub fn is_fully_accessible(
        &mut self,
        geometry: &GridGeometry,
        blocking: &BlockingSet,
        candidate: Option<CellCoord>,
    ) -> bool {
        if let Some(cell) = candidate {
            if blocking.contains(cell) || !geometry.is_interior(cell) {
                return false;
            }
        }

        self.flood(geometry, blocking, candidate).is_connected()
    }

    /// Flood fills the open interior from its lexicographically smallest cell.
    ///
    /// Cells in `blocking` that are not interior cells are ignored.
    pub fn flood(
        &mut self,
        geometry: &GridGeometry,
        blocking: &BlockingSet,
        candidate: Option<CellCoord>,
    ) -> FloodSummary {
        let capacity = geometry.cell_capacity();
        if self.states.len() != capacity {
            self.states = vec![CellState::Closed; capacity];
        } else {
            self.states.fill(CellState::Closed);
        }
        self.queue.clear();

        let mut open = 0;
        let mut seed = None;
        for &cell in geometry.interior_cells() {
            if blocking.contains(cell) || candidate == Some(cell) {
                continue;
            }
            let Some(offset) = geometry.index(cell) else {
                continue;
            };
            self.states[offset] = CellState::Open;
            open += 1;
            if seed.is_none() {
                seed = Some((offset, cell));
            }
        }

        let Some((seed_offset, seed_cell)) = seed else {
            return FloodSummary { open, visited: 0 };
        };

        self.states[seed_offset] = CellState::Visited;
        self.queue.push_back(seed_cell);
        let mut visited = 1;

        while let Some(cell) = self.queue.pop_front() {
            for &neighbor in geometry.neighbors(cell) {
                let Some(offset) = geometry.index(neighbor) else {
                    continue;
                };
                if self.states[offset] != CellState::Open {
                    continue;
                }
                self.states[offset] = CellState::Visited;
                visited += 1;
                self.queue.push_back(neighbor);
            }
        }

        FloodSummary { open, visited }
    }
}

/// One-shot connectivity check that allocates fresh scratch space.
#[must_use]
pub fn is_fully_accessible(
    geometry: &GridGeometry,
    blocking: &BlockingSet,
    candidate: Option<CellCoord>,
) -> bool {
    ReachabilityEngine::new().is_fully_accessible(geometry, blocking, candidate)
}
