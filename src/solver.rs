use crate::grid::{bitcount, digits_of, mask_of, Grid};
use crate::propagate::Propagator;
use crate::recorder::AssignmentLog;
use crate::topology::Topology;
use anyhow::Result;

/// Depth-first search with constraint propagation at every node.
pub struct Solver<'a> {
    topo: &'a Topology,
    propagator: Propagator<'a>,
}

impl<'a> Solver<'a> {
    pub fn new(topo: &'a Topology) -> Self {
        Self {
            topo,
            propagator: Propagator::new(topo),
        }
    }

    pub fn with_max_tuple(topo: &'a Topology, max_tuple: usize) -> Self {
        Self {
            topo,
            propagator: Propagator::with_max_tuple(topo, max_tuple),
        }
    }

    /// Parses and solves a grid string.
    ///
    /// `Err` means the input itself was malformed; `Ok(None)` means the
    /// puzzle has no valid completion under the diagonal ruleset.
    pub fn solve(&self, input: &str, log: &mut AssignmentLog) -> Result<Option<Grid>> {
        let grid = Grid::parse(input)?;
        if !grid.is_consistent(self.topo) {
            return Ok(None);
        }
        Ok(self.search(grid, log))
    }

    /// Propagates, then branches on the most constrained undetermined cell.
    pub fn search(&self, mut grid: Grid, log: &mut AssignmentLog) -> Option<Grid> {
        if !self.propagator.reduce(&mut grid, log) {
            return None;
        }
        if grid.is_solved() {
            // duplicate singletons can slip past peer elimination when two
            // cells of a unit collapse in the same pass
            return grid.is_consistent(self.topo).then_some(grid);
        }

        // smallest candidate set above 1; first in cell order wins ties
        let mut pick = None;
        let mut best = u32::MAX;
        for cell in self.topo.cells() {
            let n = bitcount(grid.candidates(cell));
            if n > 1 && n < best {
                best = n;
                pick = Some(cell);
            }
        }
        let cell = pick?;

        for d in digits_of(grid.candidates(cell)) {
            let mut child = grid.clone();
            child.cands[cell.idx()] = mask_of(d);
            log.record(cell, d, &child);
            if let Some(solved) = self.search(child, log) {
                return Some(solved);
            }
        }
        None
    }
}
