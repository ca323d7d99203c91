use crate::grid::{bitcount, mask_of, sole_digit, Grid};
use crate::recorder::AssignmentLog;
use crate::topology::{Topology, Unit};
use itertools::Itertools;

/// Applies the three deduction rules until a fixed point or a contradiction.
pub struct Propagator<'a> {
    topo: &'a Topology,
    max_tuple: usize,
}

impl<'a> Propagator<'a> {
    pub fn new(topo: &'a Topology) -> Self {
        Self::with_max_tuple(topo, 2)
    }

    /// `max_tuple` is the largest naked-tuple size checked; 2 means twins only.
    pub fn with_max_tuple(topo: &'a Topology, max_tuple: usize) -> Self {
        Self { topo, max_tuple }
    }

    /// Removes every solved cell's digit from the candidates of its peers.
    ///
    /// All removals consult `grid` as it stood at the start of the pass, so
    /// the result is independent of cell order. Emptied candidate sets are
    /// left for `reduce` to detect.
    pub fn eliminate(&self, grid: &Grid, log: &mut AssignmentLog) -> Grid {
        let mut next = grid.clone();
        for cell in self.topo.cells() {
            let mask = grid.candidates(cell);
            if bitcount(mask) == 1 {
                continue;
            }
            let mut taken = 0u16;
            for &peer in self.topo.peers(cell) {
                let pm = grid.candidates(peer);
                if bitcount(pm) == 1 {
                    taken |= pm;
                }
            }
            let reduced = mask & !taken;
            next.cands[cell.idx()] = reduced;
            if let Some(d) = sole_digit(reduced) {
                log.record(cell, d, &next);
            }
        }
        next
    }

    /// Collapses any cell holding the only candidate for some digit in a unit.
    pub fn only_choice(&self, grid: &mut Grid, log: &mut AssignmentLog) {
        for unit in self.topo.unitlist() {
            for &cell in unit {
                let mask = grid.candidates(cell);
                if bitcount(mask) <= 1 {
                    continue;
                }
                let mut others = 0u16;
                for &other in unit {
                    if other != cell {
                        others |= grid.candidates(other);
                    }
                }
                if let Some(d) = sole_digit(mask & !others) {
                    grid.cands[cell.idx()] = mask_of(d);
                    log.record(cell, d, grid);
                }
            }
        }
    }

    /// Naked-tuple elimination over the row and column units only: k cells
    /// sharing an identical k-candidate set force those digits out of the
    /// rest of the unit.
    pub fn naked_tuples(&self, grid: &mut Grid) {
        for unit in self.topo.row_and_column_units() {
            self.naked_tuples_in_unit(unit, grid);
        }
    }

    fn naked_tuples_in_unit(&self, unit: &Unit, grid: &mut Grid) {
        let groups = unit
            .iter()
            .map(|&cell| (grid.candidates(cell), cell))
            .into_group_map();
        for k in 2..=self.max_tuple {
            for (mask, members) in groups.iter().sorted_by_key(|&(mask, _)| *mask) {
                if bitcount(*mask) as usize != k || members.len() != k {
                    continue;
                }
                for &other in unit {
                    if !members.contains(&other) {
                        grid.cands[other.idx()] &= !*mask;
                    }
                }
            }
        }
    }

    /// The propagation loop: eliminate, only-choice, naked tuples, repeat.
    ///
    /// Returns false on contradiction (some cell ran out of candidates) and
    /// true once a pass adds no newly solved cell; the stalled grid may
    /// still hold undetermined cells.
    pub fn reduce(&self, grid: &mut Grid, log: &mut AssignmentLog) -> bool {
        loop {
            let solved_before = grid.count_solved();
            *grid = self.eliminate(grid, log);
            self.only_choice(grid, log);
            self.naked_tuples(grid);
            if grid.has_empty_cell() {
                return false;
            }
            if grid.count_solved() == solved_before {
                return true;
            }
        }
    }
}
