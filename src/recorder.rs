use crate::grid::{Digit, Grid};
use crate::topology::Cell;

/// One recorded singleton assignment and the grid right after it.
#[derive(Clone, Debug)]
pub struct Frame {
    pub cell: Cell,
    pub digit: Digit,
    pub grid: Grid,
}

/// Append-only history of every singleton assignment, kept for replay.
///
/// Passed by `&mut` through propagation and search; the solver only ever
/// appends, never reads back, so recording cannot change the outcome. The
/// disabled variant skips the grid clone entirely.
pub struct AssignmentLog {
    frames: Vec<Frame>,
    enabled: bool,
}

impl AssignmentLog {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            frames: Vec::new(),
            enabled: false,
        }
    }

    pub fn record(&mut self, cell: Cell, digit: Digit, grid: &Grid) {
        if self.enabled {
            self.frames.push(Frame {
                cell,
                digit,
                grid: grid.clone(),
            });
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// JSON export of the history for external visualization front-ends.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> anyhow::Result<String> {
        use crate::grid::digits_of;

        #[derive(serde::Serialize)]
        struct FrameExport {
            step: usize,
            cell: String,
            digit: Digit,
            candidates: Vec<String>,
        }

        let frames: Vec<FrameExport> = self
            .frames
            .iter()
            .enumerate()
            .map(|(i, f)| FrameExport {
                step: i + 1,
                cell: f.cell.to_string(),
                digit: f.digit,
                candidates: (0..81)
                    .map(|idx| {
                        digits_of(f.grid.cands[idx])
                            .map(|d| (b'0' + d) as char)
                            .collect()
                    })
                    .collect(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&frames)?)
    }
}

impl Default for AssignmentLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_records_nothing() {
        let grid = Grid::blank();
        let mut log = AssignmentLog::disabled();
        log.record(Cell { r: 0, c: 0 }, 5, &grid);
        assert!(log.is_empty());
    }

    #[test]
    fn enabled_log_snapshots_in_order() {
        let grid = Grid::blank();
        let mut log = AssignmentLog::new();
        log.record(Cell { r: 0, c: 0 }, 5, &grid);
        log.record(Cell { r: 1, c: 1 }, 3, &grid);
        assert_eq!(log.len(), 2);
        assert_eq!(log.frames()[0].digit, 5);
        assert_eq!(log.frames()[1].cell.to_string(), "B2");
    }
}
