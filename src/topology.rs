use once_cell::sync::Lazy;
use std::fmt;

/// One of the 81 board positions. Rows display as A-I, columns as 1-9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub r: usize,
    pub c: usize,
}

impl Cell {
    pub fn idx(self) -> usize {
        self.r * 9 + self.c
    }

    pub fn from_idx(i: usize) -> Self {
        Cell { r: i / 9, c: i % 9 }
    }

    /// Parses names like "A1" or "E5".
    pub fn from_name(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let r = chars.next()?;
        let c = chars.next()?;
        if chars.next().is_some() || !('A'..='I').contains(&r) || !('1'..='9').contains(&c) {
            return None;
        }
        Some(Cell {
            r: r as usize - 'A' as usize,
            c: c as usize - '1' as usize,
        })
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.r as u8) as char, self.c + 1)
    }
}

/// A group of 9 cells that must hold each digit 1-9 exactly once.
pub type Unit = [Cell; 9];

/// Immutable board geometry: the cells, the units, and the peer sets.
///
/// Built once per ruleset and shared read-only; nothing here changes during
/// solving. Unit order is rows, columns, boxes, then diagonals, so the first
/// 18 entries are exactly the units the naked-tuple rule scans.
pub struct Topology {
    unitlist: Vec<Unit>,
    units: Vec<Vec<usize>>,
    peers: Vec<Vec<Cell>>,
}

impl Topology {
    /// The diagonal ruleset: 9 rows + 9 columns + 9 boxes + 2 main diagonals.
    pub fn diagonal() -> Self {
        Self::build(true)
    }

    /// The plain ruleset without the two diagonal units (27 units).
    pub fn standard() -> Self {
        Self::build(false)
    }

    /// The process-wide diagonal topology, computed on first use.
    pub fn shared() -> &'static Topology {
        static SHARED: Lazy<Topology> = Lazy::new(Topology::diagonal);
        &SHARED
    }

    fn build(with_diagonals: bool) -> Self {
        let mut unitlist: Vec<Unit> = Vec::with_capacity(29);
        for r in 0..9 {
            unitlist.push(std::array::from_fn(|c| Cell { r, c }));
        }
        for c in 0..9 {
            unitlist.push(std::array::from_fn(|r| Cell { r, c }));
        }
        for br in (0..9).step_by(3) {
            for bc in (0..9).step_by(3) {
                unitlist.push(std::array::from_fn(|i| Cell {
                    r: br + i / 3,
                    c: bc + i % 3,
                }));
            }
        }
        if with_diagonals {
            unitlist.push(std::array::from_fn(|i| Cell { r: i, c: i }));
            unitlist.push(std::array::from_fn(|i| Cell { r: i, c: 8 - i }));
        }

        let mut units: Vec<Vec<usize>> = vec![Vec::new(); 81];
        for (ui, unit) in unitlist.iter().enumerate() {
            for cell in unit {
                units[cell.idx()].push(ui);
            }
        }

        let peers = (0..81)
            .map(|i| {
                let cell = Cell::from_idx(i);
                let mut v: Vec<Cell> = units[i]
                    .iter()
                    .flat_map(|&ui| unitlist[ui])
                    .filter(|&p| p != cell)
                    .collect();
                v.sort_unstable();
                v.dedup();
                v
            })
            .collect();

        Topology {
            unitlist,
            units,
            peers,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        (0..81).map(Cell::from_idx)
    }

    pub fn unitlist(&self) -> &[Unit] {
        &self.unitlist
    }

    /// All units containing `cell`.
    pub fn units_of(&self, cell: Cell) -> impl Iterator<Item = &Unit> {
        self.units[cell.idx()].iter().map(|&ui| &self.unitlist[ui])
    }

    /// Every cell sharing a unit with `cell`, itself excluded.
    pub fn peers(&self, cell: Cell) -> &[Cell] {
        &self.peers[cell.idx()]
    }

    /// The 18 row and column units, the only ones naked tuples are checked in.
    pub fn row_and_column_units(&self) -> &[Unit] {
        &self.unitlist[..18]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> Cell {
        Cell::from_name(name).unwrap()
    }

    #[test]
    fn cell_names_round_trip() {
        assert_eq!(cell("A1"), Cell { r: 0, c: 0 });
        assert_eq!(cell("I9"), Cell { r: 8, c: 8 });
        assert_eq!(cell("E5").to_string(), "E5");
        assert!(Cell::from_name("J1").is_none());
        assert!(Cell::from_name("A0").is_none());
        assert!(Cell::from_name("A10").is_none());
    }

    #[test]
    fn diagonal_topology_counts() {
        let topo = Topology::diagonal();
        assert_eq!(topo.cells().count(), 81);
        assert_eq!(topo.unitlist().len(), 29);
        for unit in topo.unitlist() {
            let mut u = unit.to_vec();
            u.sort_unstable();
            u.dedup();
            assert_eq!(u.len(), 9);
        }
    }

    #[test]
    fn standard_topology_has_no_diagonals() {
        let topo = Topology::standard();
        assert_eq!(topo.unitlist().len(), 27);
        assert_eq!(topo.units_of(cell("E5")).count(), 3);
        assert_eq!(topo.peers(cell("A1")).len(), 20);
    }

    #[test]
    fn units_of_counts_diagonal_membership() {
        let topo = Topology::diagonal();
        // B5 sits on no diagonal, A1 on one, E5 on both
        assert_eq!(topo.units_of(cell("B5")).count(), 3);
        assert_eq!(topo.units_of(cell("A1")).count(), 4);
        assert_eq!(topo.units_of(cell("E5")).count(), 5);
    }

    #[test]
    fn peer_set_sizes() {
        let topo = Topology::diagonal();
        assert_eq!(topo.peers(cell("B5")).len(), 20);
        assert_eq!(topo.peers(cell("A1")).len(), 26);
        assert_eq!(topo.peers(cell("E5")).len(), 32);
        for c in topo.cells() {
            assert!(!topo.peers(c).contains(&c));
        }
    }

    #[test]
    fn diagonal_peers_include_far_corner() {
        let topo = Topology::diagonal();
        assert!(topo.peers(cell("A1")).contains(&cell("I9")));
        assert!(topo.peers(cell("A9")).contains(&cell("I1")));
        assert!(!topo.peers(cell("A2")).contains(&cell("I9")));
    }
}
