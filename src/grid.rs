use crate::topology::{Cell, Topology};
use anyhow::{bail, Result};

pub type Digit = u8; // 1..=9

#[inline]
pub const fn all_candidates() -> u16 {
    0b11_1111_1110 // bits 1..=9 set (1022)
}

pub fn bitcount(mask: u16) -> u32 {
    mask.count_ones()
}

pub const fn mask_of(d: Digit) -> u16 {
    1 << d
}

pub fn sole_digit(mask: u16) -> Option<Digit> {
    if bitcount(mask) == 1 {
        Some(mask.trailing_zeros() as Digit)
    } else {
        None
    }
}

pub fn digits_of(mask: u16) -> impl Iterator<Item = Digit> {
    (1..=9).filter(move |&d| mask & mask_of(d) != 0)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    // candidate bitset per cell; bit d means digit d (1..=9) possible.
    // exactly one bit set = solved, zero bits = contradiction
    pub(crate) cands: [u16; 81],
}

impl Grid {
    pub fn blank() -> Self {
        Self {
            cands: [all_candidates(); 81],
        }
    }

    /// Parses an 81-char grid string, '.' for blanks, row-major from A1.
    pub fn parse(s: &str) -> Result<Self> {
        if s.chars().count() != 81 {
            bail!(
                "grid string must be exactly 81 characters, got {}",
                s.chars().count()
            );
        }
        let mut g = Grid::blank();
        for (i, ch) in s.chars().enumerate() {
            match ch {
                '.' => {}
                '1'..='9' => g.cands[i] = mask_of(ch as u8 - b'0'),
                _ => bail!("invalid character {ch:?} at position {i} (expected 1-9 or '.')"),
            }
        }
        Ok(g)
    }

    pub fn candidates(&self, cell: Cell) -> u16 {
        self.cands[cell.idx()]
    }

    pub fn solved_digit(&self, cell: Cell) -> Option<Digit> {
        sole_digit(self.cands[cell.idx()])
    }

    pub fn count_solved(&self) -> usize {
        self.cands.iter().filter(|&&m| bitcount(m) == 1).count()
    }

    pub fn is_solved(&self) -> bool {
        self.cands.iter().all(|&m| bitcount(m) == 1)
    }

    pub(crate) fn has_empty_cell(&self) -> bool {
        self.cands.iter().any(|&m| m == 0)
    }

    /// True when no unit holds the same solved digit twice.
    pub fn is_consistent(&self, topo: &Topology) -> bool {
        topo.unitlist().iter().all(|unit| {
            let mut seen = 0u16;
            for &cell in unit {
                if let Some(d) = self.solved_digit(cell) {
                    if seen & mask_of(d) != 0 {
                        return false;
                    }
                    seen |= mask_of(d);
                }
            }
            true
        })
    }

    pub fn to_compact(&self) -> String {
        self.cands
            .iter()
            .map(|&m| match sole_digit(m) {
                Some(d) => (b'0' + d) as char,
                None => '.',
            })
            .collect()
    }

    pub fn to_pretty_string(&self) -> String {
        let mut s = String::new();
        for r in 0..9 {
            if r % 3 == 0 {
                s.push_str("+-------+-------+-------+\n");
            }
            for c in 0..9 {
                if c % 3 == 0 {
                    s.push('|');
                    s.push(' ');
                }
                match self.solved_digit(Cell { r, c }) {
                    Some(d) => s.push((b'0' + d) as char),
                    None => s.push('·'),
                }
                s.push(' ');
            }
            s.push('|');
            s.push('\n');
        }
        s.push_str("+-------+-------+-------+\n");
        s
    }

    /// Full candidate view, columns padded to the widest remaining set.
    pub fn to_candidate_string(&self) -> String {
        let width = 1 + self
            .cands
            .iter()
            .map(|&m| bitcount(m) as usize)
            .max()
            .unwrap_or(1);
        let line = vec!["-".repeat(width * 3); 3].join("+");
        let mut s = String::new();
        for r in 0..9 {
            for c in 0..9 {
                let text: String = digits_of(self.cands[r * 9 + c])
                    .map(|d| (b'0' + d) as char)
                    .collect();
                let pad = width - text.len();
                let left = pad / 2;
                s.push_str(&" ".repeat(left));
                s.push_str(&text);
                s.push_str(&" ".repeat(pad - left));
                if c == 2 || c == 5 {
                    s.push('|');
                }
            }
            s.push('\n');
            if r == 2 || r == 5 {
                s.push_str(&line);
                s.push('\n');
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEMO: &str =
        "2.............62....1....7...6..8...3...9...7...6..4...4....8....52.............3";

    #[test]
    fn parse_and_compact_round_trip() {
        let g = Grid::parse(DEMO).unwrap();
        assert_eq!(g.to_compact(), DEMO);
        assert_eq!(g.solved_digit(Cell::from_name("A1").unwrap()), Some(2));
        assert_eq!(g.solved_digit(Cell::from_name("I9").unwrap()), Some(3));
        assert_eq!(g.solved_digit(Cell::from_name("A2").unwrap()), None);
        assert_eq!(
            g.candidates(Cell::from_name("A2").unwrap()),
            all_candidates()
        );
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(Grid::parse("123").is_err());
        assert!(Grid::parse(&"1".repeat(82)).is_err());
        assert!(Grid::parse("").is_err());
    }

    #[test]
    fn parse_rejects_invalid_characters() {
        let mut s = DEMO.to_string();
        s.replace_range(0..1, "0");
        assert!(Grid::parse(&s).is_err());
        s.replace_range(0..1, "x");
        assert!(Grid::parse(&s).is_err());
    }

    #[test]
    fn mask_helpers() {
        assert_eq!(bitcount(all_candidates()), 9);
        assert_eq!(sole_digit(mask_of(7)), Some(7));
        assert_eq!(sole_digit(mask_of(7) | mask_of(4)), None);
        assert_eq!(sole_digit(0), None);
        assert_eq!(
            digits_of(mask_of(4) | mask_of(7)).collect::<Vec<_>>(),
            vec![4, 7]
        );
    }

    #[test]
    fn consistency_check_spots_duplicates() {
        let topo = crate::topology::Topology::diagonal();
        let g = Grid::parse(DEMO).unwrap();
        assert!(g.is_consistent(&topo));

        // two 2s in row A
        let mut bad = g.clone();
        bad.cands[1] = mask_of(2);
        assert!(!bad.is_consistent(&topo));
    }

    #[test]
    fn candidate_view_has_separators() {
        let g = Grid::parse(DEMO).unwrap();
        let text = g.to_candidate_string();
        assert_eq!(text.lines().count(), 11);
        assert!(text.contains('|'));
        assert!(text.contains('+'));
    }
}
