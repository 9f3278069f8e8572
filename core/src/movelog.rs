// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move log formatting for the side panel

/// Move number and side of the first move in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOrigin {
    /// Fullmove number of the first move
    pub number: u32,
    /// Black made the first move
    pub black_first: bool,
}

impl Default for MoveOrigin {
    fn default() -> Self {
        Self {
            number: 1,
            black_first: false,
        }
    }
}

impl MoveOrigin {
    /// Side to move and fullmove number read from a FEN string
    ///
    /// Missing or unparsable fields fall back to White and move 1.
    pub fn from_fen(fen: &str) -> Self {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let black_first = fields.get(1).map_or(false, |side| *side == "b");
        let number = fields
            .get(5)
            .and_then(|n| n.parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1);
        Self { number, black_first }
    }
}

/// Pair SAN moves into numbered lines, e.g. `"1. e4 e5"`
///
/// When Black moves first the opening line holds that move alone, as `"40... Kg7"`.
pub fn paired_lines(san: &[String], origin: MoveOrigin) -> Vec<String> {
    let mut lines = Vec::with_capacity(san.len() / 2 + 1);
    let mut number = origin.number;
    let mut rest = san;

    if origin.black_first {
        if let Some((first, tail)) = san.split_first() {
            lines.push(format!("{}... {}", number, first));
            number += 1;
            rest = tail;
        }
    }

    for pair in rest.chunks(2) {
        let mut line = format!("{}.", number);
        for mv in pair {
            line.push(' ');
            line.push_str(mv);
        }
        lines.push(line);
        number += 1;
    }
    lines
}

/// Lines visible in a panel holding `capacity` lines, scrolled down by `offset`
///
/// An offset past the end yields nothing.
pub fn visible_lines(lines: &[String], offset: usize, capacity: usize) -> &[String] {
    let start = offset.min(lines.len());
    let end = start.saturating_add(capacity).min(lines.len());
    &lines[start..end]
}
