//! Movable read position over a linear sequence.
//!
//! An executor walks a sequence line by line. When it decides a condition
//! does not hold, it skips the whole node: everything from the opening line
//! through its matching `SequenceEnd`. Nested nodes may share the opening
//! node's tag, so the match is found by counting same-tag openings against
//! same-tag ends.

use crate::line::{LineContent, Marker, SymbolLine};

/// A read position into a slice of lines.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'s> {
    lines: &'s [SymbolLine],
    position: usize,
}

impl<'s> Cursor<'s> {
    /// Creates a cursor at the first line.
    #[must_use]
    pub const fn new(lines: &'s [SymbolLine]) -> Self {
        Self { lines, position: 0 }
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns true once every line has been consumed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.position >= self.lines.len()
    }

    /// Returns the current line without moving.
    #[must_use]
    pub fn peek(&self) -> Option<&'s SymbolLine> {
        self.lines.get(self.position)
    }

    /// Returns the current line and moves past it.
    pub fn advance(&mut self) -> Option<&'s SymbolLine> {
        let line = self.lines.get(self.position)?;
        self.position += 1;
        Some(line)
    }

    /// Moves to `position`, clamped to the end.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.lines.len());
    }

    /// Returns the first line of the condition branch of the node opened
    /// at the current line.
    #[must_use]
    pub fn first_condition(&self) -> Option<&'s SymbolLine> {
        if !opens_branch(self.lines, self.position) {
            return None;
        }
        self.lines
            .get(self.position + 2)
            .filter(|line| line.marker_kind() != Some(Marker::ResultStart))
    }

    /// Moves past the node opened at the current line, through its matching
    /// `SequenceEnd`. Returns false and stays put if the current line does
    /// not open a branch or the branch is unterminated.
    pub fn skip_branch(&mut self) -> bool {
        match branch_end(self.lines, self.position) {
            Some(end) => {
                self.position = end + 1;
                true
            }
            None => false,
        }
    }
}

/// Returns the index of the `SequenceEnd` matching the node opened at
/// `open`, or `None` if `open` does not open a branch or no end matches.
///
/// A line opens a branch when it is a node line directly followed by a
/// `ConditionStart` with the same tag. Collapsed condition nodes have no
/// markers and open nothing.
#[must_use]
pub fn branch_end(lines: &[SymbolLine], open: usize) -> Option<usize> {
    if !opens_branch(lines, open) {
        return None;
    }
    let tag = lines[open].tag();
    let mut depth = 0usize;
    for (index, line) in lines.iter().enumerate().skip(open) {
        if line.tag() != tag {
            continue;
        }
        if opens_branch(lines, index) {
            depth += 1;
        } else if line.is_end() {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

fn opens_branch(lines: &[SymbolLine], index: usize) -> bool {
    let (Some(line), Some(next)) = (lines.get(index), lines.get(index + 1)) else {
        return false;
    };
    matches!(line.content(), LineContent::Node(_))
        && next.tag() == line.tag()
        && next.marker_kind() == Some(Marker::ConditionStart)
}
