//! Output sink with hold-and-splice.
//!
//! A flatten call writes lines into a [`LineSink`]. Normally lines go
//! straight to the output. A custom handler may switch the sink to holding,
//! produce lines into a side buffer, then splice that buffer into the output
//! right after an earlier line. This lets a handler emit lines out of
//! tree order, for example a consequence placed after a binding it depends
//! on.

use crate::line::SymbolLine;

/// Line output for one flatten call.
///
/// Holding nests. Each [`hold`](LineSink::hold) opens a new buffer frame on
/// top of whatever is currently being written, and each
/// [`splice_after`](LineSink::splice_after) closes the innermost frame into
/// the one beneath it: the enclosing held buffer, or the output once no
/// frame is left. Indices passed to `splice_after` and reported by
/// [`len`](LineSink::len) always refer to that enclosing target, so a
/// handler called inside another handler's held region sees its own lines.
#[derive(Clone, Debug, Default)]
pub struct LineSink {
    lines: Vec<SymbolLine>,
    frames: Vec<Vec<SymbolLine>>,
}

impl LineSink {
    /// Creates an empty sink in the direct state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn target(&mut self) -> &mut Vec<SymbolLine> {
        self.frames.last_mut().unwrap_or(&mut self.lines)
    }

    fn current(&self) -> &[SymbolLine] {
        self.frames.last().unwrap_or(&self.lines)
    }

    /// Appends to the innermost held frame, or to the output when direct.
    pub fn push(&mut self, line: SymbolLine) {
        self.target().push(line);
    }

    /// Opens a new held frame.
    pub fn hold(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Returns true while at least one frame is held.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Number of nested held frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns the lines of the innermost held frame.
    #[must_use]
    pub fn held(&self) -> &[SymbolLine] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }

    /// Closes the innermost held frame, inserting its lines immediately
    /// after line `index` of the frame beneath it. An index past the end
    /// appends.
    ///
    /// Returns the number of lines inserted; zero when not holding.
    pub fn splice_after(&mut self, index: usize) -> usize {
        let Some(buffer) = self.frames.pop() else {
            return 0;
        };
        let target = self.target();
        let at = index.saturating_add(1).min(target.len());
        let count = buffer.len();
        target.splice(at..at, buffer);
        count
    }

    /// Number of lines in the frame currently written to: the innermost
    /// held frame, or the output when direct.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current().len()
    }

    /// Returns true if the frame currently written to is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Returns the output lines, excluding anything still held.
    #[must_use]
    pub fn lines(&self) -> &[SymbolLine] {
        &self.lines
    }

    /// Consumes the sink, returning the output and whatever is still held,
    /// outermost frame first.
    #[must_use]
    pub fn into_parts(self) -> (Vec<SymbolLine>, Vec<SymbolLine>) {
        (self.lines, self.frames.into_iter().flatten().collect())
    }
}
