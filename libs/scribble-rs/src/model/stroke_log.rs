use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

use super::stroke::Stroke;

/// Linear undo history of a drawing. Every stroke is in exactly one of the two stacks; the
/// pixels of a drawing are a function of `history` alone.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StrokeLog {
    history: Vec<Stroke>,
    redo: Vec<Stroke>,
}

impl StrokeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed stroke. Anything undone before this point can no longer be redone.
    pub fn record(&mut self, stroke: Stroke) {
        if !self.redo.is_empty() {
            debug!(discarded = self.redo.len(), "recording truncated redo stack");
            self.redo.clear();
        }
        self.history.push(stroke);
    }

    pub fn undo(&mut self) -> Option<Stroke> {
        let stroke = self.history.pop()?;
        self.redo.push(stroke.clone());
        Some(stroke)
    }

    pub fn redo(&mut self) -> Option<Stroke> {
        let stroke = self.redo.pop()?;
        self.history.push(stroke.clone());
        Some(stroke)
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.redo.clear();
    }

    /// Applied strokes, oldest first.
    pub fn history(&self) -> &[Stroke] {
        &self.history
    }

    /// Undone strokes, most recently undone last.
    pub fn redo_stack(&self) -> &[Stroke] {
        &self.redo
    }

    pub fn has_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Debug for StrokeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrokeLog")
            .field("history", &self.history.len())
            .field("redo", &self.redo.len())
            .finish()
    }
}
