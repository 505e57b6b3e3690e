use crate::canvas::MarkId;

// ============================================================================
// MARK HISTORY - linear record of placed marks, newest last
// ============================================================================

/// Placement order of every mark still on the canvas.
///
/// Only the newest entry is ever removable; there is no redo.
#[derive(Debug, Default)]
pub struct MarkHistory {
    marks: Vec<MarkId>,
}

impl MarkHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: MarkId) {
        self.marks.push(id);
    }

    /// Pop the newest mark; `None` on an empty history.
    pub fn pop(&mut self) -> Option<MarkId> {
        self.marks.pop()
    }

    pub fn last(&self) -> Option<MarkId> {
        self.marks.last().copied()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}
