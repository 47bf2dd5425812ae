//! Expand/collapse selection for rule cards.
//!
//! At most one card is expanded at a time. The state is a plain value owned
//! by the caller; [`toggle_expand`] returns the next state instead of
//! mutating anything.

/// Index of the expanded card, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    pub const NONE: Selection = Selection(None);

    pub fn expanded(index: usize) -> Self {
        Selection(Some(index))
    }

    pub fn index(self) -> Option<usize> {
        self.0
    }

    pub fn is_expanded(self, index: usize) -> bool {
        self.0 == Some(index)
    }
}

/// Collapse `index` if it is the expanded card, otherwise expand it (which
/// collapses whichever card was open).
#[must_use]
pub fn toggle_expand(current: Selection, index: usize) -> Selection {
    if current.is_expanded(index) {
        Selection::NONE
    } else {
        Selection::expanded(index)
    }
}
