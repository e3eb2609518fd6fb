//! Cursor positions, selections, and the mutation snapshot protocol.
//!
//! Structural passes never touch the live selection directly. They run inside
//! [`Editor::with_mutation`], which hands them a [`SelectionSnapshot`] to
//! rebase as they splice the tree, and applies the snapshot back onto the
//! live selection once, at the end, only if something changed. Exclusive
//! access inside the closure is enforced by borrowing: the closure gets the
//! document and the snapshot, not the editor.

use crate::dom::{Document, NodeId};

/// A location in the document: character offset in a text node, child index
/// in an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

impl Position {
    #[must_use]
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Live cursor state: anchor and focus are independent and may coincide
/// (caret) or differ (range selection).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    #[must_use]
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection with anchor and focus at the same position.
    #[must_use]
    pub fn caret(position: Position) -> Self {
        Self {
            anchor: position,
            focus: position,
        }
    }

    #[must_use]
    pub fn is_caret(&self) -> bool {
        self.anchor == self.focus
    }
}

/// Mutable, rebaseable copy of the live selection used during structural
/// mutation.
///
/// Passes read `anchor`/`focus`, and rewrite them through [`set_anchor`],
/// [`set_focus`], or the [`rebase`] combinator as nodes split, merge, and
/// move. The `modified` flag records whether anything changed; the live
/// selection is only rewritten when it did.
///
/// [`set_anchor`]: SelectionSnapshot::set_anchor
/// [`set_focus`]: SelectionSnapshot::set_focus
/// [`rebase`]: SelectionSnapshot::rebase
#[derive(Clone, Copy, Debug)]
pub struct SelectionSnapshot {
    anchor: Position,
    focus: Position,
    modified: bool,
}

impl SelectionSnapshot {
    /// Capture the current selection with the modified flag cleared.
    #[must_use]
    pub fn capture(selection: Selection) -> Self {
        Self {
            anchor: selection.anchor,
            focus: selection.focus,
            modified: false,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    #[must_use]
    pub fn focus(&self) -> Position {
        self.focus
    }

    #[must_use]
    pub fn modified(&self) -> bool {
        self.modified
    }

    pub fn set_anchor(&mut self, position: Position) {
        self.anchor = position;
        self.modified = true;
    }

    pub fn set_focus(&mut self, position: Position) {
        self.focus = position;
        self.modified = true;
    }

    /// Apply `f` to anchor and focus independently; `Some` rewrites that
    /// position and marks the snapshot modified, `None` leaves it alone.
    pub fn rebase<F>(&mut self, f: F)
    where
        F: Fn(Position) -> Option<Position>,
    {
        if let Some(position) = f(self.anchor) {
            self.anchor = position;
            self.modified = true;
        }
        if let Some(position) = f(self.focus) {
            self.focus = position;
            self.modified = true;
        }
    }
}

/// The editable surface: a document tree plus its live selection.
///
/// The host owns the editor; the engine borrows it per call. Host editing
/// commands may use [`document_mut`] and [`set_selection`] directly, but any
/// mutation that needs to keep the cursor coherent must go through
/// [`with_mutation`].
///
/// [`document_mut`]: Editor::document_mut
/// [`set_selection`]: Editor::set_selection
/// [`with_mutation`]: Editor::with_mutation
#[derive(Clone, Debug)]
pub struct Editor {
    document: Document,
    selection: Selection,
}

impl Editor {
    /// Wrap a document; the selection starts collapsed at the root.
    #[must_use]
    pub fn new(document: Document) -> Self {
        let root = document.root();
        Self {
            document,
            selection: Selection::caret(Position::new(root, 0)),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Collapse the selection to a caret at `(node, offset)`.
    pub fn set_caret(&mut self, node: NodeId, offset: usize) {
        self.selection = Selection::caret(Position::new(node, offset));
    }

    /// Run a structural mutation under the snapshot protocol.
    ///
    /// Captures the live selection, invokes `f` with the document and the
    /// snapshot, then applies the snapshot back if it was modified. The
    /// apply is best-effort per position: a snapshot position whose node is
    /// no longer attached is dropped rather than installed, so a stale
    /// rebase degrades to an unchanged cursor, never a dangling one.
    pub fn with_mutation<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Document, &mut SelectionSnapshot) -> R,
    {
        let mut snapshot = SelectionSnapshot::capture(self.selection);
        let out = f(&mut self.document, &mut snapshot);
        if snapshot.modified() {
            if self.document.is_attached(snapshot.anchor().node) {
                self.selection.anchor = snapshot.anchor();
            }
            if self.document.is_attached(snapshot.focus().node) {
                self.selection.focus = snapshot.focus();
            }
        }
        out
    }
}
