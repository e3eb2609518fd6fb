//! Send-time transform.
//!
//! Outbound content must not carry decoration markup. [`strip_for_sending`]
//! splices every marker's text back in place and discards the marker nodes
//! outright; the operation is one-directional and the document it runs on is
//! expected to be a disposable copy, not the live editable tree. No
//! selection bookkeeping, no normalization.

use crate::dom::{Document, NodeId};
use crate::error::Result;

/// Remove every decoration node anywhere in `doc`, leaving plain text.
///
/// Markers are freed, never pooled: this copy of the document is on its way
/// out. Returns the number of markers stripped.
pub fn strip_for_sending(doc: &mut Document) -> Result<usize> {
    let decorations: Vec<NodeId> = doc
        .pre_order(doc.root())
        .filter(|&id| doc.is_decoration(id))
        .collect();

    let mut stripped = 0;
    for id in decorations {
        if let Some(&child) = doc.children(id).first() {
            doc.detach(child)?;
            doc.replace_child(id, child)?;
        }
        doc.remove(id)?;
        stripped += 1;
    }
    Ok(stripped)
}

/// The matched pair to [`strip_for_sending`], defined as a no-op:
/// decorations are never restored onto a sent copy.
pub fn restore_after_sending() {}
