//! Full decoration teardown.
//!
//! Every update begins by stripping all decoration markers, splicing each
//! marker's text child back into its parent, and re-merging the text runs
//! that earlier wrapping split apart. Selection positions that referenced a
//! marker or a merged-away fragment are rebased so the caret resolves to the
//! same character in the flattened text before and after.
//!
//! The whole teardown runs inside one [`crate::Editor::with_mutation`] call;
//! this module only sees the document and the snapshot.

use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::pool::DecorationPool;
use crate::selection::{Position, SelectionSnapshot};

/// Remove every decoration node under the root and normalize text runs.
///
/// Returns the number of decorations removed. Removed markers go back to
/// `pool` for reuse by the next decorate pass.
pub fn undecorate(
    doc: &mut Document,
    snapshot: &mut SelectionSnapshot,
    pool: &mut DecorationPool,
) -> Result<usize> {
    let decorations: Vec<NodeId> = doc
        .pre_order(doc.root())
        .filter(|&id| doc.is_decoration(id))
        .collect();

    let mut removed = 0;
    for id in decorations {
        let Some(&child) = doc.children(id).first() else {
            // Malformed marker with no text child: nothing to splice back.
            doc.remove(id)?;
            continue;
        };
        // A position on the marker itself moves to the start of its text.
        snapshot.rebase(|p| (p.node == id).then(|| Position::new(child, 0)));
        doc.detach(child)?;
        doc.replace_child(id, child)?;
        pool.release(id);
        removed += 1;
    }

    merge_adjacent_text(doc, snapshot, doc.root())?;
    Ok(removed)
}

/// Merge runs of adjacent sibling text nodes throughout the subtree.
///
/// A word split across fragments by prior wrapping recombines into one text
/// run. Positions inside an absorbed node shift into the surviving node, and
/// a child-index position at the seam between the two runs resolves to the
/// merge point inside the surviving node. Indices past the removed sibling
/// shift left by one.
fn merge_adjacent_text(
    doc: &mut Document,
    snapshot: &mut SelectionSnapshot,
    root: NodeId,
) -> Result<()> {
    let elements: Vec<NodeId> = doc
        .pre_order(root)
        .filter(|&id| !doc.is_text(id))
        .collect();

    for element in elements {
        let mut i = 0;
        while i + 1 < doc.children(element).len() {
            let a = doc.children(element)[i];
            let b = doc.children(element)[i + 1];
            if !(doc.is_text(a) && doc.is_text(b)) {
                i += 1;
                continue;
            }
            let a_len = doc.text_len(a).unwrap_or(0);
            let mut merged = doc.text(a).unwrap_or("").to_owned();
            merged.push_str(doc.text(b).unwrap_or(""));
            doc.set_text(a, &merged)?;
            snapshot.rebase(|p| {
                if p.node == b {
                    Some(Position::new(a, a_len + p.offset))
                } else if p.node == element && p.offset == i + 1 {
                    // The boundary between the two runs now falls inside the
                    // merged run, not between siblings.
                    Some(Position::new(a, a_len))
                } else if p.node == element && p.offset > i + 1 {
                    Some(Position::new(element, p.offset - 1))
                } else {
                    None
                }
            });
            doc.remove(b)?;
            // `a` may absorb the next sibling too; stay put.
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;
    use crate::selection::{Selection, SelectionSnapshot};

    /// Paragraph holding "Helo wrold" with "wrold" wrapped in a decoration.
    fn decorated_doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(Tag::Div);
        let para = doc.create_element(Tag::Paragraph);
        doc.append_child(doc.root(), para).unwrap();
        let head = doc.create_text("Helo ");
        doc.append_child(para, head).unwrap();
        let mut pool = DecorationPool::new();
        let deco = pool.acquire(&mut doc, "wrold").unwrap();
        doc.append_child(para, deco).unwrap();
        (doc, para, head, deco)
    }

    fn snapshot_at(node: NodeId, offset: usize) -> SelectionSnapshot {
        SelectionSnapshot::capture(Selection::caret(Position::new(node, offset)))
    }

    #[test]
    fn splices_text_back_and_merges() {
        let (mut doc, para, head, _) = decorated_doc();
        let mut pool = DecorationPool::new();
        let mut snapshot = snapshot_at(head, 0);

        let removed = undecorate(&mut doc, &mut snapshot, &mut pool).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(pool.len(), 1);
        assert_eq!(doc.children(para).len(), 1);
        let only = doc.children(para)[0];
        assert_eq!(doc.text(only), Some("Helo wrold"));
    }

    #[test]
    fn position_on_marker_moves_to_its_text() {
        let (mut doc, para, _, deco) = decorated_doc();
        let mut pool = DecorationPool::new();
        let mut snapshot = snapshot_at(deco, 0);

        undecorate(&mut doc, &mut snapshot, &mut pool).unwrap();
        assert!(snapshot.modified());
        // Rebased to the text child at 0, then merged into the head run.
        let merged = doc.children(para)[0];
        assert_eq!(snapshot.focus(), Position::new(merged, 5));
    }

    #[test]
    fn position_in_spliced_text_keeps_flat_offset() {
        let (mut doc, para, _, deco) = decorated_doc();
        let word_text = doc.children(deco)[0];
        let mut pool = DecorationPool::new();
        // Caret after "wro" inside the decorated word: flat offset 8.
        let mut snapshot = snapshot_at(word_text, 3);

        undecorate(&mut doc, &mut snapshot, &mut pool).unwrap();
        let merged = doc.children(para)[0];
        assert_eq!(snapshot.focus(), Position::new(merged, 8));
        assert_eq!(doc.flatten_text(doc.root()), "Helo wrold");
    }

    #[test]
    fn merge_collapses_three_fragments() {
        let mut doc = Document::new(Tag::Div);
        let para = doc.create_element(Tag::Paragraph);
        doc.append_child(doc.root(), para).unwrap();
        for piece in ["a", "b", "c"] {
            let t = doc.create_text(piece);
            doc.append_child(para, t).unwrap();
        }
        let last = doc.children(para)[2];
        let mut snapshot = snapshot_at(last, 1);

        let root = doc.root();
        merge_adjacent_text(&mut doc, &mut snapshot, root).unwrap();
        assert_eq!(doc.children(para).len(), 1);
        let only = doc.children(para)[0];
        assert_eq!(doc.text(only), Some("abc"));
        assert_eq!(snapshot.focus(), Position::new(only, 3));
    }

    #[test]
    fn child_index_at_the_seam_lands_inside_merged_run() {
        let (mut doc, para, _, _) = decorated_doc();
        let mut pool = DecorationPool::new();
        // Caret between the head run and the marker: flattened offset 5.
        let mut snapshot = snapshot_at(para, 1);

        undecorate(&mut doc, &mut snapshot, &mut pool).unwrap();
        let merged = doc.children(para)[0];
        assert_eq!(doc.text(merged), Some("Helo wrold"));
        assert_eq!(snapshot.focus(), Position::new(merged, 5));
    }

    #[test]
    fn child_index_positions_shift_on_merge() {
        let mut doc = Document::new(Tag::Div);
        let para = doc.create_element(Tag::Paragraph);
        doc.append_child(doc.root(), para).unwrap();
        for piece in ["x", "y"] {
            let t = doc.create_text(piece);
            doc.append_child(para, t).unwrap();
        }
        let span = doc.create_element(Tag::Span);
        doc.append_child(para, span).unwrap();
        // Boundary before the span: child index 2.
        let mut snapshot = snapshot_at(para, 2);

        let root = doc.root();
        merge_adjacent_text(&mut doc, &mut snapshot, root).unwrap();
        assert_eq!(doc.children(para).len(), 2);
        assert_eq!(snapshot.focus(), Position::new(para, 1));
    }
}
