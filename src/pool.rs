//! Recycling pool for decoration marker nodes.
//!
//! Decoration elements churn on every pass (stripped by the undecorator,
//! recreated by the decorator), so released nodes are kept on a free stack
//! and handed out again instead of reallocating. The pool holds ids into a
//! single [`Document`]; it is owned by the engine instance serving that
//! editor, never shared across documents.

use crate::dom::{DECORATION_CLASS, Document, NodeFlags, NodeId, Tag};
use crate::error::Result;

/// Pool of released decoration nodes available for reuse.
///
/// Reuse is LIFO: the most recently released node is handed out first.
/// There is no capacity bound; the pool grows with churn and never shrinks.
#[derive(Debug, Default)]
pub struct DecorationPool {
    free: Vec<NodeId>,
}

impl DecorationPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of released nodes currently available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Return a decoration element holding `text` as its sole text child.
    ///
    /// Reuses a released node when one is available, constructing a fresh
    /// one otherwise. The text content is overwritten unconditionally, so no
    /// stale word survives reuse. The returned node is detached and ready
    /// for insertion.
    pub fn acquire(&mut self, doc: &mut Document, text: &str) -> Result<NodeId> {
        while let Some(id) = self.free.pop() {
            // Host edits can free a released node behind our back; skip any
            // slot that no longer holds a decoration.
            if !doc.is_decoration(id) || doc.parent(id).is_some() {
                continue;
            }
            match doc.children(id).first().copied() {
                Some(child) => doc.set_text(child, text)?,
                // The undecorator splices the text child out before
                // releasing, so recycled nodes arrive childless.
                None => {
                    let child = doc.create_text(text);
                    doc.append_child(id, child)?;
                }
            }
            return Ok(id);
        }
        let deco = doc.create_element_with(Tag::Span, Some(DECORATION_CLASS), NodeFlags::DECORATION);
        let child = doc.create_text(text);
        doc.append_child(deco, child)?;
        Ok(deco)
    }

    /// Return a detached decoration node to the pool. Its identity may be
    /// handed out again by a later [`acquire`](Self::acquire).
    pub fn release(&mut self, id: NodeId) {
        self.free.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_builds_a_decoration() {
        let mut doc = Document::new(Tag::Div);
        let mut pool = DecorationPool::new();
        let deco = pool.acquire(&mut doc, "wrold").unwrap();
        assert!(doc.is_decoration(deco));
        assert_eq!(doc.tag(deco), Some(Tag::Span));
        assert_eq!(doc.class(deco), Some(DECORATION_CLASS));
        assert_eq!(doc.children(deco).len(), 1);
        let child = doc.children(deco)[0];
        assert_eq!(doc.text(child), Some("wrold"));
    }

    #[test]
    fn release_then_acquire_reuses_identity_and_overwrites_text() {
        let mut doc = Document::new(Tag::Div);
        let mut pool = DecorationPool::new();
        let first = pool.acquire(&mut doc, "aaa").unwrap();
        pool.release(first);
        assert_eq!(pool.len(), 1);

        let second = pool.acquire(&mut doc, "bbb").unwrap();
        assert_eq!(second, first);
        assert!(pool.is_empty());
        let child = doc.children(second)[0];
        assert_eq!(doc.text(child), Some("bbb"));
    }

    #[test]
    fn reuse_is_most_recently_released_first() {
        let mut doc = Document::new(Tag::Div);
        let mut pool = DecorationPool::new();
        let a = pool.acquire(&mut doc, "a").unwrap();
        let b = pool.acquire(&mut doc, "b").unwrap();
        pool.release(a);
        pool.release(b);
        assert_eq!(pool.acquire(&mut doc, "x").unwrap(), b);
        assert_eq!(pool.acquire(&mut doc, "y").unwrap(), a);
    }

    #[test]
    fn acquire_recreates_text_child_after_splice() {
        let mut doc = Document::new(Tag::Div);
        let mut pool = DecorationPool::new();
        let deco = pool.acquire(&mut doc, "word").unwrap();
        let child = doc.children(deco)[0];
        doc.detach(child).unwrap();
        doc.remove(child).unwrap();
        pool.release(deco);

        let again = pool.acquire(&mut doc, "next").unwrap();
        assert_eq!(again, deco);
        let child = doc.children(again)[0];
        assert_eq!(doc.text(child), Some("next"));
    }

    #[test]
    fn freed_slots_are_skipped() {
        let mut doc = Document::new(Tag::Div);
        let mut pool = DecorationPool::new();
        let deco = pool.acquire(&mut doc, "word").unwrap();
        pool.release(deco);
        doc.remove(deco).unwrap();

        // The stale entry is skipped, not resurrected.
        let fresh = pool.acquire(&mut doc, "other").unwrap();
        assert!(doc.is_decoration(fresh));
        assert_eq!(doc.text(doc.children(fresh)[0]), Some("other"));
    }
}
