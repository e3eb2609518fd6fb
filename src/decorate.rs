//! The core walk-tokenize-wrap pass.
//!
//! Walks eligible text in document order, consults the oracle word by word,
//! and isolates each misspelled word into its own decoration marker, rebasing
//! the selection as text nodes split. The pass is stateless: nothing survives
//! between calls except the tree and the selection themselves.

use std::collections::VecDeque;

use crate::dom::{Document, NodeFlags, NodeId, Tag};
use crate::error::{Error, Result};
use crate::oracle::SpellOracle;
use crate::pool::DecorationPool;
use crate::selection::{Position, SelectionSnapshot};
use crate::tokenizer::tokenize;

/// Most misspellings wrapped in a single pass; anything beyond stays
/// undecorated until the next content change triggers another pass.
///
/// TODO: surrounding product copy says up to 30 words per pass, but the
/// shipped comparison has always enforced 16. Confirm the intended number
/// with the product owner before changing either.
pub const MAX_MISSPELLINGS_PER_PASS: usize = 16;

/// Decorate misspelled words under the root.
///
/// Returns `(decorated, cap_reached)`: how many markers were created and
/// whether the pass halted at the cap with at least one more misspelling
/// left undecorated.
pub fn decorate<O>(
    doc: &mut Document,
    snapshot: &mut SelectionSnapshot,
    pool: &mut DecorationPool,
    oracle: &O,
) -> Result<(usize, bool)>
where
    O: SpellOracle + ?Sized,
{
    let mut queue = collect_text_nodes(doc);
    let mut decorated = 0;

    'queue: while let Some(node) = queue.pop_front() {
        // Content may have changed since collection due to earlier splits;
        // tokenize whatever the node holds now.
        let Some(text) = doc.text(node).map(str::to_owned) else {
            continue;
        };
        for token in tokenize(&text) {
            if !oracle.is_misspelled(token.word) {
                continue;
            }
            let end = token.end();
            let focus = snapshot.focus();
            if focus.node == node && focus.offset == end {
                // Caret sits immediately after the word: the user is still
                // typing it. Skip it this pass, keep scanning the node.
                continue;
            }
            if decorated >= MAX_MISSPELLINGS_PER_PASS {
                // A misspelling past the cap is what makes the pass
                // incomplete; clean trailing text does not.
                return Ok((decorated, true));
            }

            // Isolate the word in its own text node, then swap in a marker.
            let word_node = if token.start > 0 {
                doc.split_text(node, token.start)?
            } else {
                node
            };
            let tail = if doc.text_len(word_node).unwrap_or(token.len) > token.len {
                Some(doc.split_text(word_node, token.len)?)
            } else {
                None
            };
            let deco = pool.acquire(doc, token.word)?;
            doc.replace_child(word_node, deco)?;
            doc.remove(word_node)?;
            let deco_text = doc
                .children(deco)
                .first()
                .copied()
                .ok_or(Error::NodeNotFound(deco))?;

            snapshot.rebase(|p| {
                if p.node != node {
                    return None;
                }
                if p.offset > end {
                    tail.map(|t| Position::new(t, p.offset - end))
                } else if p.offset >= token.start {
                    Some(Position::new(deco_text, p.offset - token.start))
                } else {
                    None
                }
            });

            decorated += 1;
            if let Some(tail) = tail {
                // The remainder may hold more misspellings; scan it next.
                queue.push_front(tail);
            }
            continue 'queue;
        }
    }

    Ok((decorated, false))
}

/// Text nodes in document order, skipping excluded subtrees entirely.
fn collect_text_nodes(doc: &Document) -> VecDeque<NodeId> {
    let mut queue = VecDeque::new();
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        if doc.is_text(id) {
            queue.push_back(id);
            continue;
        }
        let skip = doc.tag(id).is_some_and(Tag::is_excluded)
            || doc
                .flags(id)
                .intersects(NodeFlags::SPELLCHECK_OFF | NodeFlags::DECORATION);
        if skip {
            continue;
        }
        stack.extend(doc.children(id).iter().rev());
    }
    queue
}
