//! Shared helpers for integration tests.

#![allow(dead_code)] // Not every test file uses every helper

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use spellmark::{
    CorrectionMenu, CorrectionMenuItem, Document, Editor, NodeId, Position, SpellOracle, Tag,
};

/// Oracle backed by an explicit set of misspelled words. Records every hint
/// it was primed with so tests can assert on the fire-and-forget call.
pub struct StubOracle {
    bad: HashSet<String>,
    suggestions: HashMap<String, String>,
    pub hints: RefCell<Vec<String>>,
}

impl StubOracle {
    pub fn flagging(words: &[&str]) -> Self {
        Self {
            bad: words.iter().map(|w| (*w).to_owned()).collect(),
            suggestions: HashMap::new(),
            hints: RefCell::new(Vec::new()),
        }
    }

    pub fn with_suggestion(mut self, word: &str, replacement: &str) -> Self {
        self.suggestions.insert(word.to_owned(), replacement.to_owned());
        self
    }
}

impl SpellOracle for StubOracle {
    fn is_misspelled(&self, word: &str) -> bool {
        self.bad.contains(word)
    }

    fn provide_hint_text(&self, full_text: &str) {
        self.hints.borrow_mut().push(full_text.to_owned());
    }

    fn append_correction_menu_items(&self, word: &str, menu: &mut CorrectionMenu) {
        if let Some(replacement) = self.suggestions.get(word) {
            menu.push(CorrectionMenuItem::Correction(replacement.clone()));
            menu.push(CorrectionMenuItem::Separator);
        }
        if self.bad.contains(word) {
            menu.push(CorrectionMenuItem::LearnWord(word.to_owned()));
        }
    }
}

/// Editor holding one paragraph with one text node.
pub fn editor_with_paragraph(text: &str) -> (Editor, NodeId) {
    let mut doc = Document::new(Tag::Div);
    let para = doc.create_element(Tag::Paragraph);
    doc.append_child(doc.root(), para).unwrap();
    let t = doc.create_text(text);
    doc.append_child(para, t).unwrap();
    (Editor::new(doc), t)
}

/// Words currently wrapped by decoration markers, in document order.
pub fn decoration_words(doc: &Document) -> Vec<String> {
    doc.pre_order(doc.root())
        .filter(|&id| doc.is_decoration(id))
        .map(|id| doc.flatten_text(id))
        .collect()
}

/// Flat shape fingerprint of the tree, for structural equality checks.
pub fn tree_shape(doc: &Document) -> Vec<String> {
    doc.pre_order(doc.root())
        .map(|id| {
            doc.text(id).map_or_else(
                || {
                    format!(
                        "<{} deco={} children={}>",
                        doc.tag(id).map_or("?", Tag::as_str),
                        doc.is_decoration(id),
                        doc.children(id).len()
                    )
                },
                |t| format!("#text {t:?}"),
            )
        })
        .collect()
}

/// Character offset of `pos` within the document's flattened text.
pub fn flat_offset(doc: &Document, pos: Position) -> Option<usize> {
    fn walk(doc: &Document, node: NodeId, pos: Position, acc: &mut usize) -> Option<usize> {
        if node == pos.node {
            if doc.is_text(node) {
                return Some(*acc + pos.offset);
            }
            let mut sum = *acc;
            for &child in doc.children(node).iter().take(pos.offset) {
                sum += doc.flatten_text(child).chars().count();
            }
            return Some(sum);
        }
        if let Some(text) = doc.text(node) {
            *acc += text.chars().count();
            return None;
        }
        for &child in doc.children(node) {
            if let Some(found) = walk(doc, child, pos, acc) {
                return Some(found);
            }
        }
        None
    }

    let mut acc = 0;
    walk(doc, doc.root(), pos, &mut acc)
}
