//! Pass orchestration and the context-menu flow.
//!
//! [`SpellcheckEngine`] owns the decoration pool for one editor and sequences
//! the two passes on every content change: full teardown, then full rebuild.
//! There is no diff state; each update starts from scratch and is bounded by
//! [`MAX_MISSPELLINGS_PER_PASS`](crate::MAX_MISSPELLINGS_PER_PASS).

use crate::decorate::decorate;
use crate::dom::{NodeId, char_to_byte};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log, emit_pass_stats};
use crate::oracle::{CorrectionMenu, CorrectionMenuItem, SpellOracle};
use crate::pool::DecorationPool;
use crate::selection::{Editor, Position, Selection};
use crate::tokenizer::enclosing_word_range;
use crate::undecorate::undecorate;

/// Outcome of one undecorate-then-decorate cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Decoration markers removed by the teardown.
    pub removed: usize,
    /// Decoration markers created by the rebuild.
    pub decorated: usize,
    /// Whether the rebuild halted at the cap with misspellings left
    /// undecorated.
    pub cap_reached: bool,
}

/// Word range resolved by the context-menu lookup: `len` characters starting
/// at character `start` of text node `node`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordRange {
    pub node: NodeId,
    pub start: usize,
    pub len: usize,
}

/// One engine instance per editor. Holds the decoration pool so recycled
/// markers never leak across documents.
#[derive(Debug, Default)]
pub struct SpellcheckEngine {
    pool: DecorationPool,
}

impl SpellcheckEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The pool backing this engine. Mostly useful for instrumentation.
    #[must_use]
    pub fn pool(&self) -> &DecorationPool {
        &self.pool
    }

    /// Run a full pass: strip every decoration, then rebuild, capped.
    ///
    /// Invoke on every content-change notification. Hint priming is handed
    /// to the oracle first but never awaited; the rebuild consults
    /// `is_misspelled` immediately, whether or not the oracle has absorbed
    /// the hint. That ordering is deliberate and load-bearing for latency.
    pub fn update<O>(&mut self, editor: &mut Editor, oracle: &O) -> Result<PassStats>
    where
        O: SpellOracle + ?Sized,
    {
        let full_text = editor.document().flatten_text(editor.document().root());
        oracle.provide_hint_text(&full_text);

        let removed =
            editor.with_mutation(|doc, snapshot| undecorate(doc, snapshot, &mut self.pool))?;
        let (decorated, cap_reached) = editor
            .with_mutation(|doc, snapshot| decorate(doc, snapshot, &mut self.pool, oracle))?;

        let stats = PassStats {
            removed,
            decorated,
            cap_reached,
        };
        emit_log(
            LogLevel::Debug,
            &format!(
                "pass: removed {removed}, decorated {decorated}{}",
                if cap_reached { ", cap reached" } else { "" }
            ),
        );
        emit_pass_stats(&stats);
        Ok(stats)
    }

    /// Build correction items for the word under the cursor.
    ///
    /// Expands the selection to the enclosing word range, then lets the
    /// oracle append its items to `menu`. Returns the resolved range so the
    /// host can feed a chosen item back through
    /// [`apply_menu_item`](Self::apply_menu_item). `None` when the cursor is
    /// not on a word.
    pub fn on_show_context_menu<O>(
        &self,
        editor: &mut Editor,
        oracle: &O,
        menu: &mut CorrectionMenu,
    ) -> Option<WordRange>
    where
        O: SpellOracle + ?Sized,
    {
        let focus = editor.selection().focus;
        let text = editor.document().text(focus.node)?;
        let (start, len) = enclosing_word_range(text, focus.offset)?;
        let from = char_to_byte(text, start)?;
        let to = char_to_byte(text, start + len)?;
        let word = text[from..to].to_owned();

        editor.set_selection(Selection::new(
            Position::new(focus.node, start),
            Position::new(focus.node, start + len),
        ));
        oracle.append_correction_menu_items(&word, menu);
        Some(WordRange {
            node: focus.node,
            start,
            len,
        })
    }

    /// Replace the word at `range` with `replacement`, put the caret after
    /// it, and re-run the full pass.
    pub fn apply_correction<O>(
        &mut self,
        editor: &mut Editor,
        oracle: &O,
        range: WordRange,
        replacement: &str,
    ) -> Result<PassStats>
    where
        O: SpellOracle + ?Sized,
    {
        if !editor.document().is_attached(range.node) {
            return Err(Error::DetachedNode(range.node));
        }
        editor
            .document_mut()
            .replace_text_range(range.node, range.start, range.len, replacement)?;
        editor.set_caret(range.node, range.start + replacement.chars().count());
        self.update(editor, oracle)
    }

    /// Dispatch a chosen context-menu item.
    ///
    /// Corrections rewrite the range and re-run the pass. A learned word
    /// only re-runs the pass (the oracle's own UI did the learning, so the
    /// word stops being flagged on the rebuild). Separators do nothing.
    pub fn apply_menu_item<O>(
        &mut self,
        editor: &mut Editor,
        oracle: &O,
        range: WordRange,
        item: &CorrectionMenuItem,
    ) -> Result<PassStats>
    where
        O: SpellOracle + ?Sized,
    {
        match item {
            CorrectionMenuItem::Correction(replacement) => {
                self.apply_correction(editor, oracle, range, replacement)
            }
            CorrectionMenuItem::LearnWord(_) => self.update(editor, oracle),
            CorrectionMenuItem::Separator => Ok(PassStats::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Tag};

    struct Flagged(&'static [&'static str]);

    impl SpellOracle for Flagged {
        fn is_misspelled(&self, word: &str) -> bool {
            self.0.contains(&word)
        }

        fn append_correction_menu_items(&self, word: &str, menu: &mut CorrectionMenu) {
            menu.push(CorrectionMenuItem::Correction("world".into()));
            menu.push(CorrectionMenuItem::Separator);
            menu.push(CorrectionMenuItem::LearnWord(word.to_owned()));
        }
    }

    fn editor_with_text(text: &str) -> (Editor, NodeId) {
        let mut doc = Document::new(Tag::Div);
        let para = doc.create_element(Tag::Paragraph);
        doc.append_child(doc.root(), para).unwrap();
        let t = doc.create_text(text);
        doc.append_child(para, t).unwrap();
        (Editor::new(doc), t)
    }

    #[test]
    fn update_decorates_and_second_update_recycles() {
        let (mut editor, _) = editor_with_text("Helo wrold");
        let mut engine = SpellcheckEngine::new();
        let oracle = Flagged(&["Helo", "wrold"]);

        let stats = engine.update(&mut editor, &oracle).unwrap();
        assert_eq!(stats.removed, 0);
        assert_eq!(stats.decorated, 2);

        let stats = engine.update(&mut editor, &oracle).unwrap();
        assert_eq!(stats.removed, 2);
        assert_eq!(stats.decorated, 2);
    }

    #[test]
    fn context_menu_resolves_word_and_expands_selection() {
        let (mut editor, t) = editor_with_text("say wrold now");
        let engine = SpellcheckEngine::new();
        let oracle = Flagged(&["wrold"]);
        editor.set_caret(t, 6);

        let mut menu = CorrectionMenu::new();
        let range = engine
            .on_show_context_menu(&mut editor, &oracle, &mut menu)
            .unwrap();
        assert_eq!(range, WordRange { node: t, start: 4, len: 5 });
        assert_eq!(menu.len(), 3);
        assert_eq!(
            editor.selection(),
            Selection::new(Position::new(t, 4), Position::new(t, 9))
        );
    }

    #[test]
    fn context_menu_misses_off_word_cursor() {
        let (mut editor, t) = editor_with_text("a   b");
        let engine = SpellcheckEngine::new();
        editor.set_caret(t, 3);
        let mut menu = CorrectionMenu::new();
        assert!(
            engine
                .on_show_context_menu(&mut editor, &Flagged(&[]), &mut menu)
                .is_none()
        );
        assert!(menu.is_empty());
    }

    #[test]
    fn correction_replaces_text_and_reruns_pass() {
        let (mut editor, t) = editor_with_text("say wrold now");
        let mut engine = SpellcheckEngine::new();
        let oracle = Flagged(&["wrold"]);

        let range = WordRange { node: t, start: 4, len: 5 };
        let stats = engine
            .apply_correction(&mut editor, &oracle, range, "world")
            .unwrap();
        assert_eq!(
            editor.document().flatten_text(editor.document().root()),
            "say world now"
        );
        assert_eq!(stats.decorated, 0);
        assert_eq!(editor.selection().focus, Position::new(t, 9));
    }

    #[test]
    fn learn_item_only_reruns_pass() {
        let (mut editor, t) = editor_with_text("wrold");
        let mut engine = SpellcheckEngine::new();

        engine.update(&mut editor, &Flagged(&["wrold"])).unwrap();
        // Post-learning oracle no longer flags the word.
        let range = WordRange { node: t, start: 0, len: 5 };
        let stats = engine
            .apply_menu_item(
                &mut editor,
                &Flagged(&[]),
                range,
                &CorrectionMenuItem::LearnWord("wrold".into()),
            )
            .unwrap();
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.decorated, 0);
        assert_eq!(
            editor.document().flatten_text(editor.document().root()),
            "wrold"
        );
    }
}
