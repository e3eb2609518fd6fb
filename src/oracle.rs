//! The external spell-check collaborator surface.
//!
//! The engine treats the oracle as a black box: a synchronous misspelling
//! verdict, a fire-and-forget hint channel, and a hook for contributing
//! correction items to a context menu. Nothing here stores engine state.

/// Dictionary/misspelling service consumed by the engine.
pub trait SpellOracle {
    /// Synchronous, side-effect-free misspelling verdict.
    ///
    /// Implementations backed by something fallible should answer `false`
    /// on failure: the engine degrades to "no highlighting" rather than
    /// aborting a pass.
    fn is_misspelled(&self, word: &str) -> bool;

    /// Best-effort asynchronous priming with the full document text.
    ///
    /// Callers never wait for this, and [`is_misspelled`] is not guaranteed
    /// to reflect the most recent hint. The default does nothing.
    ///
    /// [`is_misspelled`]: SpellOracle::is_misspelled
    fn provide_hint_text(&self, full_text: &str) {
        let _ = full_text;
    }

    /// Append correction items for `word` to a context menu being built.
    ///
    /// The default contributes nothing. Implementations that learn words do
    /// so through their own UI; the engine only hears about it when the
    /// host dispatches the resulting [`CorrectionMenuItem::LearnWord`].
    fn append_correction_menu_items(&self, word: &str, menu: &mut CorrectionMenu) {
        let _ = (word, menu);
    }
}

/// One entry an oracle contributed to the correction menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorrectionMenuItem {
    /// Replace the word under the cursor with this text.
    Correction(String),
    /// The named word was (or will be) learned by the oracle's own UI;
    /// dispatching this only re-runs the update pass.
    LearnWord(String),
    /// Visual divider between suggestion groups.
    Separator,
}

/// Context menu under construction for the word at the cursor.
#[derive(Clone, Debug, Default)]
pub struct CorrectionMenu {
    items: Vec<CorrectionMenuItem>,
}

impl CorrectionMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: CorrectionMenuItem) {
        self.items.push(item);
    }

    #[must_use]
    pub fn items(&self) -> &[CorrectionMenuItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
