//! Fuzz target for the full update cycle.
//!
//! Arbitrary text and caret placement must never panic or lose document
//! text through a decorate/undecorate cycle.

#![no_main]

use libfuzzer_sys::fuzz_target;
use spellmark::{Document, Editor, SpellOracle, SpellcheckEngine, Tag};

struct FlagShort;

impl SpellOracle for FlagShort {
    fn is_misspelled(&self, word: &str) -> bool {
        word.len() <= 3
    }
}

fuzz_target!(|input: (String, usize)| {
    let (text, caret) = input;
    let mut doc = Document::new(Tag::Div);
    let para = doc.create_element(Tag::Paragraph);
    doc.append_child(doc.root(), para).unwrap();
    let t = doc.create_text(&text);
    doc.append_child(para, t).unwrap();

    let mut editor = Editor::new(doc);
    let len = text.chars().count();
    editor.set_caret(t, caret % (len + 1));

    let mut engine = SpellcheckEngine::new();
    engine.update(&mut editor, &FlagShort).unwrap();
    let doc = editor.document();
    assert_eq!(doc.flatten_text(doc.root()), text);
    engine.update(&mut editor, &FlagShort).unwrap();
});
