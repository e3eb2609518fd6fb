//! `spellmark` - incremental misspelling decoration for rich-text trees
//!
//! An engine that highlights misspelled words inside a live, editable
//! document tree while preserving the cursor across structural surgery,
//! bounding per-update cost, and leaving code, link, and preformatted
//! subtrees untouched. Dictionary logic stays outside: the engine consults a
//! [`SpellOracle`] and defers to whatever it answers.
//!
//! Every content change runs a full strip-and-rebuild pass; there is no
//! persistent diff state. See [`SpellcheckEngine::update`].
//!
//! ```
//! use spellmark::{
//!     CorrectionMenu, Document, Editor, SpellOracle, SpellcheckEngine, Tag,
//! };
//!
//! struct Sloppy;
//!
//! impl SpellOracle for Sloppy {
//!     fn is_misspelled(&self, word: &str) -> bool {
//!         word == "wrold"
//!     }
//! }
//!
//! let mut doc = Document::new(Tag::Div);
//! let para = doc.create_element(Tag::Paragraph);
//! doc.append_child(doc.root(), para).unwrap();
//! let text = doc.create_text("hello wrold");
//! doc.append_child(para, text).unwrap();
//!
//! let mut editor = Editor::new(doc);
//! let mut engine = SpellcheckEngine::new();
//! let stats = engine.update(&mut editor, &Sloppy).unwrap();
//! assert_eq!(stats.decorated, 1);
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Arena ids fit in u32 by construction
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::option_if_let_else)] // match reads better at splice sites

pub mod decorate;
pub mod dom;
pub mod engine;
pub mod error;
pub mod event;
pub mod oracle;
pub mod pool;
pub mod selection;
pub mod strip;
pub mod tokenizer;
pub mod undecorate;

// Re-export core types at crate root
pub use decorate::{MAX_MISSPELLINGS_PER_PASS, decorate};
pub use dom::{DECORATION_CLASS, Document, NodeFlags, NodeId, Tag};
pub use engine::{PassStats, SpellcheckEngine, WordRange};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_log, set_log_callback, set_pass_callback};
pub use oracle::{CorrectionMenu, CorrectionMenuItem, SpellOracle};
pub use pool::DecorationPool;
pub use selection::{Editor, Position, Selection, SelectionSnapshot};
pub use strip::{restore_after_sending, strip_for_sending};
pub use tokenizer::{WordToken, enclosing_word_range, tokenize};
pub use undecorate::undecorate;
