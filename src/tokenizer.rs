//! Word scanning over text-node content.
//!
//! [`tokenize`] yields maximal word runs: one or more word characters,
//! optionally containing interior apostrophes, right single quotes, or
//! hyphens, bounded by a word character on each end. Offsets and lengths are
//! in characters to match the document's position model.
//!
//! [`enclosing_word_range`] answers the context-menu question "which word is
//! under the caret", using Unicode word boundaries and then bridging
//! joiner-connected segments so it agrees with the token grammar.

use unicode_segmentation::UnicodeSegmentation;

/// A word character: alphanumeric or underscore.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters allowed inside a word but not at either end.
pub(crate) fn is_word_joiner(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}' | '-')
}

/// A single word span within a text string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordToken<'a> {
    /// The matched word, verbatim.
    pub word: &'a str,
    /// Character offset of the first character.
    pub start: usize,
    /// Length in characters.
    pub len: usize,
}

impl WordToken<'_> {
    /// Character offset one past the last character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Lazily scan `text` for word tokens, left to right, non-overlapping.
///
/// The iterator borrows `text` and carries no other state; calling
/// `tokenize` again restarts the scan from the beginning.
#[must_use]
pub fn tokenize(text: &str) -> WordTokens<'_> {
    WordTokens {
        text,
        byte: 0,
        chars: 0,
    }
}

/// Iterator over [`WordToken`]s. See [`tokenize`].
#[derive(Clone, Debug)]
pub struct WordTokens<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> Iterator for WordTokens<'a> {
    type Item = WordToken<'a>;

    fn next(&mut self) -> Option<WordToken<'a>> {
        let mut byte = self.byte;
        let mut chars = self.chars;

        // Skip to the next word character. Joiners cannot open a token.
        let mut start = None;
        for c in self.text[byte..].chars() {
            if is_word_char(c) {
                start = Some((byte, chars));
                break;
            }
            byte += c.len_utf8();
            chars += 1;
        }
        let Some((start_byte, start_char)) = start else {
            self.byte = self.text.len();
            self.chars = chars;
            return None;
        };

        // Consume word characters and joiners, remembering where the last
        // word character ended so trailing joiners fall off the token.
        let mut run_byte = start_byte;
        let mut run_char = start_char;
        let mut end_byte = start_byte;
        let mut end_char = start_char;
        for c in self.text[start_byte..].chars() {
            if is_word_char(c) {
                run_byte += c.len_utf8();
                run_char += 1;
                end_byte = run_byte;
                end_char = run_char;
            } else if is_word_joiner(c) {
                run_byte += c.len_utf8();
                run_char += 1;
            } else {
                break;
            }
        }

        self.byte = run_byte;
        self.chars = run_char;
        Some(WordToken {
            word: &self.text[start_byte..end_byte],
            start: start_char,
            len: end_char - start_char,
        })
    }
}

/// Character range `(start, len)` of the word enclosing `caret` (a character
/// offset into `text`), or `None` when the caret is not on a word.
///
/// A caret at either edge of a word counts as on it; when two words abut a
/// boundary the leftmost wins.
#[must_use]
pub fn enclosing_word_range(text: &str, caret: usize) -> Option<(usize, usize)> {
    struct Segment {
        start: usize,
        end: usize,
        wordy: bool,
        joiner: bool,
    }

    let mut segments = Vec::new();
    let mut char_pos = 0;
    for (_, seg) in text.split_word_bound_indices() {
        let len = seg.chars().count();
        segments.push(Segment {
            start: char_pos,
            end: char_pos + len,
            wordy: seg.chars().any(is_word_char),
            joiner: seg.chars().all(is_word_joiner) && !seg.is_empty(),
        });
        char_pos += len;
    }

    let mut i = 0;
    while i < segments.len() {
        if !segments[i].wordy {
            i += 1;
            continue;
        }
        let start = segments[i].start;
        let mut end = segments[i].end;
        let mut j = i + 1;
        // Bridge "well" "-" "known" into one word; a joiner segment only
        // extends the word when a wordy segment follows it directly.
        while j + 1 < segments.len() && segments[j].joiner && segments[j + 1].wordy {
            end = segments[j + 1].end;
            j += 2;
        }
        if caret >= start && caret <= end {
            return Some((start, end - start));
        }
        i = j;
    }
    None
}
