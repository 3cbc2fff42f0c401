use crate::syllable_table::{normalize_punctuation, SyllableUnit, NASAL_CHAR, NASAL_DOUBLED, NASAL_KEY};
use crate::types::{InputStatus, Tag, TypedChar};

/// Matcher for a single unit of the transcription.
///
/// A segment only ever looks at its own spellings. Anything that involves a
/// neighbour (the nasal expansion rule, moving between units) is the
/// engine's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    canonical: String,
    spellings: Vec<String>,
    input: String,
    typed: Vec<TypedChar>,
    expanded: bool,
    source_len: usize,
}

impl Segment {
    /// Segment for a table unit that consumed `source_len` transcription chars.
    pub fn new(unit: &SyllableUnit, source_len: usize) -> Self {
        let mut spellings = unit.spellings.clone();
        if spellings.is_empty() {
            spellings.push(unit.key.clone());
        }
        Self {
            canonical: unit.key.clone(),
            spellings,
            input: String::new(),
            typed: Vec::new(),
            expanded: false,
            source_len,
        }
    }

    /// Single-character unit for anything the table does not know.
    pub fn fallback(c: char) -> Self {
        Self {
            canonical: c.to_string(),
            spellings: vec![c.to_string()],
            input: String::new(),
            typed: Vec::new(),
            expanded: false,
            source_len: 1,
        }
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn spellings(&self) -> &[String] {
        &self.spellings
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn typed(&self) -> &[TypedChar] {
        &self.typed
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Number of transcription characters this unit stands for.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    pub fn default_spelling(&self) -> &str {
        self.spellings.first().unwrap_or(&self.canonical)
    }

    /// The spelling the player is currently following: the first one that
    /// still has the buffer as a prefix, or the default.
    pub fn display(&self) -> &str {
        self.spellings
            .iter()
            .find(|s| s.starts_with(self.input.as_str()))
            .map_or(self.default_spelling(), String::as_str)
    }

    pub fn expected_char(&self) -> Option<char> {
        self.display().chars().nth(self.typed.len())
    }

    /// Display characters not typed yet.
    pub fn remaining(&self) -> &str {
        let display = self.display();
        match display.char_indices().nth(self.typed.len()) {
            Some((i, _)) => &display[i..],
            None => "",
        }
    }

    pub fn is_done(&self) -> bool {
        self.spellings.iter().any(|s| *s == self.input)
    }

    /// Whether `key` would continue some spelling. Does not mutate.
    pub fn accepts(&self, key: char) -> bool {
        self.spellings
            .iter()
            .any(|s| continues_with(s, &self.input, key))
    }

    pub fn handle_key(&mut self, key: char, normalize: bool) -> InputStatus {
        let key = if normalize {
            self.normalize_key(key)
        } else {
            key
        };

        if self.accepts(key) {
            self.push(key, Tag::Correct);
            return if self.is_done() {
                InputStatus::Next
            } else {
                InputStatus::Ok
            };
        }

        if self.is_done() {
            return InputStatus::Miss;
        }

        // Keep moving along the spelling the buffer already follows so the
        // player still sees progress; the forced char stays tagged until
        // backspaced.
        let target = self
            .spellings
            .iter()
            .find(|s| s.starts_with(self.input.as_str()))
            .map_or(self.default_spelling(), String::as_str);
        let Some(forced) = target.chars().nth(self.typed.len()) else {
            return InputStatus::Miss;
        };
        self.push(forced, Tag::Incorrect);

        if self.is_done() {
            InputStatus::MissNext
        } else {
            InputStatus::MissAdvance
        }
    }

    /// Removes the last typed char. Returns false when the buffer is empty.
    pub fn backspace(&mut self) -> bool {
        if self.input.pop().is_none() {
            return false;
        }
        self.typed.pop();
        true
    }

    fn normalize_key(&self, key: char) -> char {
        match self.expected_char() {
            Some(expected) if normalize_punctuation(expected) == Some(key) => expected,
            _ => key,
        }
    }

    fn push(&mut self, c: char, tag: Tag) {
        self.input.push(c);
        self.typed.push(TypedChar::new(c, tag));
    }

    pub(crate) fn is_nasal(&self) -> bool {
        self.canonical == NASAL_KEY
    }

    /// Bare nasal typed as a single `n`, not expanded yet, and with `nn`
    /// among its spellings so the doubled buffer is still complete.
    pub(crate) fn is_minimal_nasal(&self) -> bool {
        self.is_nasal()
            && !self.expanded
            && self.input == NASAL_KEY
            && self.spellings.iter().any(|s| s == NASAL_DOUBLED)
    }

    pub(crate) fn is_doubled_nasal(&self) -> bool {
        self.expanded && self.input == NASAL_DOUBLED
    }

    pub(crate) fn expand(&mut self) {
        self.push(NASAL_CHAR, Tag::Correct);
        self.expanded = true;
    }

    pub(crate) fn clear(&mut self) {
        self.input.clear();
        self.typed.clear();
        self.expanded = false;
    }
}

fn continues_with(spelling: &str, input: &str, key: char) -> bool {
    spelling
        .strip_prefix(input)
        .is_some_and(|rest| rest.starts_with(key))
}
