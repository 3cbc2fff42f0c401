use crate::segment::Segment;
use crate::segmenter::segmentize;
use crate::syllable_table::{default_table, SyllableTable, NASAL_CHAR};
use crate::types::{BackspaceStatus, InputStatus, Stats, TypedChar};
use crate::view::EngineSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Matching options. Everything defaults to on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Attribute an extra `n` to a preceding bare nasal (`n` -> `nn`).
    pub nasal_expansion: bool,
    /// Accept `,` for `、`, `-` for `ー` and so on.
    pub normalize_punctuation: bool,
    /// Lower-case ASCII keys and the transcription.
    pub fold_case: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            nasal_expansion: true,
            normalize_punctuation: true,
            fold_case: true,
        }
    }
}

/// Drives the segments of one transcription.
///
/// Every segment before `seg_index` holds a complete spelling. Input after
/// the last segment returns [`InputStatus::End`] instead of failing.
#[derive(Debug, Clone)]
pub struct Engine {
    transcription: String,
    segments: Vec<Segment>,
    seg_index: usize,
    profile: Profile,
    stats: Stats,
}

impl Engine {
    pub fn new(transcription: &str) -> Self {
        Self::with_table(transcription, default_table(), Profile::default())
    }

    pub fn with_profile(transcription: &str, profile: Profile) -> Self {
        Self::with_table(transcription, default_table(), profile)
    }

    pub fn with_table(transcription: &str, table: &SyllableTable, profile: Profile) -> Self {
        let transcription = if profile.fold_case {
            transcription.to_ascii_lowercase()
        } else {
            transcription.to_string()
        };
        let segments = segmentize(table, &transcription);
        debug!(
            "Engine: {:?} split into {} segments",
            transcription,
            segments.len()
        );
        Self {
            transcription,
            segments,
            seg_index: 0,
            profile,
            stats: Stats::default(),
        }
    }

    pub fn input(&mut self, key: char) -> InputStatus {
        let key = if self.profile.fold_case {
            key.to_ascii_lowercase()
        } else {
            key
        };
        let status = self.dispatch(key);
        self.stats.record_input(status);
        trace!(
            "input {:?} -> {:?} ({}/{})",
            key,
            status,
            self.seg_index,
            self.segments.len()
        );
        status
    }

    fn dispatch(&mut self, key: char) -> InputStatus {
        // Runs before the End check: "an" + "n" still doubles the final nasal.
        if self.profile.nasal_expansion && self.try_expand(key) {
            return InputStatus::Expanded;
        }

        let normalize = self.profile.normalize_punctuation;
        let Some(segment) = self.segments.get_mut(self.seg_index) else {
            return InputStatus::End;
        };
        let status = segment.handle_key(key, normalize);
        if status.advances() {
            self.seg_index += 1;
        }
        status
    }

    /// Doubles the previous bare nasal when the current unit has nothing typed
    /// and cannot start with an `n`.
    fn try_expand(&mut self, key: char) -> bool {
        if key != NASAL_CHAR || self.seg_index == 0 {
            return false;
        }
        // Only right after the nasal: the current unit must be untouched.
        if self
            .segments
            .get(self.seg_index)
            .is_some_and(|current| !current.input().is_empty() || current.accepts(key))
        {
            return false;
        }
        let prev_index = self.seg_index - 1;
        let prev = &mut self.segments[prev_index];
        if !prev.is_minimal_nasal() {
            return false;
        }
        prev.expand();
        debug!("Engine: nasal at segment {} expanded", prev_index);
        true
    }

    pub fn backspace(&mut self) -> BackspaceStatus {
        let status = self.step_back();
        self.stats.record_backspace(status);
        trace!(
            "backspace -> {:?} ({}/{})",
            status,
            self.seg_index,
            self.segments.len()
        );
        status
    }

    fn step_back(&mut self) -> BackspaceStatus {
        let at_unit_start = self
            .segments
            .get(self.seg_index)
            .map_or(true, |s| s.input().is_empty());
        if at_unit_start && self.seg_index > 0 {
            self.seg_index -= 1;
        }

        let Some(segment) = self.segments.get_mut(self.seg_index) else {
            return BackspaceStatus::AtStart;
        };
        // Both characters of an expanded nasal go in one step.
        if segment.is_doubled_nasal() {
            segment.clear();
            debug!("Engine: expansion at segment {} undone", self.seg_index);
            return BackspaceStatus::BackExpanded;
        }
        if segment.backspace() {
            BackspaceStatus::Back
        } else {
            BackspaceStatus::AtStart
        }
    }

    pub fn transcription(&self) -> &str {
        &self.transcription
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn seg_index(&self) -> usize {
        self.seg_index
    }

    pub fn is_complete(&self) -> bool {
        self.seg_index == self.segments.len()
    }

    pub fn current_segment(&self) -> Option<&Segment> {
        self.segments.get(self.seg_index)
    }

    pub fn expected_char(&self) -> Option<char> {
        self.current_segment().and_then(Segment::expected_char)
    }

    pub fn typed_chars(&self) -> impl Iterator<Item = &TypedChar> {
        self.segments.iter().flat_map(|s| s.typed().iter())
    }

    pub fn typed_text(&self) -> String {
        self.segments.iter().map(Segment::input).collect()
    }

    /// Display text still to be typed, following the spellings in use.
    pub fn remaining_text(&self) -> String {
        self.segments[self.seg_index..]
            .iter()
            .map(Segment::remaining)
            .collect()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(self)
    }
}
