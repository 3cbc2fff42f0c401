//! Owned, serializable snapshot of an engine for rendering hosts.
//!
//! - hosts only read snapshots, never the engine internals
//! - every field is derived from the state after the last `input`/`backspace`

use crate::engine::Engine;
use crate::segment::Segment;
use crate::types::{Stats, TypedChar};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub canonical: String,
    pub spellings: Vec<String>,
    pub input: String,
    /// Per-character tags for coloring typed text.
    pub typed: Vec<TypedChar>,
    pub expanded: bool,
    /// Spelling currently followed (ghost text source).
    pub display: String,
    pub remaining: String,
    pub expected: Option<char>,
    pub done: bool,
}

impl From<&Segment> for SegmentSnapshot {
    fn from(seg: &Segment) -> Self {
        Self {
            canonical: seg.canonical().to_string(),
            spellings: seg.spellings().to_vec(),
            input: seg.input().to_string(),
            typed: seg.typed().to_vec(),
            expanded: seg.is_expanded(),
            display: seg.display().to_string(),
            remaining: seg.remaining().to_string(),
            expected: seg.expected_char(),
            done: seg.is_done(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub transcription: String,
    pub seg_index: usize,
    pub complete: bool,
    pub segments: Vec<SegmentSnapshot>,
    pub typed_text: String,
    pub remaining_text: String,
    pub stats: Stats,
}

impl EngineSnapshot {
    pub fn capture(engine: &Engine) -> Self {
        Self {
            transcription: engine.transcription().to_string(),
            seg_index: engine.seg_index(),
            complete: engine.is_complete(),
            segments: engine.segments().iter().map(SegmentSnapshot::from).collect(),
            typed_text: engine.typed_text(),
            remaining_text: engine.remaining_text(),
            stats: engine.stats(),
        }
    }

    pub fn current(&self) -> Option<&SegmentSnapshot> {
        self.segments.get(self.seg_index)
    }
}
