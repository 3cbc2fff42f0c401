//! Splits a transcription into units by greedy longest-prefix matching.
//!
//! Never fails: a character no table key starts with becomes a
//! single-character unit spelled by itself.

use crate::segment::Segment;
use crate::syllable_table::SyllableTable;

pub fn segmentize(table: &SyllableTable, transcription: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = transcription;
    while let Some(c) = rest.chars().next() {
        match table.longest_match(rest) {
            Some(unit) => {
                segments.push(Segment::new(unit, unit.key.chars().count()));
                rest = &rest[unit.key.len()..];
            }
            None => {
                segments.push(Segment::fallback(c));
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    segments
}
