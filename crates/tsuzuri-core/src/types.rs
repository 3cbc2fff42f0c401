use serde::{Deserialize, Serialize};

/// Result of feeding one key to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputStatus {
    /// Key continues a spelling; the unit is not finished yet.
    Ok,
    /// Key completed the current unit.
    Next,
    /// Key was wrong and the unit was already complete (nothing changed).
    Miss,
    /// Key was wrong; the expected character was forced in.
    MissAdvance,
    /// Key was wrong; the forced character completed the unit.
    MissNext,
    /// Key was attributed to the previous nasal unit (`n` -> `nn`).
    Expanded,
    /// Every unit is already complete.
    End,
}

impl InputStatus {
    pub const fn is_miss(self) -> bool {
        matches!(self, Self::Miss | Self::MissAdvance | Self::MissNext)
    }

    /// Whether the call closed a unit and moved the engine forward.
    pub const fn advances(self) -> bool {
        matches!(self, Self::Next | Self::MissNext)
    }
}

/// Result of a backspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackspaceStatus {
    /// One character was removed.
    Back,
    /// A nasal expansion was undone in one step.
    BackExpanded,
    /// Nothing typed yet; no change.
    AtStart,
}

/// Correctness tag recorded for every character in a segment buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Correct,
    Incorrect,
}

/// One entry of a segment's typed log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedChar {
    pub ch: char,
    pub tag: Tag,
}

impl TypedChar {
    pub const fn new(ch: char, tag: Tag) -> Self {
        Self { ch, tag }
    }

    pub const fn is_correct(self) -> bool {
        matches!(self.tag, Tag::Correct)
    }
}

/// Per-round counters. They only ever grow, so backspacing a miss does not
/// hide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub keystrokes: u32,
    pub correct: u32,
    pub misses: u32,
    pub expansions: u32,
    pub backspaces: u32,
    /// Keys received after completion.
    pub rejected: u32,
}

impl Stats {
    pub fn accuracy(&self) -> f64 {
        let total = self.correct + self.misses;
        if total == 0 {
            1.0
        } else {
            f64::from(self.correct) / f64::from(total)
        }
    }

    pub(crate) fn record_input(&mut self, status: InputStatus) {
        match status {
            InputStatus::End => {
                self.rejected += 1;
                return;
            }
            InputStatus::Ok | InputStatus::Next => self.correct += 1,
            InputStatus::Expanded => {
                self.correct += 1;
                self.expansions += 1;
            }
            InputStatus::Miss | InputStatus::MissAdvance | InputStatus::MissNext => {
                self.misses += 1
            }
        }
        self.keystrokes += 1;
    }

    pub(crate) fn record_backspace(&mut self, status: BackspaceStatus) {
        if status != BackspaceStatus::AtStart {
            self.backspaces += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_counts_misses_once() {
        let mut stats = Stats::default();
        assert_eq!(stats.accuracy(), 1.0);

        stats.record_input(InputStatus::Ok);
        stats.record_input(InputStatus::Next);
        stats.record_input(InputStatus::MissAdvance);
        stats.record_input(InputStatus::Expanded);
        assert_eq!(stats.keystrokes, 4);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expansions, 1);
        assert_eq!(stats.accuracy(), 0.75);
    }

    #[test]
    fn test_end_is_not_a_keystroke() {
        let mut stats = Stats::default();
        stats.record_input(InputStatus::End);
        stats.record_backspace(BackspaceStatus::AtStart);
        assert_eq!(stats.keystrokes, 0);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.backspaces, 0);
    }

    #[test]
    fn test_status_helpers() {
        assert!(InputStatus::MissNext.is_miss());
        assert!(InputStatus::MissNext.advances());
        assert!(!InputStatus::Expanded.advances());
        assert!(!InputStatus::Ok.is_miss());
    }
}
