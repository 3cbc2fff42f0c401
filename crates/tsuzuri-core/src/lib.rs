pub mod engine;
pub mod error;
pub mod parser;
pub mod segment;
pub mod segmenter;
pub mod syllable_table;
pub mod types;
pub mod view;

pub use engine::{Engine, Profile};
pub use error::TableError;
pub use segment::Segment;
pub use syllable_table::{default_table, SyllableTable, SyllableUnit};
pub use types::{BackspaceStatus, InputStatus, Stats, Tag, TypedChar};
pub use view::{EngineSnapshot, SegmentSnapshot};
