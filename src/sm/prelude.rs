//! Prelude module for the SM crate.
//!
//! Re-exports the public types of the [`sm`](crate::sm) module for
//! convenient access: `use sm_rs::sm::prelude::*;`.

pub use super::{
    SmError, SmOutput, SmWarning,
    cursor::Cursor,
    model::{
        DanceDifficulty, DanceDifficultyMap, DanceTrack, DanceTracks, Note, NoteKind, Song, Stop,
    },
    parse_sm, parse_sm_with_path, sm_check,
    timing::{BpmChange, RawStop, TempoMap},
    value::{parse_bool, parse_double, parse_int, parse_pair_list},
};
