//! The parsed song and its dance tracks.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use super::timing::TempoMap;

/// Map from difficulty to the chart filed under it. Inserting a duplicate
/// difficulty replaces the earlier chart.
pub type DanceDifficultyMap = BTreeMap<DanceDifficulty, DanceTrack>;

/// Map from lower-cased style key (e.g. `dance-single`) to its charts.
pub type DanceTracks = BTreeMap<String, DanceDifficultyMap>;

/// A parsed SM song: header metadata, tempo map, stops and charts.
///
/// Built in one parse pass and immutable afterwards.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Song {
    /// `#TITLE`. Required, non-empty.
    pub title: String,
    /// `#ARTIST`. Required, non-empty.
    pub artist: String,
    /// `#BANNER`, the cover image path as written in the file.
    pub cover: PathBuf,
    /// `#BACKGROUND`, the background image path as written in the file.
    pub background: PathBuf,
    /// Music assets by role; `#MUSIC` fills the `"background"` entry with
    /// the path joined against [`Self::path`].
    pub music: HashMap<String, PathBuf>,
    /// The directory containing the song file.
    pub path: PathBuf,
    /// The negated `#OFFSET`: seconds from audio start to beat 0.
    pub gap: f64,
    /// BPM changes and raw stops recorded from `#BPMS` and `#STOPS`.
    pub tempo: TempoMap,
    /// Stops in exported form: song time and length of each freeze.
    pub stops: Vec<Stop>,
    /// Charts keyed by style, then difficulty.
    pub dance_tracks: DanceTracks,
}

/// A stop in exported form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Song time in seconds at which the freeze begins.
    pub time: f64,
    /// How long the freeze lasts.
    pub seconds: f64,
}

/// What a grid character means for its lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteKind {
    /// `1`, a plain step. Unrecognized letters also decode to this.
    Tap,
    /// `M`, a mine to avoid.
    Mine,
    /// `L`, released instead of pressed.
    Lift,
    /// `2`, opens a hold; its `3` fixes the end time.
    HoldBegin,
    /// `3`, closes the open hold or roll on its lane. Never emitted into a
    /// track; it only mutates the opener's end time.
    HoldEnd,
    /// `4`, opens a roll; paired like a hold.
    Roll,
}

/// One timed note event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// What the player does with it.
    pub kind: NoteKind,
    /// 0-based column.
    pub lane: usize,
    /// Song time in seconds at which the note is hit.
    pub begin: f64,
    /// Equal to `begin` for instantaneous notes, later for holds and
    /// rolls.
    pub end: f64,
}

/// The five difficulty slots of an SM chart, plus a sentinel for names
/// outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DanceDifficulty {
    /// `BEGINNER`.
    Beginner,
    /// `EASY`.
    Easy,
    /// `MEDIUM`.
    Medium,
    /// `HARD`.
    Hard,
    /// `CHALLENGE`.
    Challenge,
    /// Any other class string.
    Unknown,
}

impl DanceDifficulty {
    /// Maps a difficulty class line to its slot; anything unrecognized
    /// becomes [`Self::Unknown`]. Matching is on the upper-cased name.
    #[must_use]
    pub fn from_class(class: &str) -> Self {
        match class.to_ascii_uppercase().as_str() {
            "BEGINNER" => Self::Beginner,
            "EASY" => Self::Easy,
            "MEDIUM" => Self::Medium,
            "HARD" => Self::Hard,
            "CHALLENGE" => Self::Challenge,
            _ => Self::Unknown,
        }
    }
}

/// One chart: its free-form description and the note stream in
/// non-decreasing begin-time order.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DanceTrack {
    /// The chart's description preamble line, often the stepper's name.
    pub description: String,
    /// Notes ordered by measure, row, then lane.
    pub notes: Vec<Note>,
}

impl DanceTrack {
    /// Creates a track from its preamble description and decoded notes.
    #[must_use]
    pub const fn new(description: String, notes: Vec<Note>) -> Self {
        Self { description, notes }
    }
}
