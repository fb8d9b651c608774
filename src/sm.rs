//! The parser module of SM (.sm) files.
//!
//! This module works in a single pass: a shared [`cursor::Cursor`] yields
//! logical lines, the header dispatcher consumes `#KEY:VALUE;` records,
//! and on `#NOTES` the chart decoder takes over the same cursor to read
//! the note grids. Timing arithmetic lives in [`timing::TempoMap`],
//! which stamps every note with song-seconds from the recorded BPM changes
//! and stops.
//!
//! Anomalies the format tolerates (unknown tags, unknown difficulty names,
//! a chart replacing an earlier one, holds left open) do not fail the
//! parse; they are collected as [`SmWarning`] values in [`SmOutput`].
//! Structural damage is a fatal [`SmError`] and no song is produced.

use std::path::PathBuf;

use thiserror::Error;

pub mod cursor;
pub mod model;
mod parse;
pub mod prelude;
pub mod timing;
pub mod value;

use self::{model::Song, parse::SmParser};

/// An error occurred when parsing the SM format file. All variants abort
/// the parse; no partial [`Song`] is exposed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmError {
    /// A header line had no `:` separator.
    #[error("invalid format at line {line}, should be #key:value")]
    InvalidField {
        /// The line number of the malformed record.
        line: usize,
    },
    /// A header value ran to end-of-input without its `;` terminator.
    #[error("semicolon missing after value of {key} at line {line}")]
    UnterminatedValue {
        /// The tag whose value was left open.
        key: String,
        /// The line number where input ended.
        line: usize,
    },
    /// A value could not be coerced to an integer.
    #[error("\"{value}\" is not valid integer value")]
    InvalidInt {
        /// The offending text.
        value: String,
    },
    /// A value could not be coerced to a floating-point number.
    #[error("\"{value}\" is not valid floating point value")]
    InvalidFloat {
        /// The offending text.
        value: String,
    },
    /// A value could not be coerced to a boolean.
    #[error("invalid boolean value: {value}")]
    InvalidBool {
        /// The offending text.
        value: String,
    },
    /// Input ended inside a chart preamble.
    #[error("required note data missing at line {line}")]
    MissingNoteData {
        /// The line number where input ended.
        line: usize,
    },
    /// The file contained no chart at all.
    #[error("no note data in the file")]
    NoNoteData,
    /// Title or artist was empty after the header was consumed.
    #[error("required header fields missing")]
    MissingHeaderFields,
    /// A `3` (hold end) appeared on a lane with no open hold.
    #[error("hold end without beginning on lane {lane} at line {line}")]
    HoldEndWithoutBegin {
        /// The 0-based lane of the stray hold end.
        lane: usize,
        /// The line number of the measure separator being flushed.
        line: usize,
    },
}

/// A non-fatal anomaly noticed while parsing. The song is still produced.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmWarning {
    /// A header tag outside the SM vocabulary; its record was dropped.
    #[error("header tag `{name}` not recognized at line {line}")]
    UnknownTag {
        /// The tag name as written.
        name: String,
        /// The line number of the record.
        line: usize,
    },
    /// A difficulty class that maps to none of the five SM names; the chart
    /// was filed under [`model::DanceDifficulty::Unknown`].
    #[error("difficulty class `{name}` not recognized at line {line}")]
    UnknownDifficulty {
        /// The class string as written.
        name: String,
        /// The line number of the class line.
        line: usize,
    },
    /// A later chart replaced an earlier one with the same style and
    /// difficulty.
    #[error("duplicate chart for `{style}` replaces an earlier one")]
    DuplicateChart {
        /// The lower-cased style key.
        style: String,
        /// The difficulty both charts carried.
        difficulty: model::DanceDifficulty,
    },
    /// A hold or roll was still open when its chart ended; it stays in the
    /// output with `end == begin`.
    #[error("hold on lane {lane} left open at end of chart")]
    UnterminatedHold {
        /// The 0-based lane of the open hold.
        lane: usize,
    },
}

/// Output of parsing an SM file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmOutput {
    /// The parsed song.
    pub song: Song,
    /// Warnings that occurred during parsing.
    pub warnings: Vec<SmWarning>,
}

/// Returns whether the buffer is plausibly an SM file: it must begin with
/// `#` followed by an uppercase ASCII letter, and contain a `;` somewhere.
///
/// This is a cheap sniff for picking this parser over sibling format
/// parsers, not a validator.
#[must_use]
pub fn sm_check(data: &[u8]) -> bool {
    data.first() == Some(&b'#')
        && data.get(1).is_some_and(u8::is_ascii_uppercase)
        && data.contains(&b';')
}

/// Parse an SM file from source text.
///
/// The song's base path is left empty, so the `music.ogg` fallback probe is
/// effectively disabled. Use [`parse_sm_with_path`] when the file's
/// directory is known.
///
/// # Errors
///
/// Returns [`SmError`] when the input is structurally damaged, a required
/// header field or chart is missing, or a hold end has no matching begin.
///
/// # Example
///
/// ```
/// use sm_rs::sm::{parse_sm, SmOutput};
///
/// let source = "#TITLE:Example;\n#ARTIST:Someone;\n#BPMS:0=120;\n\
///               #NOTES:\n dance-single:\n :\n EASY:\n 3:\n :\n\
///               1000\n0000\n0000\n0000\n;\n";
/// let SmOutput { song, warnings } = parse_sm(source)?;
/// assert_eq!(song.title, "Example");
/// assert!(warnings.is_empty());
/// # Ok::<(), sm_rs::sm::SmError>(())
/// ```
pub fn parse_sm(source: &str) -> Result<SmOutput, SmError> {
    parse_sm_with_path(source, PathBuf::new())
}

/// Parse an SM file that lives in the directory `base`.
///
/// `base` becomes [`Song::path`]; the `MUSIC` tag and the `music.ogg`
/// fallback resolve relative to it.
///
/// A step of [`parse_sm`].
///
/// # Errors
///
/// Same conditions as [`parse_sm`].
pub fn parse_sm_with_path(
    source: &str,
    base: impl Into<PathBuf>,
) -> Result<SmOutput, SmError> {
    SmParser::new(source, base.into()).parse()
}
