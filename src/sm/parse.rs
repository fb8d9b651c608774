//! The parse driver and header dispatcher.
//!
//! [`SmParser`] owns the song under construction and the shared line
//! cursor. It consumes `#KEY:VALUE;` records one line at a time; when it
//! meets `#NOTES` the chart decoder in [`notes`] takes over the cursor and
//! everything after that point is chart blocks.

mod notes;

use std::path::PathBuf;

use super::{
    SmError, SmOutput, SmWarning,
    cursor::Cursor,
    model::{Song, Stop},
    value,
};

/// Single-pass parser state. Consumed by [`Self::parse`].
pub(crate) struct SmParser<'a> {
    cursor: Cursor<'a>,
    song: Song,
    warnings: Vec<SmWarning>,
}

impl<'a> SmParser<'a> {
    /// Creates a parser over `source` for a song living in `base`.
    pub(crate) fn new(source: &'a str, base: PathBuf) -> Self {
        Self {
            cursor: Cursor::new(source),
            song: Song {
                path: base,
                ..Song::default()
            },
            warnings: Vec::new(),
        }
    }

    /// Runs the parse to completion and finalizes the song.
    pub(crate) fn parse(mut self) -> Result<SmOutput, SmError> {
        loop {
            let Some(line) = self.cursor.next_line() else {
                break;
            };
            if !self.parse_field(line)? {
                break;
            }
        }
        if self.song.dance_tracks.is_empty() {
            return Err(SmError::NoNoteData);
        }
        if self.song.title.is_empty() || self.song.artist.is_empty() {
            return Err(SmError::MissingHeaderFields);
        }
        self.resolve_music_fallback();
        let stops: Vec<Stop> = self
            .song
            .tempo
            .raw_stops()
            .iter()
            .map(|&stop| self.song.tempo.export_stop(stop))
            .collect();
        self.song.stops = stops;
        Ok(SmOutput {
            song: self.song,
            warnings: self.warnings,
        })
    }

    /// Handles one header line. Returns false when `#NOTES` has drained
    /// the remaining input, true to request another line.
    fn parse_field(&mut self, line: &str) -> Result<bool, SmError> {
        if line.is_empty() || line == "\r" {
            return Ok(true);
        }
        if line.starts_with("//") || line.starts_with(';') {
            return Ok(true);
        }
        let Some(colon) = line.find(':') else {
            return Err(SmError::InvalidField {
                line: self.cursor.line(),
            });
        };
        // The key sits between the leading `#` and the first `:`.
        let key = line.get(1..colon).unwrap_or("").trim();
        if key == "NOTES" {
            self.parse_charts()?;
            return Ok(false);
        }

        // The value may wrap over several lines; it ends at `;`.
        let mut value = line[colon + 1..].trim().to_owned();
        while !value.ends_with(';') {
            let Some(continuation) = self.cursor.next_line() else {
                return Err(SmError::UnterminatedValue {
                    key: key.to_owned(),
                    line: self.cursor.line(),
                });
            };
            value.push_str(continuation.trim());
        }
        value.pop();
        if value.is_empty() {
            return Ok(true);
        }

        match key {
            "TITLE" => self.song.title = value.trim_start_matches([' ', ':']).to_owned(),
            "ARTIST" => self.song.artist = value.trim_start_matches(' ').to_owned(),
            "BANNER" => self.song.cover = PathBuf::from(value),
            "MUSIC" => {
                let resolved = self.song.path.join(&value);
                self.song.music.insert("background".to_owned(), resolved);
            }
            "BACKGROUND" => self.song.background = PathBuf::from(value),
            "OFFSET" => self.song.gap = -value::parse_double(&value)?,
            "BPMS" => {
                for (beat, bpm) in value::parse_pair_list(&value) {
                    self.song.tempo.add_bpm(beat * 4.0, bpm);
                }
            }
            "STOPS" => {
                for (beat, seconds) in value::parse_pair_list(&value) {
                    self.song.tempo.add_stop(beat * 4.0, seconds);
                }
            }
            // SM tags this parser deliberately skips.
            "SUBTITLE" | "TITLETRANSLIT" | "SUBTITLETRANSLIT" | "ARTISTTRANSLIT" | "CREDIT"
            | "CDTITLE" | "SAMPLESTART" | "SAMPLELENGTH" | "SELECTABLE" | "BGCHANGE"
            | "BGCHANGES" => {}
            _ => self.warnings.push(SmWarning::UnknownTag {
                name: key.to_owned(),
                line: self.cursor.line(),
            }),
        }
        Ok(true)
    }

    /// Substitutes `music.ogg` next to the song when the header named no
    /// playable music file but that one exists.
    fn resolve_music_fallback(&mut self) {
        let fallback = self.song.path.join("music.ogg");
        if !fallback.exists() {
            return;
        }
        let music = self.song.music.entry("background".to_owned()).or_default();
        if music.as_os_str().is_empty() || !music.exists() {
            *music = fallback;
        }
    }
}
