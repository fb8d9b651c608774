//! The chart decoder: preamble lines and measure-delimited note grids.
//!
//! Once the header dispatcher meets `#NOTES`, everything left in the file
//! is chart blocks. Each block is five preamble lines (style, description,
//! difficulty class, meter, radar values) followed by grid rows; lines
//! starting with `,` or `;` close a measure, a line starting with `#`
//! closes the block.

use std::collections::BTreeMap;

use super::SmParser;
use crate::sm::{
    SmError, SmWarning,
    model::{DanceDifficulty, DanceTrack, Note, NoteKind},
};

/// Notes of one row keyed by lane, so a flush walks them in lane order.
type DanceChord = BTreeMap<usize, Note>;

impl SmParser<'_> {
    /// Reads chart blocks until input runs out. The first block must at
    /// least open; after that, end-of-input between blocks is a normal
    /// stop.
    pub(super) fn parse_charts(&mut self) -> Result<(), SmError> {
        let mut first = true;
        loop {
            let Some(line) = self.cursor.next_line() else {
                if first {
                    return Err(SmError::MissingNoteData {
                        line: self.cursor.line(),
                    });
                }
                return Ok(());
            };
            first = false;

            let style = preamble_field(line).to_ascii_lowercase();
            let description = self.preamble_line()?;
            let class = self.preamble_line()?;
            let difficulty = DanceDifficulty::from_class(&class);
            if difficulty == DanceDifficulty::Unknown {
                self.warnings.push(SmWarning::UnknownDifficulty {
                    name: class,
                    line: self.cursor.line(),
                });
            }
            // Difficulty meter and radar values are not interpreted.
            self.preamble_line()?;
            self.preamble_line()?;

            let notes = self.parse_note_grid()?;
            let replaced = self
                .song
                .dance_tracks
                .entry(style.clone())
                .or_default()
                .insert(difficulty, DanceTrack::new(description, notes));
            if replaced.is_some() {
                self.warnings.push(SmWarning::DuplicateChart {
                    style,
                    difficulty,
                });
            }
        }
    }

    /// Pulls the next preamble line and returns its text before the first
    /// `:`, trimmed. End-of-input here is fatal.
    fn preamble_line(&mut self) -> Result<String, SmError> {
        let Some(line) = self.cursor.next_line() else {
            return Err(SmError::MissingNoteData {
                line: self.cursor.line(),
            });
        };
        Ok(preamble_field(line).to_owned())
    }

    /// Decodes grid rows until a `#` line (consumed) or end-of-input.
    ///
    /// Rows accumulate per measure; a `,` or `;` line flushes the measure,
    /// spreading its rows evenly over the measure's time span from the
    /// tempo map.
    fn parse_note_grid(&mut self) -> Result<Vec<Note>, SmError> {
        let mut chords: Vec<DanceChord> = Vec::new();
        let mut notes: Vec<Note> = Vec::new();
        let mut measure = 1u32;
        let mut begin = 0.0f64;
        // Lane -> index into `notes` of the unterminated hold or roll.
        // Ordered so leftover-hold warnings come out in lane order.
        let mut hold_marks: BTreeMap<usize, usize> = BTreeMap::new();

        while let Some(line) = self.cursor.next_line() {
            if line.is_empty() || line == "\r" {
                continue;
            }
            if line.starts_with("//") {
                continue;
            }
            if line.starts_with('#') {
                break;
            }
            if line.starts_with(',') || line.starts_with(';') {
                self.flush_measure(
                    &mut chords,
                    &mut notes,
                    &mut hold_marks,
                    measure,
                    &mut begin,
                )?;
                measure += 1;
                continue;
            }
            chords.push(decode_row(line));
        }

        for &lane in hold_marks.keys() {
            self.warnings.push(SmWarning::UnterminatedHold { lane });
        }
        Ok(notes)
    }

    /// Stamps and emits the rows of one finished measure.
    fn flush_measure(
        &mut self,
        chords: &mut Vec<DanceChord>,
        notes: &mut Vec<Note>,
        hold_marks: &mut BTreeMap<usize, usize>,
        measure: u32,
        begin: &mut f64,
    ) -> Result<(), SmError> {
        let end = self.song.tempo.time_at(f64::from(measure) * 16.0);
        let step = (end - *begin) / chords.len() as f64;
        for (row, chord) in chords.iter().enumerate() {
            let t = *begin + row as f64 * step;
            for (&lane, note) in chord {
                let note = Note {
                    begin: t,
                    end: t,
                    ..*note
                };
                match note.kind {
                    NoteKind::Tap | NoteKind::Mine | NoteKind::Lift => {
                        notes.push(note);
                        hold_marks.remove(&lane);
                    }
                    NoteKind::HoldBegin | NoteKind::Roll => {
                        // End time is fixed by the matching hold end.
                        notes.push(note);
                        hold_marks.insert(lane, notes.len() - 1);
                    }
                    NoteKind::HoldEnd => {
                        let Some(opened) = hold_marks.remove(&lane) else {
                            return Err(SmError::HoldEndWithoutBegin {
                                lane,
                                line: self.cursor.line(),
                            });
                        };
                        notes[opened].end = t;
                    }
                }
            }
        }
        chords.clear();
        *begin = end;
        Ok(())
    }
}

/// The text of a preamble line before its `:` terminator, trimmed.
fn preamble_field(line: &str) -> &str {
    line.split(':').next().unwrap_or(line).trim()
}

/// Translates one grid row into its chord. Unrecognized characters leave
/// their lane empty.
fn decode_row(line: &str) -> DanceChord {
    let mut chord = DanceChord::new();
    for (lane, symbol) in line.chars().enumerate() {
        let kind = match symbol {
            '1' => NoteKind::Tap,
            '2' => NoteKind::HoldBegin,
            '3' => NoteKind::HoldEnd,
            '4' => NoteKind::Roll,
            'M' => NoteKind::Mine,
            'L' => NoteKind::Lift,
            other if other.is_ascii_alphabetic() => NoteKind::Tap,
            _ => continue,
        };
        chord.insert(
            lane,
            Note {
                kind,
                lane,
                begin: 0.0,
                end: 0.0,
            },
        );
    }
    chord
}
