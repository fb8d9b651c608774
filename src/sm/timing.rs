//! Beat-to-time conversion from the recorded BPM changes and stops.
//!
//! Beats are held in quarter-beats (the SM file's beats multiplied by 4),
//! so one measure is always 16 units and measure rows share the same
//! arithmetic as the tempo map.

use itertools::Itertools;

use super::model::Stop;

/// The BPM StepMania assumes when a file records none.
const DEFAULT_BPM: f64 = 120.0;

/// Seconds one quarter-beat lasts at `bpm`: a beat is `60 / bpm` seconds
/// and a quarter-beat is a fourth of that.
const fn quarter_beat_seconds(bpm: f64) -> f64 {
    15.0 / bpm
}

/// A tempo segment: from `beat` onward the song runs at `bpm`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BpmChange {
    /// Position in quarter-beats.
    pub beat: f64,
    /// Beats per minute from this position.
    pub bpm: f64,
}

/// A stop as recorded from the `STOPS` tag, before conversion to song
/// time. The exported form is [`Stop`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawStop {
    /// Position in quarter-beats at which the song freezes.
    pub beat: f64,
    /// How long the freeze lasts.
    pub seconds: f64,
}

/// The tempo map of one song: an ordered list of BPM changes, the change
/// in effect at beat 0, and the stops recorded so far.
///
/// Time is monotonic and piecewise linear over the changes; each stop adds
/// a flat offset to everything after its beat.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoMap {
    changes: Vec<BpmChange>,
    base_bpm: Option<f64>,
    stops: Vec<RawStop>,
}

impl TempoMap {
    /// Appends a tempo segment. Changes must arrive in ascending beat
    /// order, as the `BPMS` tag lists them. A change at beat 0 becomes the
    /// base BPM.
    pub fn add_bpm(&mut self, beat: f64, bpm: f64) {
        if beat == 0.0 {
            self.base_bpm = Some(bpm);
        }
        self.changes.push(BpmChange { beat, bpm });
    }

    /// Appends a stop.
    pub fn add_stop(&mut self, beat: f64, seconds: f64) {
        self.stops.push(RawStop { beat, seconds });
    }

    /// The BPM in effect at beat 0, if the file recorded one there.
    #[must_use]
    pub const fn base_bpm(&self) -> Option<f64> {
        self.base_bpm
    }

    /// The recorded tempo segments, in file order.
    #[must_use]
    pub fn bpm_changes(&self) -> &[BpmChange] {
        &self.changes
    }

    /// The recorded stops, still in beat form.
    #[must_use]
    pub fn raw_stops(&self) -> &[RawStop] {
        &self.stops
    }

    /// Converts a position in quarter-beats to song-seconds, walking every
    /// tempo segment up to `beat` and adding the duration of every stop
    /// strictly before it. A note on a stop's own beat plays as the stop
    /// begins.
    ///
    /// Without any recorded change the whole song runs at 120 BPM.
    #[must_use]
    pub fn time_at(&self, beat: f64) -> f64 {
        let Some(first) = self.changes.first() else {
            return beat * quarter_beat_seconds(DEFAULT_BPM) + self.stopped_before(beat);
        };
        // The region before the first change runs at that change's BPM.
        let mut time = beat.min(first.beat).max(0.0) * quarter_beat_seconds(first.bpm);
        time += self
            .changes
            .iter()
            .tuple_windows()
            .map(|(current, next)| {
                let span = next.beat.min(beat) - current.beat.min(beat);
                span.max(0.0) * quarter_beat_seconds(current.bpm)
            })
            .sum::<f64>();
        let last = self.changes.last().unwrap_or(first);
        time += (beat - last.beat).max(0.0) * quarter_beat_seconds(last.bpm);
        time + self.stopped_before(beat)
    }

    /// Translates a raw stop into its exported form: the song time at
    /// which the freeze begins, plus its length.
    #[must_use]
    pub fn export_stop(&self, stop: RawStop) -> Stop {
        Stop {
            time: self.time_at(stop.beat),
            seconds: stop.seconds,
        }
    }

    /// Summed length of every stop strictly before `beat`.
    fn stopped_before(&self, beat: f64) -> f64 {
        self.stops
            .iter()
            .filter(|stop| stop.beat < beat)
            .map(|stop| stop.seconds)
            .sum()
    }
}
