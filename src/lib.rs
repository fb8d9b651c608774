//! The StepMania SM format parser.
//!
//! An SM file is a textual song description used by StepMania and its
//! derivatives: a header of `#KEY:VALUE;` records (title, artist, asset
//! paths, tempo map, timing offset, stops) followed by one or more
//! `#NOTES` chart blocks, each a grid of step notes for a (style,
//! difficulty) pair.
//!
//! In detail, our policies are:
//!
//! - Support only UTF-8 (as required `&str` to input).
//! - Parse the tags of the classic SM header; every other tag must still be
//!   a well-formed record and is dropped with a warning.
//! - Strict-fail on structural damage: a chart that cannot be decoded
//!   aborts the whole parse instead of producing a partial song.
//! - Do not support writing the parsed result back into SM text.

pub mod sm;
