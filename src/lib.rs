//! # fretwork
//!
//! A crate providing fretboard chord diagrams and the tools to move them.
//!
//! The `chord` module names chords from fixed vocabularies, the `fretboard`
//! module describes how a chord is held, `transpose` moves a held shape to a
//! new root keeping the hand shape, and `display` frames a diagram within a
//! compact window of frets for drawing. The `parser` module reads free-form
//! chord symbols such as `Cmaj7/E`.
//!
//! Every operation is a pure function over borrowed input returning a new
//! value, so a single library diagram can be transposed to many roots at
//! once.

pub mod chord;
pub mod config;
pub mod display;
pub mod fretboard;
pub mod parser;
pub mod transpose;

pub use chord::{format_name, index_of_bass, index_of_pitch, index_of_quality, Bass, Chord, Pitch, Quality};
pub use config::{ConfigError, Options, OptionsBuilder};
pub use display::{normalize_for_display, normalize_for_display_within, DisplayDiagram};
pub use fretboard::{ChordDiagram, DiagramError, Finger, Nut, Position, StringPositions};
pub use parser::{parse_symbol, ManualChordData};
pub use transpose::{transpose, transpose_with, Target};
