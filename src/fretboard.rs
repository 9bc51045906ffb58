//! Defines how a chord is held on the fretboard.
//!
//! A `ChordDiagram` pairs a `Chord` with the finger placement of every string
//! taking part in the shape, an optional barre (the `Nut`) and the strings
//! which must not sound.
//!
//! ```
//! use fretwork::chord::{Chord, Pitch, Quality};
//! use fretwork::fretboard::{ChordDiagram, Nut, Position, StringPositions};
//!
//! /// Open E major, strings numbered from the low E.
//! let positions: StringPositions = vec![
//!     (2, Position::added(2, 2)),
//!     (3, Position::added(2, 3)),
//!     (4, Position::added(1, 1)),
//! ].into_iter().collect();
//!
//! let e = ChordDiagram::from_library(
//!     Chord::new(Pitch::E, Quality::Major),
//!     positions,
//!     Nut::default(),
//!     Default::default(),
//! );
//!
//! assert_eq!(e.fretted_range(), (1, 2));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::chord::{Chord, Pitch};
use crate::config::{Options, DEFAULT_STRINGS};

/// Which digit of the fretting hand stops a string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Finger {
    /// A numbered finger, 1 being the index finger.
    Digit(u8),

    /// The thumb wrapped around the neck.
    Thumb,

    /// The string is touched to mute it rather than fretted.
    Muted,
}

impl Finger {
    /// Renumber a digit by `delta`, saturating at 0.
    ///
    /// The `Thumb` and `Muted` markers are not numbered and are returned as is.
    pub fn shifted(self, delta: i32) -> Finger {
        match self {
            Finger::Digit(n) => Finger::Digit((i32::from(n) + delta).clamp(0, i32::from(u8::MAX)) as u8),
            other => other,
        }
    }
}

/// Placement of a single string within a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Fret stopped, 0 for an open string
    pub fret: u8,

    /// Finger used to stop the fret
    pub finger: Finger,

    /// Whether the finger number is shifted when a barre is added or removed
    pub added: bool,
}

impl Position {
    /// Construct a `Position` fretted by a numbered finger.
    pub fn new(fret: u8, finger: u8) -> Position {
        Position { fret, finger: Finger::Digit(finger), added: false }
    }

    /// Construct a `Position` whose finger moves up when a barre takes the
    /// index finger.
    pub fn added(fret: u8, finger: u8) -> Position {
        Position { fret, finger: Finger::Digit(finger), added: true }
    }

    /// Construct an open string.
    pub fn open() -> Position {
        Position { fret: 0, finger: Finger::Digit(0), added: false }
    }

    /// Returns true if this string is stopped at a fret.
    pub fn is_fretted(&self) -> bool {
        self.fret > 0
    }
}

/// Placement of every string taking part in a shape, keyed by string number.
///
/// A string missing from the map is not part of the shape, which is distinct
/// from it being avoided.
pub type StringPositions = BTreeMap<u8, Position>;

/// Strings which must not sound.
pub type Avoid = BTreeSet<u8>;

/// A barre or capo laid across a span of strings at one fret.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nut {
    /// Whether the barre is drawn
    pub visible: bool,

    /// Lowest and highest string covered, inclusive
    pub strings: (u8, u8),

    /// Fret the barre stops
    pub position: u8,

    /// Finger laid across the strings
    pub finger: Finger,

    /// Whether the barre was introduced by a transposition rather than
    /// authored in the shape
    pub added: bool,

    /// Whether the barre belongs to the shape's origin position
    pub origin: bool,
}

impl Nut {
    /// Construct a visible barre across `strings` at `position`.
    pub fn barre(strings: (u8, u8), position: u8) -> Nut {
        Nut { visible: true, strings, position, ..Nut::default() }
    }
}

impl Default for Nut {
    fn default() -> Self {
        Nut {
            visible: false,
            strings: (1, DEFAULT_STRINGS),
            position: 0,
            finger: Finger::Digit(1),
            added: false,
            origin: false,
        }
    }
}

/// Errors found when checking a diagram against an instrument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiagramError {
    /// A string number does not exist on the instrument.
    #[error("string {string} is outside 1..={strings}")]
    StringOutOfRange {
        /// The offending string number.
        string: u8,
        /// The number of strings of the instrument.
        strings: u8,
    },

    /// A visible barre spans its strings in reverse.
    #[error("barre spans strings {lo}..{hi} in reverse")]
    ReversedBarre {
        /// The first string of the span.
        lo: u8,
        /// The last string of the span.
        hi: u8,
    },
}

/// A chord together with how it is held on the fretboard.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChordDiagram {
    /// What is being played
    pub chord: Chord,

    /// Finger placement of each string in the shape
    pub positions: StringPositions,

    /// Optional barre
    pub nut: Nut,

    /// Strings that must not sound
    pub avoid: Avoid,

    /// Root the shape was authored for
    pub origin: Pitch,

    /// Fret label shown when the shape is drawn higher up the neck, 0 if none
    pub transport: u8,
}

impl ChordDiagram {
    /// Construct a diagram from a library shape authored for its own root.
    pub fn from_library(chord: Chord, positions: StringPositions, nut: Nut, avoid: Avoid)
        -> ChordDiagram
    {
        ChordDiagram { chord, positions, nut, avoid, origin: chord.note, transport: 0 }
    }

    /// Returns true if the shape sounds the root it was authored for.
    pub fn is_natural(&self) -> bool {
        self.origin == self.chord.note
    }

    /// Lowest and highest fret stopped, see `lowest_and_highest_fretted_position`.
    pub fn fretted_range(&self) -> (u8, u8) {
        lowest_and_highest_fretted_position(&self.positions, &self.avoid, Some(&self.nut))
    }

    /// Check that every string referenced exists on the instrument.
    ///
    /// The transposition and display passes never call this and assume their
    /// input is valid.
    pub fn validate(&self, options: &Options) -> Result<(), DiagramError> {
        let strings = options.strings();
        let in_range = |string: u8| {
            if string >= 1 && string <= strings {
                Ok(())
            } else {
                Err(DiagramError::StringOutOfRange { string, strings })
            }
        };

        for &string in self.positions.keys().chain(self.avoid.iter()) {
            in_range(string)?;
        }

        if self.nut.visible {
            let (lo, hi) = self.nut.strings;
            in_range(lo)?;
            in_range(hi)?;
            if lo > hi {
                return Err(DiagramError::ReversedBarre { lo, hi });
            }
        }

        Ok(())
    }
}

/// Compute the lowest and highest fret stopped by the shape.
///
/// Only fretted strings which are not avoided are considered. A visible nut
/// acts as a floor: its fret seeds both bounds. If nothing is fretted the
/// lowest fret reported is 0.
pub fn lowest_and_highest_fretted_position(
    positions: &StringPositions,
    avoid: &Avoid,
    nut: Option<&Nut>,
) -> (u8, u8) {
    let seed = nut.filter(|n| n.visible).map(|n| n.position);

    let frets = positions
        .iter()
        .filter(|&(string, position)| position.is_fretted() && !avoid.contains(string))
        .map(|(_, position)| position.fret);

    let (min, max) = seed.into_iter().chain(frets).fold((None, 0), |(min, max), fret| {
        (Some(min.map_or(fret, |m: u8| m.min(fret))), max.max(fret))
    });

    (min.unwrap_or(0), max)
}

/// Strings of the instrument left out of the shape and not avoided.
///
/// The strings are returned in ascending order.
pub fn unplayed_strings(positions: &StringPositions, avoid: &Avoid, strings: u8) -> Vec<u8> {
    (1..=strings)
        .filter(|string| !positions.contains_key(string) && !avoid.contains(string))
        .collect()
}
