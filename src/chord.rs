//! Defines the fixed vocabularies used to name a chord.
//!
//! A `Chord` only identifies *what* is being played: a root `Pitch`, an
//! optional `Quality` and a `Bass` inversion marker. How it is fingered is the
//! concern of the `fretboard` module.
//!
//! ```
//! use fretwork::chord::{format_name, index_of_bass, index_of_quality, Bass, Chord, Pitch};
//!
//! let chord = Chord {
//!     note: Pitch::C,
//!     complement: index_of_quality("m7"),
//!     bass: index_of_bass("/3").unwrap_or(Bass::TONIC),
//! };
//!
//! assert_eq!(format_name(&chord), "Cm7/3");
//! ```

use std::fmt;

/// The total number of `Pitch` elements.
pub const PITCH_COUNT: usize = 12;

/// Printable names of each `Pitch`, indexed by `Pitch::index`.
pub static PITCH_NAMES: [&str; PITCH_COUNT] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A pitch class of the 12-tone chromatic scale.
///
/// Enharmonics are not distinguished, `Db` is the same value as `C#`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pitch {
    C, Cs, D, Ds, E, F, Fs, G, Gs, A, As, B
}

impl Pitch {
    /// Every pitch in chromatic order starting from `C`.
    pub const ALL: [Pitch; PITCH_COUNT] = [
        Pitch::C, Pitch::Cs, Pitch::D, Pitch::Ds, Pitch::E, Pitch::F,
        Pitch::Fs, Pitch::G, Pitch::Gs, Pitch::A, Pitch::As, Pitch::B,
    ];

    /// Construct a `Pitch` from its chromatic index.
    pub fn from_index(index: usize) -> Option<Pitch> {
        Pitch::ALL.get(index).copied()
    }

    /// Returns the chromatic index of this pitch, `C` being 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the vocabulary name of this pitch.
    pub fn name(self) -> &'static str {
        PITCH_NAMES[self.index()]
    }

    /// Resolve a written note such as `F#` or `Bb`.
    ///
    /// Unlike `index_of_pitch` this accepts flat spellings, which are folded
    /// onto the sharp pitch of the same sound.
    pub fn from_symbol(symbol: &str) -> Option<Pitch> {
        let mut chars = symbol.chars();
        let natural = match chars.next()? {
            'C' => Pitch::C,
            'D' => Pitch::D,
            'E' => Pitch::E,
            'F' => Pitch::F,
            'G' => Pitch::G,
            'A' => Pitch::A,
            'B' => Pitch::B,
            _ => return None,
        };

        let offset: i32 = chars
            .map(|c| match c {
                '#' | '♯' => Some(1),
                'b' | '♭' => Some(-1),
                _ => None,
            })
            .sum::<Option<i32>>()?;

        Some(natural.transposed(offset))
    }

    /// Move this pitch by a number of semitones, wrapping around the octave.
    pub fn transposed(self, semitones: i32) -> Pitch {
        let index = (self.index() as i32 + semitones).rem_euclid(PITCH_COUNT as i32);
        Pitch::ALL[index as usize]
    }

    /// Compute the upward semitone distance from this pitch to `other`.
    ///
    /// The value returned will be less than 12.
    pub fn interval_to(self, other: Pitch) -> usize {
        (other.index() + PITCH_COUNT - self.index()) % PITCH_COUNT
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The total number of `Quality` elements.
pub const QUALITY_COUNT: usize = 14;

/// Vocabulary names of each `Quality`, indexed by `Quality::index`.
pub static QUALITY_NAMES: [&str; QUALITY_COUNT] = [
    "Major", "m", "7", "m7", "7+", "m7(b5)", "6", "m6", "m7(9)", "7(#5)", "°",
    "sus2", "sus4", "9",
];

/// The quality of a chord, called its complement when building a diagram.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    Major,
    Minor,
    Seventh,
    MinorSeventh,
    MajorSeventh,
    HalfDiminished,
    Sixth,
    MinorSixth,
    MinorSeventhNinth,
    SeventhSharpFifth,
    Diminished,
    SuspendedSecond,
    SuspendedFourth,
    Ninth,
}

impl Quality {
    /// Every quality in vocabulary order.
    pub const ALL: [Quality; QUALITY_COUNT] = [
        Quality::Major, Quality::Minor, Quality::Seventh, Quality::MinorSeventh,
        Quality::MajorSeventh, Quality::HalfDiminished, Quality::Sixth,
        Quality::MinorSixth, Quality::MinorSeventhNinth,
        Quality::SeventhSharpFifth, Quality::Diminished,
        Quality::SuspendedSecond, Quality::SuspendedFourth, Quality::Ninth,
    ];

    /// Construct a `Quality` from its vocabulary index.
    pub fn from_index(index: usize) -> Option<Quality> {
        Quality::ALL.get(index).copied()
    }

    /// Returns the vocabulary index of this quality.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the vocabulary name, as shown in a quality picker.
    pub fn name(self) -> &'static str {
        QUALITY_NAMES[self.index()]
    }

    /// Returns the suffix written after the root in a chord name.
    ///
    /// This matches `name` except for `Major`, which is written as nothing.
    pub fn symbol(self) -> &'static str {
        match self {
            Quality::Major => "",
            other => other.name(),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The total number of `Bass` elements.
pub const BASS_COUNT: usize = 12;

/// Vocabulary names of each `Bass`, indexed by `Bass::index`.
pub static BASS_NAMES: [&str; BASS_COUNT] = [
    "Tonic", "/2", "/3", "/4", "/5", "/6", "/7", "/8", "/9", "/10", "/11", "/12",
];

/// The bass note of a chord as an inversion marker.
///
/// Index 0 is the tonic, meaning the root is in the bass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bass(u8);

impl Bass {
    /// Root in the bass, no inversion.
    pub const TONIC: Bass = Bass(0);

    /// Construct a `Bass` from its vocabulary index.
    pub fn from_index(index: usize) -> Option<Bass> {
        if index < BASS_COUNT {
            Some(Bass(index as u8))
        } else {
            None
        }
    }

    /// Returns the vocabulary index of this bass marker.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this marks an inversion rather than the tonic.
    pub fn is_inversion(self) -> bool {
        self.0 > 0
    }

    /// Returns the vocabulary name of this bass marker.
    pub fn name(self) -> &'static str {
        BASS_NAMES[self.index()]
    }
}

impl fmt::Display for Bass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A chord identified by its root, quality and bass.
///
/// This is independent of any fingering of the chord.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chord {
    /// The root note
    pub note: Pitch,

    /// The quality, absent if it could not be resolved
    pub complement: Option<Quality>,

    /// Inversion marker
    pub bass: Bass,
}

impl Chord {
    /// Construct and return a new `Chord` in root position.
    pub fn new(note: Pitch, complement: Quality) -> Chord {
        Chord { note, complement: Some(complement), bass: Bass::TONIC }
    }

    /// Construct and return a new inverted `Chord`.
    pub fn new_inverted(note: Pitch, complement: Quality, bass: Bass) -> Chord {
        Chord { note, complement: Some(complement), bass }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.note.name())?;
        if let Some(complement) = self.complement {
            f.write_str(complement.symbol())?;
        }
        if self.bass.is_inversion() {
            f.write_str(self.bass.name())?;
        }
        Ok(())
    }
}

/// Look up a pitch by its exact vocabulary name.
pub fn index_of_pitch(name: &str) -> Option<Pitch> {
    PITCH_NAMES.iter().position(|&n| n == name).and_then(Pitch::from_index)
}

/// Look up a quality by its exact vocabulary name.
pub fn index_of_quality(name: &str) -> Option<Quality> {
    QUALITY_NAMES.iter().position(|&n| n == name).and_then(Quality::from_index)
}

/// Look up a bass marker by its exact vocabulary name.
pub fn index_of_bass(name: &str) -> Option<Bass> {
    BASS_NAMES.iter().position(|&n| n == name).and_then(Bass::from_index)
}

/// Format the printable name of a chord, such as `Am7/5`.
///
/// A missing quality contributes nothing and the tonic bass is not written.
pub fn format_name(chord: &Chord) -> String {
    chord.to_string()
}
