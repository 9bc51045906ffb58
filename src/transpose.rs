//! Moves a chord shape along the neck to sound a different root.
//!
//! The hand shape is kept by shifting every fretted string by the same number
//! of frets. Strings the shape leaves open cannot move with it, so the first
//! time a shape leaves its natural root a barre is laid across them.
//!
//! ```
//! use fretwork::chord::{Chord, Pitch, Quality};
//! use fretwork::fretboard::{ChordDiagram, Nut, Position};
//! use fretwork::transpose::transpose;
//!
//! let e = ChordDiagram::from_library(
//!     Chord::new(Pitch::E, Quality::Major),
//!     vec![
//!         (2, Position::added(2, 2)),
//!         (3, Position::added(2, 3)),
//!         (4, Position::added(1, 1)),
//!     ].into_iter().collect(),
//!     Nut::default(),
//!     Default::default(),
//! );
//!
//! let b = transpose(&e, Pitch::B);
//! assert_eq!(b.chord.note, Pitch::B);
//! assert_eq!(b.transport, 8);
//! assert_eq!(b.nut.position, 1);
//! assert_eq!(b.positions[&4].fret, 1);
//! ```

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::chord::{Bass, Chord, Pitch, Quality, PITCH_COUNT};
use crate::config::Options;
use crate::fretboard::{unplayed_strings, Avoid, ChordDiagram};

/// The chord a diagram should be moved to.
///
/// Only the root decides where the shape moves. A missing quality or bass
/// keeps the one of the diagram being transposed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Root to sound
    pub note: Pitch,

    /// Quality of the resulting chord
    pub complement: Option<Quality>,

    /// Bass of the resulting chord
    pub bass: Option<Bass>,
}

impl Target {
    /// Construct a `Target` changing only the root.
    pub fn new(note: Pitch) -> Target {
        Target { note, complement: None, bass: None }
    }

    /// Also change the quality.
    pub fn with_complement(mut self, complement: Quality) -> Target {
        self.complement = Some(complement);
        self
    }

    /// Also change the bass.
    pub fn with_bass(mut self, bass: Bass) -> Target {
        self.bass = Some(bass);
        self
    }

    fn retarget(&self, chord: &Chord) -> Chord {
        Chord {
            note: self.note,
            complement: self.complement.or(chord.complement),
            bass: self.bass.unwrap_or(chord.bass),
        }
    }
}

impl From<Pitch> for Target {
    fn from(note: Pitch) -> Target {
        Target::new(note)
    }
}

impl<'a> From<&'a Chord> for Target {
    fn from(chord: &'a Chord) -> Target {
        Target { note: chord.note, complement: chord.complement, bass: Some(chord.bass) }
    }
}

/// Transpose a diagram for a six string guitar with a five fret window.
///
/// See `transpose_with`.
pub fn transpose<T: Into<Target>>(diagram: &ChordDiagram, target: T) -> ChordDiagram {
    transpose_with(&Options::default(), diagram, target)
}

/// Derive a diagram sounding `target` from the shape of `diagram`.
///
/// The input is never modified. When the target root is the root the shape
/// was authored for and the shape was never moved, the diagram is returned as
/// is, whatever quality or bass the target names. Otherwise every fretted
/// string receives the same fret offset, the barre is introduced, moved or
/// hidden, and a shape which ends up above the display window is re-based so
/// its lowest fret is 1, with `transport` recording where on the neck it
/// really sits.
///
/// A fretted string never becomes open: a shape whose lowest sounding note
/// would land at fret 0 or below moves up an octave, and the re-basing shift
/// never passes the lowest sounding note, even when the barre sits above it.
pub fn transpose_with<T: Into<Target>>(options: &Options, diagram: &ChordDiagram, target: T)
    -> ChordDiagram
{
    let target = target.into();
    let chord = target.retarget(&diagram.chord);

    let (min_fret, _) = diagram.fretted_range();
    let mut nut = diagram.nut.clone();

    // Finger renumbering applied to added notes: +1 when a barre takes the
    // index finger, -1 when it is given back.
    let (offset, aux) = if diagram.origin == target.note {
        if diagram.is_natural() {
            debug!("{} already sits at its natural root", diagram.chord);
            return diagram.clone();
        }

        debug!("returning {} to its natural root {}", diagram.chord, diagram.origin);
        nut.visible = !diagram.is_natural() && nut.added;
        (0, -1)
    } else {
        let delta = target.note.index() as i32 - diagram.origin.index() as i32;
        let mut offset = i32::from(min_fret) + delta;
        if offset < 0 {
            offset += PITCH_COUNT as i32;
        }

        if diagram.is_natural() {
            let open = unplayed_strings(&diagram.positions, &diagram.avoid, options.strings());
            let first = open.first().copied().unwrap_or(1);
            let last = if diagram.avoid.len() >= 2 { first } else { options.strings() };

            debug!("introducing barre over strings {}..={} for {}", first, last, chord);
            nut.strings = (first, last);
            nut.visible = true;
            (offset, 1)
        } else {
            nut.visible = target.note != diagram.chord.note || nut.added;
            (offset, 0)
        }
    };

    debug!(
        "transposing {} to {}: lowest fret {}, offset {}",
        diagram.chord, chord, min_fret, offset
    );

    let mut nut_position = i32::from(nut.position) + offset;

    // Frets stay signed until the shape is re-based so every fretted string
    // keeps the same distance to the others.
    let mut frets: BTreeMap<u8, i32> = diagram
        .positions
        .iter()
        .filter(|(_, p)| p.is_fretted())
        .map(|(&string, p)| (string, i32::from(p.fret) + offset - i32::from(min_fret)))
        .collect();

    // A fretted note may not land on the nut of the guitar, the whole shape
    // moves up an octave instead.
    if sounding_min(&frets, &diagram.avoid).map_or(false, |lowest| lowest < 1) {
        let octave = PITCH_COUNT as i32;
        debug!("{} would reach the nut, moving it up {} frets", chord, octave);

        for fret in frets.values_mut() {
            *fret += octave;
        }
        if nut.visible {
            nut_position += octave;
        }
    }

    let fretted_min = sounding_min(&frets, &diagram.avoid);
    let final_min = match (nut.visible, fretted_min) {
        (true, Some(lowest)) => nut_position.min(lowest),
        (true, None) => nut_position,
        (false, lowest) => lowest.unwrap_or(0),
    };

    let transport = if final_min > i32::from(options.window()) {
        // The barre sets the window unless fingers sit below it.
        let transport = final_min;
        let shift = transport - 1;
        debug!("re-basing {} by {} frets, drawn at {}", chord, shift, transport);

        nut_position = if nut.visible { 1 } else { (nut_position - shift).max(0) };
        for fret in frets.values_mut() {
            *fret -= shift;
        }

        to_fret(transport)
    } else {
        0
    };

    nut.position = to_fret(nut_position);

    let mut positions = diagram.positions.clone();
    for (string, position) in positions.iter_mut() {
        if let Some(&fret) = frets.get(string) {
            let fret = to_fret(fret).max(1);
            trace!("string {}: fret {} -> {}", string, position.fret, fret);

            position.fret = fret;
            position.finger = position.finger.shifted(aux * i32::from(position.added));
        }
    }

    ChordDiagram {
        chord,
        positions,
        nut,
        avoid: diagram.avoid.clone(),
        origin: diagram.origin,
        transport,
    }
}

/// Lowest signed fret among the strings that sound.
fn sounding_min(frets: &BTreeMap<u8, i32>, avoid: &Avoid) -> Option<i32> {
    frets
        .iter()
        .filter(|(string, _)| !avoid.contains(*string))
        .map(|(_, &fret)| fret)
        .min()
}

fn to_fret(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}
