//! Frames a diagram for drawing.
//!
//! Chord charts show a shape in a compact window of frets with a label for
//! where on the neck the window starts. This pass decides that framing at
//! render time and never touches the stored diagram, so it applies equally to
//! library shapes and transposed ones.

use crate::config::DEFAULT_WINDOW;
use crate::fretboard::{lowest_and_highest_fretted_position, ChordDiagram, Nut, StringPositions};

/// A read-only view of a diagram as it should be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayDiagram {
    /// Positions relative to the first drawn fret
    pub positions: StringPositions,

    /// Barre relative to the first drawn fret
    pub nut: Nut,

    /// Fret the window starts at, 0 when drawn from the nut of the guitar
    pub transport: u8,
}

impl DisplayDiagram {
    /// The position marker drawn beside the diagram, such as `8ª`.
    pub fn transport_label(&self) -> Option<String> {
        if self.transport > 0 {
            Some(format!("{}ª", self.transport))
        } else {
            None
        }
    }
}

/// Frame a diagram in the default five fret window.
pub fn normalize_for_display(diagram: &ChordDiagram) -> DisplayDiagram {
    normalize_for_display_within(diagram, DEFAULT_WINDOW)
}

/// Frame a diagram so that it fits a window of `window` frets.
///
/// A diagram already fitting is drawn as is with its own `transport`.
/// Otherwise it is shifted so that its barre, or its lowest fretted note when
/// there is none, lands on the first fret. Open strings are never shifted.
///
/// When the computed shift is 0 the diagram is also drawn as is and keeps its
/// stored `transport`, rather than being labelled `1ª`, which is what makes
/// normalizing the output again yield the same output.
pub fn normalize_for_display_within(diagram: &ChordDiagram, window: u8) -> DisplayDiagram {
    let nut = &diagram.nut;
    let (min, max) = lowest_and_highest_fretted_position(&diagram.positions, &diagram.avoid, Some(nut));

    let fits = max <= window && (!nut.visible || nut.position <= window);
    let shift = if nut.visible {
        nut.position.saturating_sub(1)
    } else {
        min.saturating_sub(1)
    };

    if fits || shift == 0 {
        return DisplayDiagram {
            positions: diagram.positions.clone(),
            nut: nut.clone(),
            transport: diagram.transport,
        };
    }

    let mut positions = diagram.positions.clone();
    for position in positions.values_mut().filter(|p| p.is_fretted()) {
        position.fret = position.fret.saturating_sub(shift);
    }

    DisplayDiagram {
        positions,
        nut: Nut { position: nut.position.saturating_sub(shift), ..nut.clone() },
        transport: shift + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{Chord, Pitch, Quality};
    use crate::fretboard::{Avoid, Position};

    fn diagram(positions: &[(u8, u8)], nut: Nut) -> ChordDiagram {
        ChordDiagram::from_library(
            Chord::new(Pitch::C, Quality::Major),
            positions.iter().map(|&(s, f)| (s, Position::new(f, 1))).collect(),
            nut,
            Avoid::new(),
        )
    }

    fn frets(display: &DisplayDiagram) -> Vec<u8> {
        display.positions.values().map(|p| p.fret).collect()
    }

    fn redisplay(source: &ChordDiagram, display: &DisplayDiagram) -> DisplayDiagram {
        let again = ChordDiagram {
            positions: display.positions.clone(),
            nut: display.nut.clone(),
            transport: display.transport,
            ..source.clone()
        };
        normalize_for_display(&again)
    }

    #[test]
    fn compact_shape_is_unchanged() {
        let mut d = diagram(&[(1, 3), (2, 0), (5, 5)], Nut::default());
        d.transport = 4;

        let display = normalize_for_display(&d);
        assert_eq!(display.positions, d.positions);
        assert_eq!(display.transport, 4);
        assert_eq!(display.transport_label(), Some("4ª".to_string()));
    }

    #[test]
    fn high_shape_without_barre() {
        let d = diagram(&[(1, 0), (2, 7), (3, 9), (4, 8)], Nut::default());

        let display = normalize_for_display(&d);
        assert_eq!(frets(&display), vec![0, 1, 3, 2]);
        assert_eq!(display.transport, 7);
        assert_eq!(display.nut.position, 0);
    }

    #[test]
    fn high_shape_with_barre() {
        let d = diagram(&[(2, 9), (3, 9), (4, 8)], Nut::barre((1, 6), 7));

        let display = normalize_for_display(&d);
        assert_eq!(frets(&display), vec![3, 3, 2]);
        assert_eq!(display.nut.position, 1);
        assert_eq!(display.transport, 7);
        assert_eq!(display.transport_label(), Some("7ª".to_string()));
    }

    #[test]
    fn avoided_strings_do_not_set_the_window() {
        let mut d = diagram(&[(1, 2), (2, 3), (6, 12)], Nut::default());
        d.avoid.insert(6);

        let display = normalize_for_display(&d);
        assert_eq!(frets(&display), vec![2, 3, 12]);
        assert_eq!(display.transport, 0);
        assert_eq!(display.transport_label(), None);
    }

    #[test]
    fn idempotent() {
        let cases = vec![
            diagram(&[(2, 9), (3, 9), (4, 8)], Nut::barre((1, 6), 7)),
            diagram(&[(1, 0), (2, 7), (3, 9), (4, 8)], Nut::default()),
            diagram(&[(1, 1), (2, 9)], Nut::default()),
            diagram(&[(1, 3), (2, 12)], Nut::default()),
            diagram(&[(1, 2)], Nut::default()),
        ];

        for d in cases {
            let once = normalize_for_display(&d);
            assert_eq!(redisplay(&d, &once), once, "{:?}", d.positions);
        }
    }

    #[test]
    fn wide_shape_from_the_first_fret_keeps_its_label() {
        let mut d = diagram(&[(1, 1), (2, 9)], Nut::default());

        let display = normalize_for_display(&d);
        assert_eq!(frets(&display), vec![1, 9]);
        assert_eq!(display.transport, 0);

        d.transport = 3;
        assert_eq!(normalize_for_display(&d).transport, 3);
    }

    #[test]
    fn window_is_a_parameter() {
        let d = diagram(&[(2, 7), (3, 6)], Nut::default());

        assert_eq!(normalize_for_display_within(&d, 7).transport, 0);
        assert_eq!(normalize_for_display_within(&d, 5).transport, 6);
        assert_eq!(normalize_for_display_within(&d, 5).transport_label(), Some("6ª".to_string()));
    }
}
