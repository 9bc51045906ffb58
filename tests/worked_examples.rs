//! End to end checks of transposing library shapes and framing them for display.

use fretwork::{
    format_name, normalize_for_display, parse_symbol, transpose, Chord, ChordDiagram, Finger, Nut,
    Pitch, Position, Quality,
};

fn e_major() -> ChordDiagram {
    ChordDiagram::from_library(
        Chord::new(Pitch::E, Quality::Major),
        vec![
            (2, Position::added(2, 2)),
            (3, Position::added(2, 3)),
            (4, Position::added(1, 1)),
        ].into_iter().collect(),
        Nut::default(),
        Default::default(),
    )
}

fn placement(diagram: &ChordDiagram) -> Vec<(u8, u8, Finger)> {
    diagram.positions.iter().map(|(&s, p)| (s, p.fret, p.finger)).collect()
}

#[test]
fn open_e_to_g() {
    let g = transpose(&e_major(), Pitch::G);

    assert_eq!(
        placement(&g),
        vec![(2, 5, Finger::Digit(3)), (3, 5, Finger::Digit(4)), (4, 4, Finger::Digit(2))]
    );
    assert_eq!(g.nut, Nut { visible: true, strings: (1, 6), position: 4, ..Nut::default() });
    assert_eq!(g.transport, 0);
    assert_eq!(format_name(&g.chord), "G");

    let display = normalize_for_display(&g);
    assert_eq!(display.positions, g.positions);
    assert_eq!(display.transport_label(), None);
}

#[test]
fn open_e_to_b() {
    let b = transpose(&e_major(), Pitch::B);

    assert_eq!(
        placement(&b),
        vec![(2, 2, Finger::Digit(3)), (3, 2, Finger::Digit(4)), (4, 1, Finger::Digit(2))]
    );
    assert_eq!(b.nut, Nut { visible: true, strings: (1, 6), position: 1, ..Nut::default() });
    assert_eq!(b.transport, 8);

    let display = normalize_for_display(&b);
    assert_eq!(display.nut.position, 1);
    assert_eq!(display.transport_label(), Some("8ª".to_string()));
}

#[test]
fn identity_for_every_library_root() {
    for &note in Pitch::ALL.iter() {
        let mut diagram = e_major();
        diagram.chord.note = note;
        diagram.origin = note;

        assert_eq!(transpose(&diagram, note), diagram);
    }
}

#[test]
fn offsets_are_never_negative() {
    let e = e_major();

    for &note in Pitch::ALL.iter() {
        let moved = transpose(&e, note);
        let (lowest, _) = moved.fretted_range();

        assert!(moved.transport == 0 || moved.transport > 5, "{}", note);
        assert!(lowest <= 5, "{} drawn from fret {}", note, lowest);
    }
}

#[test]
fn symbol_seeds_a_transposition() {
    let data = parse_symbol("Gbm7/Db");
    let root = data.root_pitch().unwrap();

    let moved = transpose(&e_major(), root);
    assert_eq!(moved.chord.note, Pitch::Fs);
    assert_eq!(moved.nut.position, 3);
    assert_eq!(moved.transport, 0);
    assert_eq!(data.quality, "m");
    assert_eq!(data.bass, "/Db");
}
