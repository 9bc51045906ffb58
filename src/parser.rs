//! Handles parsing of free-form chord symbols.
//!
//! Parsing is best effort and never fails: text without a recognisable root
//! parses as a plain `C`. The result keeps the pieces as text so an editor can
//! seed its root, quality and bass pickers from whatever the user typed.
//!
//! ```
//! use fretwork::parser::parse_symbol;
//!
//! let data = parse_symbol("F#m7b5/C");
//! assert_eq!(data.root, "F#");
//! assert_eq!(data.quality, "m");
//! assert_eq!(data.bass, "/C");
//! assert_eq!(data.extensions, vec!["7", "b5"]);
//! ```

use combine::parser::char::string;
use combine::{any, attempt, choice, many, one_of, optional, Parser, Stream};

use crate::chord::Pitch;

/// The pieces of a chord symbol as typed by the user.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManualChordData {
    /// Root note, such as `Bb`
    pub root: String,

    /// Quality prefix, one of `dim`, `aug`, `sus2`, `sus4`, `maj`, `m` or empty
    pub quality: String,

    /// Slash bass including the slash, or `Root`
    pub bass: String,

    /// Extensions in the order they were written
    pub extensions: Vec<String>,
}

impl Default for ManualChordData {
    fn default() -> Self {
        ManualChordData {
            root: "C".to_string(),
            quality: String::new(),
            bass: "Root".to_string(),
            extensions: Vec::new(),
        }
    }
}

impl ManualChordData {
    /// Resolve the root to a `Pitch`, folding flats onto sharps.
    pub fn root_pitch(&self) -> Option<Pitch> {
        Pitch::from_symbol(&self.root)
    }

    /// Returns true if the symbol has a slash bass.
    pub fn has_bass(&self) -> bool {
        self.bass.starts_with('/')
    }

    /// The extensions sorted by degree, with altered degrees before natural.
    ///
    /// `extensions` itself keeps the order of the input text, so `C9b5` lists
    /// `9` before `b5` while its canonical order is `b5`, `9`.
    pub fn canonical_extensions(&self) -> Vec<String> {
        let mut sorted = self.extensions.clone();
        sorted.sort_by_key(|e| extension_rank(e));
        sorted
    }
}

fn extension_rank(extension: &str) -> (usize, usize) {
    const DEGREES: [&str; 7] = ["5", "6", "7", "7+", "9", "11", "13"];

    let (alteration, degree) = match extension.chars().next() {
        Some('b') => (0, &extension[1..]),
        Some('#') => (1, &extension[1..]),
        _ => (2, extension),
    };

    let degree = DEGREES.iter().position(|&d| d == degree).unwrap_or(DEGREES.len());
    (degree, alteration)
}

/// Parses a single accidental.
///
/// ```text
/// Accidental : 'b' | '#'
///            ;
/// ```
fn accidental<Input>() -> impl Parser<Input, Output = char>
where
    Input: Stream<Token = char>,
{
    one_of("b#".chars())
}

/// Parses a root note plus at most one accidental.
///
/// ```text
/// Root : [A-G] Accidental?
///      ;
/// ```
fn root<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
{
    (one_of("ABCDEFG".chars()), optional(accidental()))
        .map(|(letter, accidental): (char, Option<char>)| {
            let mut root = letter.to_string();
            root.extend(accidental);
            root
        })
        .expected("Root: [A-G][b#]?")
}

/// Parses the quality prefix following the root.
///
/// The alternatives are tried in order, so `maj` is matched before `m`.
///
/// ```text
/// Quality : 'dim' | 'aug' | 'sus2' | 'sus4' | 'maj' | 'm' | ''
///         ;
/// ```
fn quality<Input>() -> impl Parser<Input, Output = &'static str>
where
    Input: Stream<Token = char>,
{
    optional(choice((
        attempt(string("dim")),
        attempt(string("aug")),
        attempt(string("sus2")),
        attempt(string("sus4")),
        attempt(string("maj")),
        string("m"),
    )))
    .map(|q: Option<&'static str>| q.unwrap_or(""))
}

/// Parses a single, possibly altered, extension.
///
/// ```text
/// Degree    : '5' | '6' | '7+' | '7' | '9' | '11' | '13'
///           ;
///
/// Extension : Accidental? Degree
///           ;
/// ```
fn extension<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
{
    let degree = choice((
        attempt(string("7+")),
        string("5"),
        string("6"),
        string("7"),
        string("9"),
        attempt(string("11")),
        string("13"),
    ));

    (optional(accidental()), degree)
        .map(|(accidental, degree): (Option<char>, &'static str)| {
            let mut extension: String = accidental.into_iter().collect();
            extension.push_str(degree);
            extension
        })
}

/// Scans the rest of the symbol for extensions, skipping anything else.
///
/// ```text
/// Extensions : (Extension | .)*
///            ;
/// ```
fn extensions<Input>() -> impl Parser<Input, Output = Vec<String>>
where
    Input: Stream<Token = char>,
{
    many(choice((
        attempt(extension()).map(Some),
        any().map(|_| None),
    )))
    .map(|found: Vec<Option<String>>| found.into_iter().flatten().collect())
}

/// Recognizes a chord symbol without its slash bass.
///
/// ```text
/// Symbol : Root Quality Extensions
///        ;
/// ```
fn symbol<Input>() -> impl Parser<Input, Output = (String, &'static str, Vec<String>)>
where
    Input: Stream<Token = char>,
{
    (root(), quality(), extensions())
}

/// Split a chord symbol such as `Cmaj7/E` into its pieces.
///
/// Everything after the first `/` is the bass. A symbol which does not start
/// with a note letter, including one with leading whitespace, yields
/// `ManualChordData::default()`.
pub fn parse_symbol(text: &str) -> ManualChordData {
    let (main, bass) = match text.split_once('/') {
        Some((main, bass)) => (main, format!("/{}", bass)),
        None => (text, "Root".to_string()),
    };

    match symbol().parse(main) {
        Ok(((root, quality, extensions), _)) => ManualChordData {
            root,
            quality: quality.to_string(),
            bass,
            extensions,
        },
        Err(_) => ManualChordData::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(extensions: &[&str]) -> Vec<String> {
        extensions.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn parse_root_accidentals() {
        let result = root().parse("A");
        assert_eq!(result, Ok(("A".to_string(), "")));

        let result = root().parse("Bbm");
        assert_eq!(result, Ok(("Bb".to_string(), "m")));

        let result = root().parse("F##");
        assert_eq!(result, Ok(("F#".to_string(), "#")));

        assert!(root().parse("H").is_err());
    }

    #[test]
    fn parse_quality_order() {
        assert_eq!(quality().parse("maj7"), Ok(("maj", "7")));
        assert_eq!(quality().parse("m7"), Ok(("m", "7")));
        assert_eq!(quality().parse("sus4"), Ok(("sus4", "")));
        assert_eq!(quality().parse("sus2"), Ok(("sus2", "")));
        assert_eq!(quality().parse("7"), Ok(("", "7")));
    }

    #[test]
    fn parse_simple_chord() {
        let result = parse_symbol("A#");
        let expected = ManualChordData { root: "A#".to_string(), ..Default::default() };

        assert_eq!(result, expected);
        assert_eq!(result.root_pitch(), Some(Pitch::As));
    }

    #[test]
    fn parse_slash_chord() {
        let result = parse_symbol("Cmaj7/E");

        assert_eq!(result.root, "C");
        assert_eq!(result.quality, "maj");
        assert_eq!(result.bass, "/E");
        assert!(result.has_bass());
        assert_eq!(result.extensions, ext(&["7"]));
    }

    #[test]
    fn parse_altered_extensions() {
        let result = parse_symbol("F#m7b5");
        assert_eq!(result.quality, "m");
        assert_eq!(result.extensions, ext(&["7", "b5"]));

        let result = parse_symbol("C7(#5)");
        assert_eq!(result.quality, "");
        assert_eq!(result.extensions, ext(&["7", "#5"]));

        let result = parse_symbol("Dm7+");
        assert_eq!(result.extensions, ext(&["7+"]));
    }

    #[test]
    fn parse_two_digit_extensions() {
        assert_eq!(parse_symbol("E13").extensions, ext(&["13"]));
        assert_eq!(parse_symbol("G7#11").extensions, ext(&["7", "#11"]));
        assert_eq!(parse_symbol("Am(add9)").extensions, ext(&["9"]));
    }

    #[test]
    fn parse_named_qualities() {
        assert_eq!(parse_symbol("Bdim").quality, "dim");
        assert_eq!(parse_symbol("Ebaug").quality, "aug");
        assert_eq!(parse_symbol("Ebaug").root_pitch(), Some(Pitch::Ds));
        assert_eq!(parse_symbol("Dsus2").quality, "sus2");
        assert_eq!(parse_symbol("Asus4").quality, "sus4");
    }

    #[test]
    fn extensions_keep_input_order() {
        let result = parse_symbol("C9b5");

        assert_eq!(result.extensions, ext(&["9", "b5"]));
        assert_eq!(result.canonical_extensions(), ext(&["b5", "9"]));

        let result = parse_symbol("C13#9b9 7");
        assert_eq!(result.extensions, ext(&["13", "#9", "b9", "7"]));
        assert_eq!(result.canonical_extensions(), ext(&["7", "b9", "#9", "13"]));
    }

    #[test]
    fn unparseable_gives_default() {
        assert_eq!(parse_symbol(""), ManualChordData::default());
        assert_eq!(parse_symbol("xyz"), ManualChordData::default());
        assert_eq!(parse_symbol("/E"), ManualChordData::default());
        assert_eq!(parse_symbol("hm7").root, "C");
        assert_eq!(parse_symbol(" Dm7"), ManualChordData::default());
        assert_eq!(parse_symbol("Dm7 ").quality, "m");
    }
}
