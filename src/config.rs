//! Instrument and display parameters shared by the transposition and display
//! passes.

use thiserror::Error;

/// Number of strings on a standard guitar.
pub const DEFAULT_STRINGS: u8 = 6;

/// Widest span of frets a compact diagram shows before it is re-based.
pub const DEFAULT_WINDOW: u8 = 5;

/// Errors returned when building `Options`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The instrument must have at least one string.
    #[error("string count must be at least 1")]
    NoStrings,

    /// The display window must show at least one fret.
    #[error("display window must be at least 1 fret, got {0}")]
    EmptyWindow(u8),
}

/// Parameters for transposing and framing diagrams.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Options {
    strings: u8,
    window: u8,
}

impl Options {
    /// Return a builder to customize the instrument and window.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Number of strings, numbered `1..=strings` from the lowest pitched.
    pub fn strings(&self) -> u8 {
        self.strings
    }

    /// Highest fret a diagram may reach before being re-based.
    pub fn window(&self) -> u8 {
        self.window
    }
}

impl Default for Options {
    fn default() -> Self {
        Options { strings: DEFAULT_STRINGS, window: DEFAULT_WINDOW }
    }
}

/// Builder for `Options`.
#[derive(Clone, Debug)]
pub struct OptionsBuilder {
    strings: u8,
    window: u8,
}

impl OptionsBuilder {
    /// Start with a six string guitar and a five fret window.
    pub fn new() -> Self {
        OptionsBuilder { strings: DEFAULT_STRINGS, window: DEFAULT_WINDOW }
    }

    /// Set the number of strings of the instrument.
    pub fn strings(mut self, count: u8) -> Self {
        self.strings = count;
        self
    }

    /// Set the display window size in frets.
    pub fn window(mut self, frets: u8) -> Self {
        self.window = frets;
        self
    }

    /// Finalize and validate the options.
    pub fn build(self) -> Result<Options, ConfigError> {
        if self.strings == 0 {
            return Err(ConfigError::NoStrings);
        }
        if self.window == 0 {
            return Err(ConfigError::EmptyWindow(self.window));
        }

        Ok(Options { strings: self.strings, window: self.window })
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
