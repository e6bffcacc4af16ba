use std::{fs, io, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{generator::CrosswordGeneratorSettings, selection::WordSelectionSettings};

/// Largest supported grid side length
pub const MAX_GRID_SIZE: usize = 255;

/// Error type for loading a [configuration](GeneratorConfig)
#[derive(Error, Debug)]
pub enum ConfigError
{
    #[error("Cannot read the configuration file {}: {source}", .path.display())]
    Read { path: PathBuf, #[source] source: io::Error },
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("The grid size must be between 1 and 255, got {0}.")]
    InvalidGridSize(usize),
    #[error("The minimum word length ({min}) is greater than the maximum ({max}).")]
    InvalidLengthRange { min: usize, max: usize },
    #[error("The word {0:?} has characters outside of ASCII, a grid cell holds a single byte.")]
    NonAsciiWord(String),
}

/// Everything needed to generate random crosswords, loadable from a JSON file
///
/// Missing fields take their default values.
///
/// ```
/// # use crossword_gen::config::GeneratorConfig;
/// let config = GeneratorConfig::from_json(r#"{ "generator": { "grid_size": 11 }, "max_attempts": 3 }"#).unwrap();
///
/// assert_eq!(config.generator.grid_size, 11);
/// assert_eq!(config.max_attempts, 3);
/// assert_eq!(config.selection.word_count, 5);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig
{
    pub generator: CrosswordGeneratorSettings,
    pub selection: WordSelectionSettings,
    /// How many word lists to try before giving up on one crossword
    pub max_attempts: u32,
    /// Seed for the word selection, random if None
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig
{
    fn default() -> Self
    {
        GeneratorConfig
        {
            generator: CrosswordGeneratorSettings::default(),
            selection: WordSelectionSettings::default(),
            max_attempts: 10,
            seed: None,
        }
    }
}

impl GeneratorConfig
{
    /// Parses and validates a configuration
    ///
    /// # Errors
    ///
    /// [ConfigError::Parse] - the text is not a valid configuration
    /// [ConfigError::InvalidGridSize], [ConfigError::InvalidLengthRange], [ConfigError::NonAsciiWord] - see [GeneratorConfig::validate]
    pub fn from_json(json: &str) -> Result<GeneratorConfig, ConfigError>
    {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file
    ///
    /// # Errors
    ///
    /// [ConfigError::Read] - the file can't be read, otherwise the same as [GeneratorConfig::from_json]
    pub fn from_path(path: impl AsRef<Path>) -> Result<GeneratorConfig, ConfigError>
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
        GeneratorConfig::from_json(&json)
    }

    /// Checks the values a generator can't work with
    ///
    /// # Errors
    ///
    /// [ConfigError::InvalidGridSize] - the grid size is 0 or above [MAX_GRID_SIZE]
    /// [ConfigError::InvalidLengthRange] - the minimum word length is above the maximum
    /// [ConfigError::NonAsciiWord] - a vocabulary word can't be laid out one byte per cell
    pub fn validate(&self) -> Result<(), ConfigError>
    {
        if !(1..=MAX_GRID_SIZE).contains(&self.generator.grid_size)
        {
            return Err(ConfigError::InvalidGridSize(self.generator.grid_size));
        }
        if self.selection.min_length > self.selection.max_length
        {
            return Err(ConfigError::InvalidLengthRange { min: self.selection.min_length, max: self.selection.max_length });
        }
        validate_words(&self.selection.vocabulary)
    }
}

/// Checks that every word is ASCII, so each of its bytes is a whole letter of a `u8` grid
///
/// # Errors
///
/// [ConfigError::NonAsciiWord] - the first word that isn't
pub fn validate_words<S: AsRef<str>>(words: &[S]) -> Result<(), ConfigError>
{
    for word in words
    {
        let word: &str = word.as_ref();
        if !word.is_ascii() { return Err(ConfigError::NonAsciiWord(word.to_owned())); }
    }
    Ok(())
}
