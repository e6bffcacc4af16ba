use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

/// Words drawn from when no vocabulary is configured
pub const DEFAULT_VOCABULARY: [&str; 24] =
[
    "apple", "banana", "cherry", "date", "elderberry",
    "fig", "grape", "honeydew", "kiwi", "lemon",
    "mango", "nectarine", "orange", "papaya",
    "raspberry", "strawberry", "tangerine", "vanilla",
    "watermelon", "yam", "zucchini", "pumpkin", "pawpaw",
    "blueberry",
];

/// Settings for drawing the words of a crossword from a vocabulary
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSelectionSettings
{
    /// How many words to draw
    pub word_count: usize,
    /// Shortest allowed word, in grid cells
    pub min_length: usize,
    /// Longest allowed word, in grid cells
    pub max_length: usize,
    pub vocabulary: Vec<String>,
}

impl Default for WordSelectionSettings
{
    fn default() -> Self
    {
        WordSelectionSettings
        {
            word_count: 5,
            min_length: 2,
            max_length: 10,
            vocabulary: DEFAULT_VOCABULARY.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordSelectionSettings
{
    /// Returns the ASCII vocabulary words whose length is within `min_length..=max_length`
    ///
    /// Lengths are counted in bytes, the way a `u8` grid lays a word out.
    pub fn eligible_words(&self) -> impl Iterator<Item = &String> + '_
    {
        self.vocabulary.iter().filter(|w| w.is_ascii() && (self.min_length..=self.max_length).contains(&w.len()))
    }

    /// Draws up to `word_count` distinct entries of the eligible words, in random order
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String>
    {
        let eligible = self.eligible_words().collect::<Vec<_>>();
        eligible.choose_multiple(rng, self.word_count).map(|w| (*w).clone()).collect()
    }
}
