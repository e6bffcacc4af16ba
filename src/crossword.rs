use itertools::iproduct;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{grid::Grid, placed_word::PlacedWord, position::{Candidate, Orientation, Position}, registry::PlacementRegistry, traits::{CrosswordChar, CrosswordString}};

/// Default side length of the square grid
pub const DEFAULT_GRID_SIZE: usize = 15;

/// Error type for possible errors when working with crosswords
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum CrosswordError
{
    #[error("Cannot place the word on the grid at the specified position and orientation.")]
    CantPlaceWord,
}

/// # Represents a crossword under construction
///
/// Owns a [grid](Grid) of letters and the [registry](PlacementRegistry) of the words that put them there.
/// Both are only changed together, through [Crossword::place_word] and [Crossword::remove_word], so every
/// letter of the grid is always explained by at least one registered word.
///
/// A word may only share a cell with a word of the opposite orientation that has the same letter there,
/// and may not run flush against any other word, neither along its sides nor past its ends.
///
/// # Example
///
/// ```
/// # use crossword_gen::crossword::Crossword;
/// # use crossword_gen::placed_word::PlacedWord;
/// # use crossword_gen::position::{Orientation, Position};
/// let mut cw = Crossword::<u8, &str>::new(15);
///
/// cw.place_word(PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal)).unwrap();
/// cw.place_word(PlacedWord::new("car", Position::new(7, 6), Orientation::Vertical)).unwrap();
///
/// //  c a t
/// //  a
/// //  r
///
/// // "ox" would run alongside "car"
/// assert!(!cw.can_place(&PlacedWord::new("ox", Position::new(9, 7), Orientation::Vertical)));
/// assert!(cw.can_place(&PlacedWord::new("tar", Position::new(7, 8), Orientation::Vertical)));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Crossword<CharT: CrosswordChar, StrT: CrosswordString<CharT>>
{
    grid: Grid<CharT>,
    registry: PlacementRegistry<CharT, StrT>,
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> Default for Crossword<CharT, StrT>
{
    fn default() -> Self
    {
        Crossword::new(DEFAULT_GRID_SIZE)
    }
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> Crossword<CharT, StrT>
{
    /// Creates a new crossword with an empty `size`x`size` grid
    pub fn new(size: usize) -> Crossword<CharT, StrT>
    {
        Crossword { grid: Grid::new(size), registry: PlacementRegistry::new() }
    }

    pub fn size(&self) -> usize
    {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid<CharT>
    {
        &self.grid
    }

    /// The placed [words](PlacedWord) in the order they were added
    pub fn words(&self) -> &[PlacedWord<CharT, StrT>]
    {
        self.registry.all()
    }

    pub fn is_empty(&self) -> bool
    {
        self.registry.is_empty()
    }

    /// Removes every word and empties the grid
    pub fn clear(&mut self)
    {
        self.grid.reset();
        self.registry.clear();
    }

    /// Checks if a [word](PlacedWord) can be placed on the crossword
    ///
    /// The word must fit in the grid, and for every character:
    /// - the cell is empty, or is a crossing: it holds the same character and every word covering it runs in the opposite orientation
    /// - the cells touching it across the word's axis are empty, outside of the grid, or belong to the word crossed here
    ///
    /// The cells right before and right after the word along its own axis must be empty or outside of the grid.
    pub fn can_place(&self, word: &PlacedWord<CharT, StrT>) -> bool
    {
        if word.is_empty() || !word.fits_in(self.size()) { return false; }

        if word.end_caps().iter().any(|pos| self.grid.letter_at(pos).is_some()) { return false; }

        word.cells().all(|(pos, char)| self.can_occupy(&pos, char, word.orientation))
    }

    fn can_occupy(&self, pos: &Position, char: &CharT, orientation: Orientation) -> bool
    {
        match self.grid.letter_at(pos)
        {
            None => (),
            Some(existing) if existing == char => if !self.is_crossing(pos, char, orientation) { return false; },
            Some(_) => return false,
        }

        pos.perpendicular_neighbors(orientation)
            .iter()
            .all(|neighbor| self.grid.letter_at(neighbor).is_none() || self.crossed_word_covers(pos, neighbor, orientation))
    }

    /// A word of `orientation` can cross `pos` only if every word already there runs across it and one of them has `char` on it
    fn is_crossing(&self, pos: &Position, char: &CharT, orientation: Orientation) -> bool
    {
        let mut crossed = false;
        for (w, ind) in self.registry.covering(pos)
        {
            if w.orientation == orientation { return false; }
            crossed |= w.value.as_ref().get(ind) == Some(char);
        }
        crossed
    }

    fn crossed_word_covers(&self, pos: &Position, neighbor: &Position, orientation: Orientation) -> bool
    {
        self.registry.iter().any(|w|
            w.orientation == orientation.opposite() &&
            w.index_at(pos).is_some() &&
            w.index_at(neighbor).is_some())
    }

    /// Writes the [word](PlacedWord) onto the grid and registers it
    ///
    /// # Errors
    ///
    /// [CrosswordError::CantPlaceWord] - [Crossword::can_place] rejects the word, nothing is changed
    pub fn place_word(&mut self, word: PlacedWord<CharT, StrT>) -> Result<(), CrosswordError>
    {
        if !self.can_place(&word) { return Err(CrosswordError::CantPlaceWord); }

        for (pos, char) in word.cells()
        {
            if let Some((row, col)) = pos.indices()
            {
                self.grid.set(row, col, char.clone());
            }
        }
        self.registry.add(word);

        Ok(())
    }

    /// Removes the [word](PlacedWord) with the same value, anchor and orientation from the crossword
    ///
    /// Cells still covered by another word keep their character.
    ///
    /// returns true if the word was succesfully removed
    /// returns false if no such word was placed
    pub fn remove_word(&mut self, word: &PlacedWord<CharT, StrT>) -> bool
    {
        let Some(removed) = self.registry.remove_matching(word) else { return false; };

        for (pos, _) in removed.cells()
        {
            if self.registry.covering(&pos).next().is_some() { continue; }
            if let Some((row, col)) = pos.indices()
            {
                self.grid.clear(row, col);
            }
        }

        true
    }

    /// Returns the positions worth trying for a word, in a fixed order
    ///
    /// On an empty crossword the only candidate is horizontal, centered in the grid.
    /// Otherwise, for every character of the word (in order), every grid cell (row by row) holding that character yields
    /// a horizontal and then a vertical candidate that put the character on that cell, when the word fits in the grid.
    /// The candidates are neither validated nor deduplicated. A word longer than the grid has none once the crossword
    /// holds a word, and neither does a word or grid too large for [Position] coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// # use crossword_gen::crossword::Crossword;
    /// # use crossword_gen::placed_word::PlacedWord;
    /// # use crossword_gen::position::{Candidate, Orientation, Position};
    /// let mut cw = Crossword::<u8, &str>::new(15);
    /// assert_eq!(cw.candidates(&"cat"), vec![Candidate::new(7, 6, Orientation::Horizontal)]);
    ///
    /// cw.place_word(PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal)).unwrap();
    /// assert_eq!(cw.candidates(&"act"), vec![
    ///     Candidate::new(7, 7, Orientation::Horizontal),
    ///     Candidate::new(7, 7, Orientation::Vertical),
    ///     Candidate::new(7, 5, Orientation::Horizontal),
    ///     Candidate::new(6, 6, Orientation::Vertical),
    ///     Candidate::new(7, 6, Orientation::Horizontal),
    ///     Candidate::new(5, 8, Orientation::Vertical),
    /// ]);
    /// ```
    pub fn candidates(&self, word: &StrT) -> Vec<Candidate>
    {
        let chars = word.as_ref();
        let (Ok(len), Ok(size)) = (i16::try_from(chars.len()), i16::try_from(self.size())) else { return vec![]; };

        if self.registry.is_empty()
        {
            let mid = size / 2;
            return vec![Candidate::new(mid, mid - len / 2, Orientation::Horizontal)];
        }

        if len > size { return vec![]; }

        let mut candidates = vec![];
        for (ind, char) in (0..len).zip(chars)
        {
            for (row, col) in iproduct!(0..size, 0..size)
            {
                if self.grid.letter_at(&Position::new(row, col)) != Some(char) { continue; }

                if col >= ind && col - ind <= size - len
                {
                    candidates.push(Candidate::new(row, col - ind, Orientation::Horizontal));
                }
                if row >= ind && row - ind <= size - len
                {
                    candidates.push(Candidate::new(row - ind, col, Orientation::Vertical));
                }
            }
        }

        candidates
    }

    /// Checks that the grid and the registry agree
    ///
    /// Every filled cell must be covered by a registered word with the same character there,
    /// and every character of every registered word must be on the grid.
    pub fn is_consistent(&self) -> bool
    {
        let explained = self.grid.filled_cells().all(|(pos, char)|
            self.registry.covering(&pos).any(|(w, _)| w.char_at(&pos) == Some(char)));

        let written = self.registry.iter().all(|w|
            w.cells().all(|(pos, char)| self.grid.letter_at(&pos) == Some(char)));

        explained && written
    }
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> IntoIterator for Crossword<CharT, StrT>
{
    type Item = PlacedWord<CharT, StrT>;
    type IntoIter = std::vec::IntoIter<PlacedWord<CharT, StrT>>;

    fn into_iter(self) -> Self::IntoIter
    {
        self.registry.all().to_vec().into_iter()
    }
}
