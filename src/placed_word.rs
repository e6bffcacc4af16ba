use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use crate::{position::{Candidate, Orientation, Position}, traits::{CrosswordChar, CrosswordString}};


/// Longest word and largest grid side the signed coordinates of a [Position] can address
pub const MAX_EXTENT: usize = i16::MAX as usize;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
struct WordBoundingBox
{
    row: i64,
    col: i64,
    h: i64,
    w: i64,
}

impl WordBoundingBox
{
    fn contains(&self, pos: &Position) -> bool
    {
        (self.row..self.row + self.h).contains(&i64::from(pos.row)) &&
        (self.col..self.col + self.w).contains(&i64::from(pos.col))
    }

    fn fits_in(&self, size: usize) -> bool
    {
        let size = i64::try_from(size.min(MAX_EXTENT)).unwrap_or(i64::from(i16::MAX));
        self.row >= 0 && self.col >= 0 &&
        self.row + self.h <= size &&
        self.col + self.w <= size
    }
}


/// A word committed to (or proposed for) a [crossword](crate::crossword::Crossword)
///
/// The [position](Position) is the anchor, the cell of the first character, the rest of the characters extend along the [orientation](Orientation).
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct PlacedWord<CharT: CrosswordChar, StrT: CrosswordString<CharT>>
{
    pub value: StrT,
    pub position: Position,
    pub orientation: Orientation,
    #[serde(skip)]
    character_type: PhantomData<CharT>
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> PlacedWord<CharT, StrT>
{
    pub fn new(val: StrT, pos: Position, orientation: Orientation) -> PlacedWord<CharT, StrT>
    {
        PlacedWord { value: val, position: pos, orientation, character_type: PhantomData }
    }

    pub fn from_candidate(val: StrT, candidate: Candidate) -> PlacedWord<CharT, StrT>
    {
        PlacedWord::new(val, candidate.position, candidate.orientation)
    }

    fn value(&self) -> &[CharT]
    {
        self.value.as_ref()
    }

    pub fn len(&self) -> usize
    {
        self.value().len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.value().is_empty()
    }

    /// None if the word is too long to be measured in grid coordinates
    fn get_bounding_box(&self) -> Option<WordBoundingBox>
    {
        let len = i64::try_from(self.len()).ok()?;
        let (row, col) = (i64::from(self.position.row), i64::from(self.position.col));
        match self.orientation
        {
            Orientation::Horizontal => Some(WordBoundingBox { row, col, h: 1, w: len }),
            Orientation::Vertical => Some(WordBoundingBox { row, col, h: len, w: 1 }),
        }
    }

    /// Returns true if every character of the word lands inside a grid of the given size
    ///
    /// Grids are measured up to [MAX_EXTENT], so a word longer than that never fits.
    pub fn fits_in(&self, size: usize) -> bool
    {
        self.get_bounding_box().is_some_and(|bbox| bbox.fits_in(size))
    }

    /// Returns the positions of all characters of the word, paired with the characters
    ///
    /// Only meaningful for words that [fit](PlacedWord::fits_in) in a grid, positions past [MAX_EXTENT] saturate.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &CharT)> + '_
    {
        self.value().iter().enumerate().map(move |(ind, char)|
            (self.position.step(self.orientation, i16::try_from(ind).unwrap_or(i16::MAX)), char))
    }

    /// Returns the index of the character that lands on `pos`, None if the word doesn't cover it
    ///
    /// ## Examples
    /// ```
    /// # use crossword_gen::placed_word::PlacedWord;
    /// # use crossword_gen::position::{Orientation, Position};
    /// let w = PlacedWord::<u8, &str>::new("world", Position::new(0, 4), Orientation::Vertical);
    ///
    /// //         w
    /// // h e l l o
    /// //         r
    /// //         l
    /// //         d
    ///
    /// assert_eq!(w.index_at(&Position::new(1, 4)), Some(1));
    /// assert_eq!(w.index_at(&Position::new(1, 3)), None);
    /// ```
    pub fn index_at(&self, pos: &Position) -> Option<usize>
    {
        if !self.get_bounding_box()?.contains(pos) { return None; }

        let offset = match self.orientation
        {
            Orientation::Horizontal => i64::from(pos.col) - i64::from(self.position.col),
            Orientation::Vertical => i64::from(pos.row) - i64::from(self.position.row),
        };
        usize::try_from(offset).ok()
    }

    /// Returns the character that lands on `pos`, None if the word doesn't cover it
    pub fn char_at(&self, pos: &Position) -> Option<&CharT>
    {
        self.index_at(pos).and_then(|ind| self.value().get(ind))
    }

    /// Returns the cells right before the first and right after the last character, along the word's own axis
    ///
    /// ```text
    /// x c a t x
    /// ```
    pub fn end_caps(&self) -> [Position; 2]
    {
        let len = i16::try_from(self.len()).unwrap_or(i16::MAX);
        [self.position.step(self.orientation, -1), self.position.step(self.orientation, len)]
    }

    /// Returns true if the value, anchor and orientation are the same
    pub fn matches(&self, value: &StrT, pos: &Position, orientation: Orientation) -> bool
    {
        self.value == *value && self.position == *pos && self.orientation == orientation
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_placed_word_cells()
    {
        let w = PlacedWord::<u8, &str>::new("cat", Position::new(7, 6), Orientation::Vertical);

        assert_eq!(w.cells().collect::<Vec<_>>(), vec![
            (Position::new(7, 6), &b'c'),
            (Position::new(8, 6), &b'a'),
            (Position::new(9, 6), &b't'),
        ]);
    }

    #[test]
    fn test_placed_word_index_at()
    {
        let w = PlacedWord::<u8, &str>::new("hello", Position::new(1, 0), Orientation::Horizontal);

        assert_eq!(w.index_at(&Position::new(1, 0)), Some(0));
        assert_eq!(w.index_at(&Position::new(1, 4)), Some(4));
        assert_eq!(w.index_at(&Position::new(1, 5)), None);
        assert_eq!(w.index_at(&Position::new(0, 2)), None);
        assert_eq!(w.char_at(&Position::new(1, 1)), Some(&b'e'));
    }

    #[test]
    fn test_placed_word_fits_in()
    {
        let fits = PlacedWord::<u8, &str>::new("hello", Position::new(14, 10), Orientation::Horizontal);
        let too_long = PlacedWord::<u8, &str>::new("hello", Position::new(11, 10), Orientation::Vertical);
        let negative = PlacedWord::<u8, &str>::new("hello", Position::new(0, -1), Orientation::Horizontal);

        assert_eq!([fits.fits_in(15), too_long.fits_in(15), negative.fits_in(15)], [true, false, false]);
    }

    #[test]
    fn test_placed_word_longer_than_coordinates()
    {
        // 65539 letters would wrap to a width of 3 in 16 bits
        let huge = PlacedWord::<u8, String>::new("a".repeat(65539), Position::new(0, 0), Orientation::Horizontal);

        assert!(!huge.fits_in(15));
        assert!(!huge.fits_in(usize::MAX));
        assert_eq!(huge.index_at(&Position::new(0, i16::MAX)), Some(MAX_EXTENT));
        assert_eq!(huge.end_caps(), [Position::new(0, -1), Position::new(0, i16::MAX)]);

        let edge = PlacedWord::<u8, String>::new("a".repeat(MAX_EXTENT), Position::new(0, 0), Orientation::Vertical);
        assert!(edge.fits_in(usize::MAX));
        assert!(!edge.fits_in(MAX_EXTENT - 1));
    }

    #[test]
    fn test_placed_word_end_caps()
    {
        let w = PlacedWord::<u8, &str>::new("cat", Position::new(7, 6), Orientation::Horizontal);

        assert_eq!(w.end_caps(), [Position::new(7, 5), Position::new(7, 9)]);
    }
}
