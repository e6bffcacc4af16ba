use serde::{Deserialize, Serialize};

/// Represents a cell of the [grid](crate::grid::Grid), usually the position of the first character of a [word](crate::placed_word::PlacedWord)
///
/// Coordinates are signed, so a position can point outside of the grid (candidates are allowed to, the checker rejects them).
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Position
{
    pub row: i16,
    pub col: i16,
}

impl Position
{
    pub fn new(row: i16, col: i16) -> Position
    {
        Position { row, col }
    }

    /// Moves the position `steps` cells along the axis of the `orientation` (negative steps move backwards)
    ///
    /// Coordinates saturate at the bounds of `i16`, which no grid reaches.
    pub fn step(&self, orientation: Orientation, steps: i16) -> Position
    {
        match orientation
        {
            Orientation::Horizontal => Position { row: self.row, col: self.col.saturating_add(steps) },
            Orientation::Vertical => Position { row: self.row.saturating_add(steps), col: self.col },
        }
    }

    /// Returns the two cells touching this one across the axis of the `orientation`
    ///
    /// ```text
    ///   horizontal      vertical
    ///       b
    ///     - x -         b x a
    ///       a
    /// ```
    pub fn perpendicular_neighbors(&self, orientation: Orientation) -> [Position; 2]
    {
        let across = orientation.opposite();
        [self.step(across, -1), self.step(across, 1)]
    }

    /// Returns the (row, column) indices of the position, None if any coordinate is negative
    pub fn indices(&self) -> Option<(usize, usize)>
    {
        Some((usize::try_from(self.row).ok()?, usize::try_from(self.col).ok()?))
    }
}

/// Represents the axis a [word](crate::placed_word::PlacedWord) extends along
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
pub enum Orientation
{
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

impl Orientation
{
    pub fn opposite(&self) -> Orientation
    {
        match *self
        {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// A proposed but not yet validated placement of a word
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Candidate
{
    pub position: Position,
    pub orientation: Orientation,
}

impl Candidate
{
    pub fn new(row: i16, col: i16, orientation: Orientation) -> Candidate
    {
        Candidate { position: Position { row, col }, orientation }
    }
}
