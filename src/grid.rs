use std::fmt;

use itertools::{iproduct, Itertools};
use serde::{Deserialize, Serialize};
use crate::{position::{Orientation, Position}, traits::CrosswordChar};

/// Character used when rendering an empty cell
pub const EMPTY_CELL: char = '.';

/// A square matrix of cells, each either empty or holding a single character
///
/// Indexing with a row or column outside of `0..size` panics, use [Grid::letter_at] for checked access.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Grid<CharT: CrosswordChar>
{
    size: usize,
    cells: Vec<Option<CharT>>,
}

/// A maximal run of two or more consecutive filled cells along a row or a column
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct LetterRun<CharT: CrosswordChar>
{
    pub position: Position,
    pub orientation: Orientation,
    pub letters: Vec<CharT>,
}

impl<CharT: CrosswordChar> Grid<CharT>
{
    /// Creates a `size`x`size` grid of empty cells
    pub fn new(size: usize) -> Grid<CharT>
    {
        Grid { size, cells: vec![None; size * size] }
    }

    /// Empties every cell, keeping the size
    pub fn reset(&mut self)
    {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn size(&self) -> usize
    {
        self.size
    }

    fn offset(&self, row: usize, col: usize) -> usize
    {
        assert!(row < self.size && col < self.size, "cell ({row}, {col}) is outside of a {0}x{0} grid", self.size);
        row * self.size + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CharT>
    {
        self.cells[self.offset(row, col)].as_ref()
    }

    pub fn set(&mut self, row: usize, col: usize, char: CharT)
    {
        let offset = self.offset(row, col);
        self.cells[offset] = Some(char);
    }

    pub fn clear(&mut self, row: usize, col: usize)
    {
        let offset = self.offset(row, col);
        self.cells[offset] = None;
    }

    /// Returns true if the position is inside the grid
    pub fn contains(&self, pos: &Position) -> bool
    {
        pos.indices().is_some_and(|(row, col)| row < self.size && col < self.size)
    }

    /// Returns the character at `pos`, None if the cell is empty or outside of the grid
    pub fn letter_at(&self, pos: &Position) -> Option<&CharT>
    {
        if !self.contains(pos) { return None; }
        let (row, col) = pos.indices()?;
        self.get(row, col)
    }

    /// Returns true if no cell holds a character
    pub fn is_empty(&self) -> bool
    {
        self.cells.iter().all(Option::is_none)
    }

    /// Returns the positions of all filled cells in row-major order, paired with their characters
    pub fn filled_cells(&self) -> impl Iterator<Item = (Position, &CharT)> + '_
    {
        iproduct!(0..self.size, 0..self.size)
            .filter_map(move |(row, col)|
            {
                let pos = Position::new(i16::try_from(row).ok()?, i16::try_from(col).ok()?);
                self.get(row, col).map(|char| (pos, char))
            })
    }

    /// Returns the rows of the grid
    pub fn rows(&self) -> impl Iterator<Item = &[Option<CharT>]> + '_
    {
        self.cells.chunks(self.size.max(1))
    }

    /// Scans the grid for every maximal run of at least two filled cells, rows first, then columns
    ///
    /// On a well formed crossword the runs are exactly the placed words.
    pub fn letter_runs(&self) -> Vec<LetterRun<CharT>>
    {
        let mut runs = vec![];
        let size = i16::try_from(self.size).unwrap_or(i16::MAX);

        for orientation in [Orientation::Horizontal, Orientation::Vertical]
        {
            for line in 0..size
            {
                let line_start = match orientation
                {
                    Orientation::Horizontal => Position::new(line, 0),
                    Orientation::Vertical => Position::new(0, line),
                };

                let cells = (0..size).map(|ind| line_start.step(orientation, ind));
                for (filled, group) in &cells.chunk_by(|pos| self.letter_at(pos).is_some())
                {
                    if !filled { continue; }
                    let group = group.collect::<Vec<_>>();
                    if group.len() < 2 { continue; }

                    runs.push(LetterRun
                    {
                        position: group[0],
                        orientation,
                        letters: group.iter().filter_map(|pos| self.letter_at(pos).cloned()).collect(),
                    });
                }
            }
        }

        runs
    }
}

impl<CharT: CrosswordChar + Into<char>> fmt::Display for Grid<CharT>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for row in self.rows()
        {
            let line = row.iter().map(|cell| cell.clone().map_or(EMPTY_CELL, Into::into)).join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
