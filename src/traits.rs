use std::fmt::Debug;
use trait_set::trait_set;

trait_set!
{
    /// Trait for any type that can be stored in a single cell of a [grid](crate::grid::Grid).
    pub trait CrosswordChar = Eq + PartialEq + Ord + PartialOrd + Clone + Default + Debug + Send + Sync;

    /// Trait for any type that can represent a word placed in a [crossword](crate::crossword::Crossword).
    pub trait CrosswordString<CharT: CrosswordChar> = AsRef<[CharT]> + Eq + PartialEq + Ord + PartialOrd + Clone + Debug + Send + Sync;
}
