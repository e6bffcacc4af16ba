use serde::{Deserialize, Serialize};
use crate::{placed_word::PlacedWord, position::Position, traits::{CrosswordChar, CrosswordString}};

/// Ordered record of every [word](PlacedWord) currently committed to a [crossword](crate::crossword::Crossword)
///
/// The registry never stores grid letters, the owner keeps it in lockstep with the [grid](crate::grid::Grid).
/// The same word may be registered more than once (at different places), nothing is deduplicated.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlacementRegistry<CharT: CrosswordChar, StrT: CrosswordString<CharT>>
{
    words: Vec<PlacedWord<CharT, StrT>>,
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> Default for PlacementRegistry<CharT, StrT>
{
    fn default() -> Self
    {
        PlacementRegistry { words: vec![] }
    }
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> PlacementRegistry<CharT, StrT>
{
    pub fn new() -> PlacementRegistry<CharT, StrT>
    {
        PlacementRegistry::default()
    }

    pub fn add(&mut self, word: PlacedWord<CharT, StrT>)
    {
        self.words.push(word);
    }

    /// Removes the first entry with the same value, anchor and orientation as `word`
    ///
    /// Returns the removed entry, None if nothing matched.
    pub fn remove_matching(&mut self, word: &PlacedWord<CharT, StrT>) -> Option<PlacedWord<CharT, StrT>>
    {
        let ind = self.words.iter().position(|w| w.matches(&word.value, &word.position, word.orientation))?;
        Some(self.words.remove(ind))
    }

    /// All entries in insertion order
    pub fn all(&self) -> &[PlacedWord<CharT, StrT>]
    {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedWord<CharT, StrT>>
    {
        self.words.iter()
    }

    pub fn len(&self) -> usize
    {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.words.is_empty()
    }

    /// Returns every entry whose span covers `pos`, paired with the index of the character landing there
    pub fn covering<'a>(&'a self, pos: &'a Position) -> impl Iterator<Item = (&'a PlacedWord<CharT, StrT>, usize)> + 'a
    {
        self.words.iter().filter_map(move |w| w.index_at(pos).map(|ind| (w, ind)))
    }

    pub fn clear(&mut self)
    {
        self.words.clear();
    }
}

impl<'a, CharT: CrosswordChar, StrT: CrosswordString<CharT>> IntoIterator for &'a PlacementRegistry<CharT, StrT>
{
    type Item = &'a PlacedWord<CharT, StrT>;
    type IntoIter = std::slice::Iter<'a, PlacedWord<CharT, StrT>>;

    fn into_iter(self) -> Self::IntoIter
    {
        self.words.iter()
    }
}

#[cfg(test)]
mod tests
{
    use crate::position::Orientation;

    use super::*;

    #[test]
    fn test_registry_remove_matching()
    {
        let mut registry = PlacementRegistry::new();
        registry.add(PlacedWord::<u8, &str>::new("cat", Position::new(7, 6), Orientation::Horizontal));
        registry.add(PlacedWord::<u8, &str>::new("car", Position::new(7, 6), Orientation::Vertical));
        registry.add(PlacedWord::<u8, &str>::new("cat", Position::new(7, 6), Orientation::Horizontal));

        let removed = registry.remove_matching(&PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal));

        assert_eq!(removed, Some(PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal)));
        assert_eq!(registry.all(), &[
            PlacedWord::new("car", Position::new(7, 6), Orientation::Vertical),
            PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal),
        ]);
    }

    #[test]
    fn test_registry_remove_missing()
    {
        let mut registry = PlacementRegistry::new();
        registry.add(PlacedWord::<u8, &str>::new("cat", Position::new(7, 6), Orientation::Horizontal));

        assert_eq!(registry.remove_matching(&PlacedWord::new("cat", Position::new(7, 6), Orientation::Vertical)), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_covering()
    {
        let mut registry = PlacementRegistry::new();
        registry.add(PlacedWord::<u8, &str>::new("cat", Position::new(7, 6), Orientation::Horizontal));
        registry.add(PlacedWord::<u8, &str>::new("tea", Position::new(7, 8), Orientation::Vertical));
        registry.add(PlacedWord::<u8, &str>::new("dog", Position::new(0, 0), Orientation::Vertical));

        let covering = registry.covering(&Position::new(7, 8)).map(|(w, ind)| (w.value, ind)).collect::<Vec<_>>();

        assert_eq!(covering, vec![("cat", 2), ("tea", 0)]);
    }
}
