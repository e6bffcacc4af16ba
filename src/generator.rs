use std::{ops::{Deref, DerefMut}, pin::Pin, task::{Context, Poll}};

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{sync::mpsc::{self, Receiver, Sender}, task};
use tokio_stream::Stream;

use crate::{config::GeneratorConfig, crossword::{Crossword, CrosswordError, DEFAULT_GRID_SIZE}, placed_word::PlacedWord, traits::{CrosswordChar, CrosswordString}};

/// Error type for failed crossword generations
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum GenerationError
{
    #[error("No crossword could be generated after {attempts} attempt(s).")]
    AttemptsExhausted { attempts: u32 },
    #[error("The crossword generator has stopped.")]
    Stopped,
}

/// Represents all settings for a [generator](CrosswordGenerator).
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosswordGeneratorSettings
{
    /// Side length of the square grid
    pub grid_size: usize,
    /// Maximum number of recursive placement steps per search, unlimited if None
    pub max_steps: Option<u64>,
}

impl Default for CrosswordGeneratorSettings
{
    fn default() -> Self
    {
        CrosswordGeneratorSettings { grid_size: DEFAULT_GRID_SIZE, max_steps: None }
    }
}

/// Places a list of words onto a single [crossword](Crossword) with a depth first search
///
/// Words are tried longest first (ties keep their input order), each one on every [candidate](crate::position::Candidate)
/// position in turn. The first complete layout found is kept, a branch that can't be completed is undone before
/// the next candidate is tried, so a failed search leaves the crossword empty.
///
/// # Example
/// ```
/// use crossword_gen::generator::{CrosswordGenerator, CrosswordGeneratorSettings};
/// use crossword_gen::placed_word::PlacedWord;
/// use crossword_gen::position::{Orientation, Position};
///
/// let generator = CrosswordGenerator::<u8, &str>::new(["cat", "car"], CrosswordGeneratorSettings::default());
/// let crossword = generator.generate().unwrap();
///
/// assert_eq!(crossword.words(), &[
///     PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal),
///     PlacedWord::new("car", Position::new(7, 6), Orientation::Vertical),
/// ]);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct CrosswordGenerator<CharT: CrosswordChar, StrT: CrosswordString<CharT>>
{
    words: Vec<StrT>,
    pub settings: CrosswordGeneratorSettings,
    #[serde(skip)]
    character_type: std::marker::PhantomData<CharT>,
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> CrosswordGenerator<CharT, StrT>
{
    pub fn new(words: impl IntoIterator<Item = StrT>, settings: CrosswordGeneratorSettings) -> CrosswordGenerator<CharT, StrT>
    {
        let mut words = words.into_iter().collect::<Vec<_>>();
        words.sort_by(|a, b| b.as_ref().len().cmp(&a.as_ref().len()));

        CrosswordGenerator { words, settings, character_type: std::marker::PhantomData }
    }

    /// The words in the order they are placed
    pub fn words(&self) -> &[StrT]
    {
        &self.words
    }

    /// Runs the search on a fresh crossword, returns it if every word was placed
    pub fn generate(&self) -> Option<Crossword<CharT, StrT>>
    {
        let mut crossword = Crossword::new(self.settings.grid_size);
        self.place_all(&mut crossword).then_some(crossword)
    }

    /// Places every word on `crossword`, which is expected to be empty
    ///
    /// Returns true if all words were placed. On false the crossword is left as it was.
    pub fn place_all(&self, crossword: &mut Crossword<CharT, StrT>) -> bool
    {
        let mut budget = StepBudget::new(self.settings.max_steps);
        let placed = self.place(crossword, 0, &mut budget);

        if placed
        {
            debug!("placed {} word(s) in {} step(s)", self.words.len(), budget.steps);
        }
        else if budget.exhausted()
        {
            warn!("gave up after {} step(s), the step budget is exhausted", budget.steps);
        }
        else
        {
            debug!("no layout exists for {:?} with this word order ({} step(s))", self.words, budget.steps);
        }

        placed
    }

    fn place(&self, crossword: &mut Crossword<CharT, StrT>, index: usize, budget: &mut StepBudget) -> bool
    {
        let Some(word) = self.words.get(index) else { return true; };
        if !budget.step() { return false; }

        for candidate in crossword.candidates(word)
        {
            let placed_word = PlacedWord::from_candidate(word.clone(), candidate);
            if !crossword.can_place(&placed_word) { continue; }

            let Ok(mut commit) = Commit::new(crossword, placed_word) else { continue; };
            if self.place(&mut commit, index + 1, budget)
            {
                commit.keep();
                return true;
            }
            if budget.exhausted() { return false; }
        }

        false
    }
}

#[derive(Debug)]
struct StepBudget
{
    steps: u64,
    limit: Option<u64>,
}

impl StepBudget
{
    fn new(limit: Option<u64>) -> StepBudget
    {
        StepBudget { steps: 0, limit }
    }

    /// Counts one step, returns false if the budget doesn't allow it
    fn step(&mut self) -> bool
    {
        if self.exhausted() { return false; }
        self.steps += 1;
        true
    }

    fn exhausted(&self) -> bool
    {
        self.limit.is_some_and(|limit| self.steps >= limit)
    }
}

/// A word placed on a crossword for the lifetime of the value
///
/// Dropping it removes the word again, unless [Commit::keep] was called.
struct Commit<'a, CharT: CrosswordChar, StrT: CrosswordString<CharT>>
{
    crossword: &'a mut Crossword<CharT, StrT>,
    word: Option<PlacedWord<CharT, StrT>>,
}

impl<'a, CharT: CrosswordChar, StrT: CrosswordString<CharT>> Commit<'a, CharT, StrT>
{
    fn new(crossword: &'a mut Crossword<CharT, StrT>, word: PlacedWord<CharT, StrT>) -> Result<Commit<'a, CharT, StrT>, CrosswordError>
    {
        crossword.place_word(word.clone())?;
        Ok(Commit { crossword, word: Some(word) })
    }

    fn keep(mut self)
    {
        self.word = None;
    }
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> Deref for Commit<'_, CharT, StrT>
{
    type Target = Crossword<CharT, StrT>;

    fn deref(&self) -> &Self::Target
    {
        self.crossword
    }
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> DerefMut for Commit<'_, CharT, StrT>
{
    fn deref_mut(&mut self) -> &mut Self::Target
    {
        self.crossword
    }
}

impl<CharT: CrosswordChar, StrT: CrosswordString<CharT>> Drop for Commit<'_, CharT, StrT>
{
    fn drop(&mut self)
    {
        if let Some(word) = self.word.take()
        {
            self.crossword.remove_word(&word);
        }
    }
}

/// Draws random words and tries to place them, up to [GeneratorConfig::max_attempts] times
///
/// # Errors
///
/// [GenerationError::AttemptsExhausted] - none of the drawn word lists could be placed
pub fn generate_random(config: &GeneratorConfig, rng: &mut StdRng) -> Result<Crossword<u8, String>, GenerationError>
{
    for attempt in 1..=config.max_attempts
    {
        let words = config.selection.select(rng);
        info!("attempt {attempt}/{}: selected words {words:?}", config.max_attempts);

        let generator = CrosswordGenerator::<u8, String>::new(words, config.generator.clone());
        if let Some(crossword) = generator.generate()
        {
            info!("crossword generated with {} word(s)", crossword.words().len());
            return Ok(crossword);
        }
    }

    warn!("failed to generate a crossword in {} attempt(s)", config.max_attempts);
    Err(GenerationError::AttemptsExhausted { attempts: config.max_attempts })
}

/// Represents a request to [CrosswordStream] for generating crosswords.
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
pub enum CrosswordGenerationRequest
{
    /// Request to stop the crossword generation.
    #[default]
    Stop,
    /// Request for some count of crosswords to generate.
    Count(u32),
}

/// A stream of randomly generated crosswords, produced on request by a background task
///
/// Every requested crossword is one item: the crossword, or the error of its last attempt.
///
/// # Example
/// ```
/// use crossword_gen::config::GeneratorConfig;
/// use crossword_gen::generator::{CrosswordGenerationRequest, CrosswordStream};
/// use tokio_stream::StreamExt;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main()
/// {
///     let config = GeneratorConfig { seed: Some(7), ..Default::default() };
///
///     let str = CrosswordStream::new(config);
///     str.request_crossword(CrosswordGenerationRequest::Count(2)).await.unwrap();
///     str.request_crossword(CrosswordGenerationRequest::Stop).await.unwrap();
///
///     let results = str.collect::<Vec<_>>().await;
///     assert_eq!(results.len(), 2);
/// }
/// ```
pub struct CrosswordStream
{
    request_sender: Sender<CrosswordGenerationRequest>,
    crossword_reciever: Receiver<Result<Crossword<u8, String>, GenerationError>>
}

impl CrosswordStream
{
    /// Starts the background task, it waits for [requests](CrosswordGenerationRequest) before generating anything
    pub fn new(config: GeneratorConfig) -> CrosswordStream
    {
        let (rs, rr) = mpsc::channel(100);
        let (cs, cr) = mpsc::channel(100);

        task::spawn_blocking(move || CrosswordStream::generation_loop(config, rr, cs));

        CrosswordStream { request_sender: rs, crossword_reciever: cr }
    }

    fn generation_loop(config: GeneratorConfig, mut rr: Receiver<CrosswordGenerationRequest>, cs: Sender<Result<Crossword<u8, String>, GenerationError>>)
    {
        let mut rng = match config.seed
        {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        loop
        {
            let count = match rr.blocking_recv()
            {
                None | Some(CrosswordGenerationRequest::Stop) => return,
                Some(CrosswordGenerationRequest::Count(count)) => count,
            };

            for _ in 0..count
            {
                if cs.blocking_send(generate_random(&config, &mut rng)).is_err() { return; }
            }
        }
    }

    /// Requests crosswords to generate, to be read with functions like next or take.
    ///
    /// After generating the requested count the task waits for other requests, the stream ends after a [CrosswordGenerationRequest::Stop].
    ///
    /// # Errors
    ///
    /// [GenerationError::Stopped] - the background task has already stopped
    pub async fn request_crossword(&self, req: CrosswordGenerationRequest) -> Result<(), GenerationError>
    {
        self.request_sender.send(req).await.map_err(|_| GenerationError::Stopped)
    }
}

impl Stream for CrosswordStream
{
    type Item = Result<Crossword<u8, String>, GenerationError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>>
    {
        self.crossword_reciever.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests
{
    use crate::position::{Orientation, Position};

    use super::*;

    #[test]
    fn test_generator_sorts_words()
    {
        let gen = CrosswordGenerator::<u8, &str>::new(["fig", "banana", "kiwi", "yam", "cherry"], CrosswordGeneratorSettings::default());

        assert_eq!(gen.words(), &["banana", "cherry", "kiwi", "fig", "yam"]);
    }

    #[test]
    fn test_generator_centers_single_word()
    {
        for word in ["hello", "at", "watermelon"]
        {
            let gen = CrosswordGenerator::<u8, &str>::new([word], CrosswordGeneratorSettings::default());
            let cw = gen.generate().unwrap();

            let len = i16::try_from(word.len()).unwrap();
            assert_eq!(cw.words(), &[PlacedWord::new(word, Position::new(7, 7 - len / 2), Orientation::Horizontal)]);
        }
    }

    #[test]
    fn test_generator_cat_car()
    {
        let gen = CrosswordGenerator::<u8, &str>::new(["cat", "car"], CrosswordGeneratorSettings::default());
        let cw = gen.generate().unwrap();

        assert_eq!(cw.words(), &[
            PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal),
            PlacedWord::new("car", Position::new(7, 6), Orientation::Vertical),
        ]);
        assert_eq!(cw.grid().letter_runs().len(), 2);
    }

    #[test]
    fn test_generator_hello_world_low()
    {
        let gen = CrosswordGenerator::<u8, &str>::new(["low", "hello", "world"], CrosswordGeneratorSettings::default());
        let cw = gen.generate().unwrap();

        //           w
        //   h e l l o
        //       o   r
        //       w   l
        //           d
        assert_eq!(cw.words(), &[
            PlacedWord::new("hello", Position::new(7, 5), Orientation::Horizontal),
            PlacedWord::new("world", Position::new(6, 9), Orientation::Vertical),
            PlacedWord::new("low", Position::new(7, 7), Orientation::Vertical),
        ]);
        assert!(cw.is_consistent());
    }

    #[test]
    fn test_generator_runs_are_the_placed_words()
    {
        let gen = CrosswordGenerator::<u8, &str>::new(["low", "hello", "world"], CrosswordGeneratorSettings::default());
        let cw = gen.generate().unwrap();

        let mut runs = cw.grid().letter_runs().into_iter().map(|run| (run.position, run.orientation, run.letters)).collect::<Vec<_>>();
        let mut words = cw.words().iter().map(|w| (w.position, w.orientation, w.value.as_bytes().to_vec())).collect::<Vec<_>>();
        runs.sort();
        words.sort();

        assert_eq!(runs, words);
    }

    #[test]
    fn test_generator_word_too_long()
    {
        let gen = CrosswordGenerator::<u8, &str>::new(["abcdefghijklmnopqrst", "cat"], CrosswordGeneratorSettings::default());

        let mut cw = Crossword::new(15);
        assert!(!gen.place_all(&mut cw));
        assert!(cw.is_empty());
        assert!(cw.grid().is_empty());
    }

    #[test]
    fn test_generator_failure_rolls_back()
    {
        let gen = CrosswordGenerator::<u8, &str>::new(["abc", "xyz"], CrosswordGeneratorSettings::default());

        let mut cw = Crossword::new(15);
        assert!(!gen.place_all(&mut cw));
        assert_eq!(cw, Crossword::new(15));
        assert_eq!(gen.generate(), None);
    }

    #[test]
    fn test_generator_step_budget()
    {
        let settings = CrosswordGeneratorSettings { max_steps: Some(1), ..Default::default() };
        let gen = CrosswordGenerator::<u8, &str>::new(["cat", "car"], settings);

        let mut cw = Crossword::new(15);
        assert!(!gen.place_all(&mut cw));
        assert_eq!(cw, Crossword::new(15));

        let settings = CrosswordGeneratorSettings { max_steps: Some(2), ..Default::default() };
        assert!(CrosswordGenerator::<u8, &str>::new(["cat", "car"], settings).generate().is_some());
    }

    #[test]
    fn test_generator_is_deterministic()
    {
        let words = ["hello", "world", "low", "hold", "dew"];
        let gen = CrosswordGenerator::<u8, &str>::new(words, CrosswordGeneratorSettings::default());

        let cw = gen.generate().unwrap();
        assert_eq!(gen.generate(), Some(cw.clone()));

        //           w
        //   h e l l o
        //   o   o   r
        //   l   w   l
        //   d       d e w
        assert_eq!(cw.words(), &[
            PlacedWord::new("hello", Position::new(7, 5), Orientation::Horizontal),
            PlacedWord::new("world", Position::new(6, 9), Orientation::Vertical),
            PlacedWord::new("hold", Position::new(7, 5), Orientation::Vertical),
            PlacedWord::new("low", Position::new(7, 7), Orientation::Vertical),
            PlacedWord::new("dew", Position::new(10, 9), Orientation::Horizontal),
        ]);
        assert!(cw.is_consistent());
        assert_eq!(cw.grid().letter_runs().len(), words.len());
    }

    #[test]
    fn test_generator_word_longer_than_coordinates()
    {
        let gen = CrosswordGenerator::<u8, String>::new(["a".repeat(65539)], CrosswordGeneratorSettings::default());
        assert_eq!(gen.generate(), None);

        let gen = CrosswordGenerator::<u8, String>::new(["cat".to_owned(), "a".repeat(40000)], CrosswordGeneratorSettings::default());
        let mut cw = Crossword::new(15);
        assert!(!gen.place_all(&mut cw));
        assert!(cw.grid().is_empty());
    }

    #[test]
    fn test_commit_undone_on_drop()
    {
        let mut cw = Crossword::<u8, &str>::new(15);
        cw.place_word(PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal)).unwrap();
        let before = cw.clone();

        {
            let commit = Commit::new(&mut cw, PlacedWord::new("car", Position::new(7, 6), Orientation::Vertical)).unwrap();
            assert_eq!(commit.words().len(), 2);
        }
        assert_eq!(cw, before);

        let commit = Commit::new(&mut cw, PlacedWord::new("car", Position::new(7, 6), Orientation::Vertical)).unwrap();
        commit.keep();
        assert_eq!(cw.words().len(), 2);
    }

    #[test]
    fn test_commit_rejects_invalid_word()
    {
        let mut cw = Crossword::<u8, &str>::new(15);
        cw.place_word(PlacedWord::new("cat", Position::new(7, 6), Orientation::Horizontal)).unwrap();

        let commit = Commit::new(&mut cw, PlacedWord::new("dog", Position::new(7, 6), Orientation::Vertical));
        assert_eq!(commit.err(), Some(CrosswordError::CantPlaceWord));
    }

    #[test]
    fn test_generate_random_attempts()
    {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GeneratorConfig { max_attempts: 0, ..Default::default() };

        assert_eq!(generate_random(&config, &mut rng), Err(GenerationError::AttemptsExhausted { attempts: 0 }));

        let config = GeneratorConfig { max_attempts: 100, ..Default::default() };
        let cw = generate_random(&config, &mut rng).unwrap();
        assert_eq!(cw.words().len(), config.selection.word_count);
        assert!(cw.is_consistent());
    }
}
