use std::{io::{self, BufRead, Write}, path::PathBuf, process::ExitCode};

use clap::Parser;
use serde::Serialize;
use tokio_stream::StreamExt;

use crossword_gen::config::{validate_words, GeneratorConfig};
use crossword_gen::crossword::Crossword;
use crossword_gen::generator::{CrosswordGenerationRequest, CrosswordGenerator, CrosswordStream};
use crossword_gen::placed_word::PlacedWord;

/// Lays words out on a square grid as a single connected crossword
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli
{
    /// Words to place; random words from the vocabulary are drawn when none are given
    words: Vec<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side length of the grid
    #[arg(short, long)]
    grid_size: Option<usize>,

    /// Seed for drawing random words
    #[arg(long)]
    seed: Option<u64>,

    /// Word lists to try before giving up on a crossword
    #[arg(short = 'a', long)]
    max_attempts: Option<u32>,

    /// Maximum number of placement steps per search
    #[arg(long)]
    max_steps: Option<u64>,

    /// Print the crossword as JSON
    #[arg(long)]
    json: bool,

    /// Generate a single crossword without asking for another one
    #[arg(long)]
    once: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a>
{
    rows: Vec<String>,
    words: &'a [PlacedWord<u8, String>],
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode
{
    let cli = Cli::parse();

    crossword_gen::log::init_logger(cli.debug || crossword_gen::log::debug_requested());

    if let Err(e) = try_main(cli).await
    {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    }
    else
    {
        ExitCode::SUCCESS
    }
}

/// Builds the configuration (file first, then command line overrides) and runs either a single
/// generation for the given words or the interactive loop over random words.
async fn try_main(cli: Cli) -> Result<(), Box<dyn std::error::Error>>
{
    let mut config = match &cli.config
    {
        Some(path) => GeneratorConfig::from_path(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(grid_size) = cli.grid_size { config.generator.grid_size = grid_size; }
    if let Some(max_steps) = cli.max_steps { config.generator.max_steps = Some(max_steps); }
    if let Some(max_attempts) = cli.max_attempts { config.max_attempts = max_attempts; }
    if cli.seed.is_some() { config.seed = cli.seed; }
    config.validate()?;

    if !cli.words.is_empty()
    {
        let words = cli.words.iter().map(|w| w.to_lowercase()).collect::<Vec<_>>();
        validate_words(&words)?;

        let generator = CrosswordGenerator::<u8, String>::new(words, config.generator.clone());
        match generator.generate()
        {
            Some(crossword) =>
            {
                log::info!("Crossword puzzle generated successfully.");
                print_crossword(&crossword, cli.json)?;
            }
            None => return Err("failed to generate a crossword puzzle with the given words".into()),
        }
        return Ok(());
    }

    let mut crosswords = CrosswordStream::new(config);
    loop
    {
        crosswords.request_crossword(CrosswordGenerationRequest::Count(1)).await?;

        match crosswords.next().await
        {
            Some(Ok(crossword)) =>
            {
                log::info!("Crossword puzzle generated successfully.");
                print_crossword(&crossword, cli.json)?;
            }
            Some(Err(e)) => log::warn!("{e}"),
            None => return Ok(()),
        }

        if cli.once || !prompt_for_new_puzzle()?
        {
            break;
        }
    }
    crosswords.request_crossword(CrosswordGenerationRequest::Stop).await?;

    Ok(())
}

fn print_crossword(crossword: &Crossword<u8, String>, json: bool) -> Result<(), Box<dyn std::error::Error>>
{
    if json
    {
        let rows = crossword.grid().to_string().lines().map(str::to_owned).collect();
        println!("{}", serde_json::to_string_pretty(&JsonOutput { rows, words: crossword.words() })?);
    }
    else
    {
        println!("Words:");
        for word in crossword.words()
        {
            println!("  {} at ({}, {}) {:?}", word.value, word.position.row, word.position.col, word.orientation);
        }
        print!("{}", crossword.grid());
    }
    Ok(())
}

fn prompt_for_new_puzzle() -> io::Result<bool>
{
    print!("Generate another puzzle? Enter 'yes' or 'no': ");
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().lock().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("yes"))
}
