//! CLI tool for generating square carousel decks from a topic.

use anyhow::{anyhow, Context, Result};
use carousel_core::{
    CarouselPipeline, CompletionService, DeckArtifact, Outline, OutlineValidator,
    SlideTextFormatter, Submission,
};
use carousel_groq::{GroqClient, GroqConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use carousel_pptx::{DeckReader, PptxRenderer};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Turn a topic into a downloadable square slide deck.
#[derive(Parser, Debug)]
#[command(name = "carousel")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the model for an outline and render it to a .pptx deck
    Generate(GenerateArgs),

    /// Render a deck from a saved outline JSON file
    Render(RenderArgs),

    /// Print the text of every slide in one or more decks
    Inspect(InspectArgs),
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// What the carousel is about (e.g. "Game Theory")
    topic: Option<String>,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, default_value = "")]
    api_key: String,

    /// Model identifier
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// API origin
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Give up on the completion service after this many seconds (default: wait)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Also write the validated outline as JSON to this path
    #[arg(long)]
    save_outline: Option<PathBuf>,

    #[command(flatten)]
    deck: DeckArgs,
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Outline JSON file
    outline: PathBuf,

    /// Topic used for the file name (default: the cover title)
    #[arg(short, long)]
    topic: Option<String>,

    #[command(flatten)]
    deck: DeckArgs,
}

#[derive(clap::Args, Debug)]
struct DeckArgs {
    /// Output directory (default: current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reject outlines with mismatched slide numbers or outside 5-8 questions
    #[arg(long)]
    strict: bool,

    /// Print the outline text to stdout
    #[arg(short, long)]
    print: bool,
}

#[derive(clap::Args, Debug)]
struct InspectArgs {
    /// Deck file(s) to read (.pptx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Prefix each slide with its number
    #[arg(short, long)]
    numbered: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &args.command {
        Command::Generate(generate) => {
            let path = generate_deck(generate, |submission| {
                let config = GroqConfig::new()
                    .with_base_url(&generate.base_url)
                    .with_model(&generate.model)
                    .with_timeout(generate.timeout_secs.map(Duration::from_secs));
                GroqClient::new(submission.api_key(), config)
            })?;
            eprintln!("Done! Deck written to {}", path.display());
        }
        Command::Render(render) => {
            let path = run_render(render)?;
            eprintln!("Deck written to {}", path.display());
        }
        Command::Inspect(inspect) => {
            let formatter = SlideTextFormatter::new().with_numbers(inspect.numbered);
            for input_path in &inspect.input {
                match inspect_file(input_path, &formatter) {
                    Ok(output) => print!("{}", output),
                    Err(e) => eprintln!("Error reading {}: {}", input_path.display(), e),
                }
            }
        }
    }

    Ok(())
}

/// Report a domain error with its short user-facing message.
fn user_facing(err: carousel_core::Error) -> anyhow::Error {
    log::debug!("{}", err);
    anyhow!(err.user_message())
}

fn validator(deck: &DeckArgs) -> OutlineValidator {
    OutlineValidator::new()
        .with_strict_positions(deck.strict)
        .with_enforce_qa_count(deck.strict)
}

/// Check the form, connect to the completion service, and write the deck.
///
/// `connect` only runs once the topic and credential have been accepted.
fn generate_deck<C, F>(args: &GenerateArgs, connect: F) -> Result<PathBuf>
where
    C: CompletionService,
    F: FnOnce(&Submission) -> carousel_core::Result<C>,
{
    let submission = Submission::new(args.topic.clone().unwrap_or_default(), args.api_key.clone())
        .map_err(user_facing)?;
    let completion = connect(&submission).map_err(user_facing)?;

    eprintln!("Contacting Groq, generating content...");
    run_generate(&submission, completion, args)
}

/// Run the full pipeline for a validated submission and write the deck.
fn run_generate<C: CompletionService>(
    submission: &Submission,
    completion: C,
    args: &GenerateArgs,
) -> Result<PathBuf> {
    let pipeline = CarouselPipeline::new(completion, PptxRenderer::new())
        .with_validator(validator(&args.deck));

    let generated = pipeline.run(submission).map_err(user_facing)?;

    if let Some(path) = &args.save_outline {
        let json = serde_json::to_string_pretty(&generated.outline)?;
        write_output(path, json.as_bytes())?;
    }

    finish_deck(&generated.outline, &generated.artifact, &args.deck)
}

/// Render a deck from an outline file without contacting the model.
fn run_render(args: &RenderArgs) -> Result<PathBuf> {
    let json = std::fs::read_to_string(&args.outline)
        .with_context(|| format!("Failed to read {}", args.outline.display()))?;
    let outline = validator(&args.deck)
        .validate_str(&json)
        .map_err(user_facing)?;

    let topic = args
        .topic
        .clone()
        .unwrap_or_else(|| outline.cover().title().to_string());

    let pipeline = CarouselPipeline::new(NoCompletion, PptxRenderer::new());
    let artifact = pipeline.render(&topic, &outline).map_err(user_facing)?;

    finish_deck(&outline, &artifact, &args.deck)
}

/// Print the outline if requested and write the deck to disk.
fn finish_deck(outline: &Outline, artifact: &DeckArtifact, deck: &DeckArgs) -> Result<PathBuf> {
    if deck.print {
        print!("{}", SlideTextFormatter::new().format_outline(outline));
    }

    let output_path = get_output_path(&artifact.file_name, deck.output.as_ref())?;
    write_output(&output_path, &artifact.bytes)?;
    log::info!(
        "Wrote {} slides ({}) to {}",
        artifact.slide_count,
        artifact.content_type,
        output_path.display()
    );
    Ok(output_path)
}

/// Completion service for commands that never ask the model anything.
struct NoCompletion;

impl CompletionService for NoCompletion {
    fn complete(&self, _prompt: &str) -> carousel_core::Result<String> {
        Err(carousel_core::Error::Transport(
            "no completion service configured".to_string(),
        ))
    }

    fn extract(&self, _text: &str, _schema: &serde_json::Value) -> carousel_core::Result<String> {
        Err(carousel_core::Error::Transport(
            "no completion service configured".to_string(),
        ))
    }
}

/// Read a deck and format its slide text.
fn inspect_file(input_path: &Path, formatter: &SlideTextFormatter) -> Result<String> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let reader = BufReader::new(file);

    let deck = DeckReader::new()
        .read(reader)
        .map_err(|e| anyhow!("{}", e))?;

    log::debug!(
        "{}: {} slides, {}x{} EMU",
        input_path.display(),
        deck.slides.len(),
        deck.slide_width,
        deck.slide_height
    );

    Ok(formatter.format_deck(&deck))
}

/// Determine the output path for a deck file.
fn get_output_path(file_name: &str, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(file_name)
        }
        None => PathBuf::from(file_name),
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
