use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{EngineConfig, ExtractionRequest, ExtractionResult, RecommendationAssembler};
use gazetteer::Gazetteer;
use rayon::prelude::*;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// TravelRecs - travel recommendation extractor
#[derive(Parser)]
#[command(name = "travel-recs")]
#[command(about = "Extract structured travel recommendations from generated text", long_about = None)]
struct Cli {
    /// Engine config (JSON); built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Replacement regions.dat alias table
    #[arg(long, global = true)]
    gazetteer: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract recommendations from one response (file or stdin)
    Extract {
        /// Raw response text, or a JSON request with `rawText`
        #[arg(long)]
        input: Option<PathBuf>,

        /// The user's declared location
        #[arg(long)]
        location: Option<String>,

        /// Preference tag (repeatable)
        #[arg(long = "vibe")]
        vibes: Vec<String>,

        /// Print the wire JSON instead of formatted output
        #[arg(long)]
        json: bool,

        /// Show which extraction path was taken
        #[arg(long)]
        explain: bool,
    },

    /// Extract every *.txt / *.json file in a directory in parallel
    Batch {
        #[arg(long)]
        dir: PathBuf,

        #[arg(long)]
        location: Option<String>,

        #[arg(long = "vibe")]
        vibes: Vec<String>,
    },

    /// Inspect the gazetteer
    Lookup {
        /// Exact alias to resolve
        #[arg(long)]
        alias: Option<String>,

        /// Free text to scan for the first known region
        #[arg(long)]
        text: Option<String>,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Response file to extract repeatedly
        #[arg(long)]
        input: PathBuf,

        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let gazetteer = Arc::new(load_gazetteer(cli.gazetteer.as_deref())?);
    let config_path = cli.config.as_deref();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Extract {
            input,
            location,
            vibes,
            json,
            explain,
        } => {
            let assembler = build_assembler(gazetteer, config_path)?;
            handle_extract(&assembler, input, location, vibes, json, explain)?
        }
        Commands::Batch {
            dir,
            location,
            vibes,
        } => {
            let assembler = build_assembler(gazetteer, config_path)?;
            handle_batch(&assembler, &dir, location, vibes)?
        }
        Commands::Lookup { alias, text } => handle_lookup(&gazetteer, alias, text)?,
        Commands::Benchmark { input, requests } => {
            let assembler = build_assembler(gazetteer, config_path)?;
            handle_benchmark(assembler, &input, requests).await?
        }
    }

    Ok(())
}

fn build_assembler(gazetteer: Arc<Gazetteer>, config_path: Option<&Path>) -> Result<RecommendationAssembler> {
    let config = load_config(config_path)?;
    RecommendationAssembler::new(gazetteer, config).context("Failed to build the extraction engine")
}

fn load_gazetteer(path: Option<&Path>) -> Result<Gazetteer> {
    match path {
        Some(path) => Gazetteer::load_from_file(path)
            .with_context(|| format!("Failed to load gazetteer from {}", path.display())),
        None => Gazetteer::builtin().context("Built-in gazetteer is invalid"),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load engine config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Build a request from file content.
///
/// Content that is a JSON object with a raw-text key is a full request;
/// anything else (including a bare `{"recommendations": ...}` response) is
/// the raw text itself. Flags override the request's own location and tags.
fn build_request(content: String, location: Option<String>, vibes: Vec<String>) -> Result<ExtractionRequest> {
    let mut request = match serde_json::from_str::<Value>(&content) {
        Ok(value) if is_request_object(&value) => ExtractionRequest::from_value(&value)?,
        _ => ExtractionRequest::new(content),
    };
    if location.is_some() {
        request.location = location;
    }
    if !vibes.is_empty() {
        request.preference_tags = vibes;
    }
    Ok(request)
}

fn is_request_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|o| ["rawText", "raw_text", "response"].iter().any(|k| o.contains_key(*k)))
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Handle the 'extract' command
fn handle_extract(
    assembler: &RecommendationAssembler,
    input: Option<PathBuf>,
    location: Option<String>,
    vibes: Vec<String>,
    json: bool,
    explain: bool,
) -> Result<()> {
    let content = read_input(input.as_deref())?;
    let request = build_request(content, location, vibes)?;

    let start = Instant::now();
    let result = assembler.extract_request(&request);
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&result.to_list())?);
    } else {
        print_recommendations(&result);
    }

    if explain {
        println!();
        println!("{}", "Extraction details:".bold().blue());
        println!("{}Strategy: {}", "• ".cyan(), result.strategy);
        println!("{}Used fallback content: {}", "• ".cyan(), result.used_fallback);
        println!(
            "{}Location hint: {}",
            "• ".cyan(),
            request.location.as_deref().unwrap_or("(none)")
        );
        println!(
            "{}Vibes: {}",
            "• ".cyan(),
            if request.preference_tags.is_empty() {
                "(none)".to_string()
            } else {
                request.preference_tags.join(", ")
            }
        );
        println!("{}Time: {:?}", "• ".cyan(), elapsed);
    }
    Ok(())
}

/// Handle the 'batch' command
fn handle_batch(
    assembler: &RecommendationAssembler,
    dir: &Path,
    location: Option<String>,
    vibes: Vec<String>,
) -> Result<()> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e == "txt" || e == "json")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        bail!("No .txt or .json files in {}", dir.display());
    }

    let start = Instant::now();
    let outcomes: Vec<(PathBuf, Result<ExtractionResult>)> = files
        .par_iter()
        .map(|path| {
            let outcome = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
                .and_then(|content| build_request(content, location.clone(), vibes.clone()))
                .map(|request| assembler.extract_request(&request));
            (path.clone(), outcome)
        })
        .collect();
    let elapsed = start.elapsed();

    let mut failures = 0;
    for (path, outcome) in &outcomes {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        match outcome {
            Ok(result) => {
                let places: Vec<&str> = result.recommendations.iter().map(|r| r.place.as_str()).collect();
                let marker = if result.used_fallback { "~".yellow() } else { "✓".green() };
                println!("{} {} [{}]: {}", marker, name, result.strategy, places.join(", "));
            }
            Err(e) => {
                failures += 1;
                println!("{} {}: {:#}", "✗".red(), name, e);
            }
        }
    }

    println!(
        "\nProcessed {} files in {:?} ({} failed)",
        outcomes.len(),
        elapsed,
        failures
    );
    Ok(())
}

/// Handle the 'lookup' command
fn handle_lookup(gazetteer: &Gazetteer, alias: Option<String>, text: Option<String>) -> Result<()> {
    match (alias, text) {
        (Some(alias), _) => {
            let region = gazetteer
                .canonical_for_alias(&alias)
                .ok_or_else(|| anyhow!("'{}' is not a known alias", alias))?;
            println!("{} → {}", alias.bold(), region.green());
            let aliases = gazetteer.aliases_for(region);
            println!("{}Aliases ({}): {}", "• ".cyan(), aliases.len(), aliases.join(", "));
        }
        (None, Some(text)) => match gazetteer.region_in_window(&text) {
            Some(region) => println!("{} {}", "First region:".bold(), region.green()),
            None => println!("{}", "No known region in text".yellow()),
        },
        (None, None) => bail!("Pass --alias or --text"),
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(assembler: RecommendationAssembler, input: &Path, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let content = read_input(Some(input))?;
    let request = Arc::new(build_request(content, None, Vec::new())?);

    // Extraction is CPU-bound, so each request runs on the blocking pool.
    let wall_clock = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let assembler = assembler.clone();
        let request = request.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let result = assembler.extract_request(&request);
            (start.elapsed(), result.len())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        let (elapsed, _count) = handle.await.context("Extraction task panicked")?;
        timings.push(elapsed);
    }
    let wall_time = wall_clock.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(result: &ExtractionResult) {
    println!("{}", "Travel Recommendations:".bold().blue());
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!(
            "{}. {} ({})",
            (i + 1).to_string().green(),
            rec.place.bold(),
            rec.region
        );
        println!("   {}", rec.rationale.italic());
        for activity in &rec.activities {
            println!("   {}{}", "• ".cyan(), activity);
        }
    }
}
