mod api;
mod config;
mod output;
mod parse;
mod render;

use clap::Parser;
use pickwise_core::constants::{CANDIDATES_KEY, CONSTRAINTS_KEY};
use pickwise_core::{
    distinct_names, load_candidates, load_itinerary, normalized_scores, parse_candidates,
    ranked_scores, save_candidates, save_itinerary, scored_events, Candidate, Constraints,
    FileStore, Judge, KeyValueStore, RankingSession, RatingStore, Signal,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::api::ApiClient;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "pickwise", version, about = "Rank activities by choosing between pairs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: ~/.config/pickwise/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for persisted state (default: ~/.local/share/pickwise)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Itinerary service base URL (e.g. http://127.0.0.1:5000)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Store a candidate list (JSON array of {name, address, ...})
    Import {
        file: PathBuf,
    },
    /// Ask the itinerary service for candidate activities and store them
    Fetch {
        /// JSON file with destination, date_of_travel, address, freeform_text
        #[arg(long)]
        constraints: PathBuf,
    },
    /// Choose between pairs of candidates interactively
    Rank,
    /// Print the current normalized score per candidate
    Scores {
        /// Output JSON instead of table
        #[arg(long)]
        json: bool,
    },
    /// Forget all ratings and the comparison count
    Reset,
    /// Generate an itinerary weighted by the current scores
    Generate {
        /// Constraints file; defaults to the constraints stored by `fetch`
        #[arg(long)]
        constraints: Option<PathBuf>,

        /// Output JSON instead of a schedule
        #[arg(long)]
        json: bool,
    },
    /// Show the last generated itinerary
    Itinerary {
        /// Output JSON instead of a schedule
        #[arg(long)]
        json: bool,
    },
    /// Create a default config file at ~/.config/pickwise/config.toml
    Init,
}

/// Resolved settings: CLI flags win over the config file.
struct Context {
    data_dir: PathBuf,
    endpoint: String,
}

impl Context {
    fn resolve(cli: &Cli) -> Self {
        let config_path = cli.config.clone().unwrap_or_else(config::config_path);
        let cfg = config::load_config(&config_path);

        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| cfg.data_dir.map(PathBuf::from))
            .unwrap_or_else(config::default_data_dir);
        let endpoint = cli
            .endpoint
            .clone()
            .or(cfg.endpoint)
            .unwrap_or_else(|| config::DEFAULT_ENDPOINT.to_string());

        Context { data_dir, endpoint }
    }

    fn open_store(&self) -> FileStore {
        FileStore::open(&self.data_dir).unwrap_or_else(|e| bail(e))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init = cli.command {
        let path = cli.config.clone().unwrap_or_else(config::config_path);
        config::create_default_config(&path);
        println!("Created config at {}", path.display());
        println!("Edit it to set your data directory and itinerary endpoint.");
        return;
    }

    let ctx = Context::resolve(&cli);

    match cli.command {
        Commands::Import { file } => run_import(&ctx, &file),
        Commands::Fetch { constraints } => run_fetch(&ctx, &constraints).await,
        Commands::Rank => run_rank(&ctx),
        Commands::Scores { json } => run_scores(&ctx, json),
        Commands::Reset => run_reset(&ctx),
        Commands::Generate { constraints, json } => {
            run_generate(&ctx, constraints.as_deref(), json).await
        }
        Commands::Itinerary { json } => run_itinerary(&ctx, json),
        Commands::Init => unreachable!("handled above"),
    }
}

fn run_import(ctx: &Context, file: &Path) {
    let content = std::fs::read_to_string(file)
        .unwrap_or_else(|e| bail(format!("Failed to read {}: {e}", file.display())));
    let candidates = parse_candidates(&content);
    if candidates.is_empty() {
        bail(format!("No usable candidates in {} (expected a JSON array of objects with name and address)", file.display()));
    }

    // Kept as supplied; entries without name/address are skipped on load.
    let mut store = ctx.open_store();
    store.set(CANDIDATES_KEY, &content).unwrap_or_else(|e| bail(e));
    println!("Stored {} candidates ({} distinct names)", candidates.len(), distinct_names(&candidates));
}

fn read_constraints_file(path: &Path) -> Constraints {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read {}: {e}", path.display())));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse constraints in {}: {e}", path.display())))
}

fn stored_constraints<S: KeyValueStore>(store: &S) -> Option<Constraints> {
    let raw = store.get(CONSTRAINTS_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

async fn run_fetch(ctx: &Context, constraints_path: &Path) {
    let constraints = read_constraints_file(constraints_path);
    let api = ApiClient::new(&ctx.endpoint);

    let events = api.generate_activities(&constraints).await.unwrap_or_else(|e| bail(e));
    let candidates: Vec<Candidate> = events.into_iter().map(Candidate::from).collect();

    let mut store = ctx.open_store();
    save_candidates(&mut store, &candidates).unwrap_or_else(|e| bail(e));
    let json = serde_json::to_string(&constraints).unwrap_or_else(|e| bail(e));
    store.set(CONSTRAINTS_KEY, &json).unwrap_or_else(|e| bail(e));

    println!("Stored {} candidates for {}", candidates.len(), constraints.destination);
}

/// Reads answers from stdin, one line per round.
struct TerminalJudge<R> {
    input: R,
}

impl<R: BufRead> Judge for TerminalJudge<R> {
    fn judge(&mut self, left: &Candidate, right: &Candidate, comparisons: u64) -> Signal {
        print!("{}", render::render_pair(left, right, comparisons));
        loop {
            let _ = io::stdout().flush();
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => return Signal::Stop,
                Ok(_) => {}
            }
            match parse::parse_signal(&line) {
                Some(signal) => return signal,
                None => print!("Please answer 1, 2, r or q: "),
            }
        }
    }
}

fn run_rank(ctx: &Context) {
    let store = ctx.open_store();
    let candidates = load_candidates(&store);

    let Some(mut session) = RankingSession::start(candidates, RatingStore::new(store), rand::rng()) else {
        eprintln!("Need at least 2 distinct candidates to rank. Use `pickwise import` or `pickwise fetch` first.");
        return;
    };

    let mut judge = TerminalJudge { input: io::stdin().lock() };
    if let Err(e) = session.run(&mut judge) {
        bail(e);
    }

    println!("\n{} comparisons recorded.", session.comparisons());
}

fn run_scores(ctx: &Context, json: bool) {
    let store = ctx.open_store();
    let candidates = load_candidates(&store);
    let state = RatingStore::new(store).load();
    let scores = ranked_scores(&state, &candidates);

    if json {
        output::print_json(&scores, &state);
    } else {
        output::print_table(&scores, &state);
    }
}

fn run_reset(ctx: &Context) {
    let mut ratings = RatingStore::new(ctx.open_store());
    let mut state = ratings.load();
    ratings.reset(&mut state).unwrap_or_else(|e| bail(e));
    println!("Ratings cleared.");
}

async fn run_generate(ctx: &Context, constraints_path: Option<&Path>, json: bool) {
    let mut store = ctx.open_store();
    let constraints = match constraints_path {
        Some(path) => read_constraints_file(path),
        None => stored_constraints(&store).unwrap_or_else(|| {
            bail("No constraints stored. Pass --constraints <file> or run `pickwise fetch` first.")
        }),
    };

    let candidates = load_candidates(&store);
    if candidates.is_empty() {
        bail("No candidates stored. Use `pickwise import` or `pickwise fetch` first.");
    }

    let state = RatingStore::new(store.clone()).load();
    let events = scored_events(&normalized_scores(&state, &candidates));

    eprintln!("Generating itinerary from {} scored candidates…", events.len());
    let api = ApiClient::new(&ctx.endpoint);
    // On failure the ranking state is left as it was, so this can be rerun.
    let itinerary = api.generate_itinerary(&constraints, &events).await.unwrap_or_else(|e| bail(e));

    save_itinerary(&mut store, &itinerary).unwrap_or_else(|e| bail(e));

    if json {
        output::print_itinerary_json(&itinerary);
    } else {
        output::print_itinerary(&itinerary);
    }
}

fn run_itinerary(ctx: &Context, json: bool) {
    let store = ctx.open_store();
    let Some(itinerary) = load_itinerary(&store) else {
        eprintln!("No itinerary saved yet. Run `pickwise generate` first.");
        return;
    };

    if json {
        output::print_itinerary_json(&itinerary);
    } else {
        output::print_itinerary(&itinerary);
    }
}
