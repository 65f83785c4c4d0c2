mod config;
mod host;
mod raster;
mod script;

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use measure::classify::Policy;
use measure::engine::Action;

use config::{DEFAULT_DPR, DEFAULT_VIEWPORT, MeterConfig, parse_point, parse_size};
use host::{Host, format_action, format_readout};
use script::{ScriptEvent, parse_script};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Raster(#[from] raster::RasterError),
    #[error("script parse failed: {0}")]
    Script(#[from] script::ScriptError),
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "goldmeter", about = "Measure two distances on an image and compare their ratio to the golden ratio")]
struct Cli {
    /// Classification policy: proximity or absolute.
    #[arg(long, global = true, env = "GOLDMETER_POLICY", default_value = "proximity")]
    policy: String,

    /// Window size used to suggest a display surface, as WIDTHxHEIGHT.
    #[arg(long, global = true, env = "GOLDMETER_VIEWPORT", default_value = DEFAULT_VIEWPORT)]
    viewport: String,

    /// Backing pixels per logical pixel.
    #[arg(long, global = true, env = "GOLDMETER_DPR", default_value_t = DEFAULT_DPR)]
    dpr: f64,

    /// Log to stderr (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load an image and place points on it. Clicks are logical surface pixels.
    Measure {
        image: PathBuf,
        #[arg(long = "click", value_name = "X,Y")]
        clicks: Vec<String>,
        /// Override the suggested surface, as WIDTHxHEIGHT.
        #[arg(long)]
        surface: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Classify a single ratio under the configured policy.
    Classify { ratio: f64 },
    /// Run an event script from a file, or - for stdin.
    Replay {
        #[arg(default_value = "-")]
        script: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = MeterConfig::from_parts(&cli.policy, &cli.viewport, cli.dpr)?;
    tracing::debug!(policy = config.policy.as_str(), viewport = ?config.viewport, dpr = config.dpr, "configured");

    match cli.command {
        Command::Measure { image, clicks, surface, json } => run_measure(&config, image, &clicks, surface.as_deref(), json),
        Command::Classify { ratio } => {
            run_classify(&config, ratio);
            Ok(())
        }
        Command::Replay { script, json } => run_replay(&config, &script, json),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

fn run_measure(
    config: &MeterConfig,
    image: PathBuf,
    clicks: &[String],
    surface: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let mut events = vec![ScriptEvent::Load { path: image }];
    if let Some(raw) = surface {
        let (logical_w, logical_h) = parse_size(raw)?;
        events.push(ScriptEvent::Resize { logical_w, logical_h, backing: None });
    }
    for raw in clicks {
        let (x, y) = parse_point(raw)?;
        events.push(ScriptEvent::Click { x, y });
    }
    drive(config, &events, json)
}

fn run_classify(config: &MeterConfig, ratio: f64) {
    let bucket = Policy::for_kind(config.policy).classify(Some(ratio));
    let display = bucket.display();
    println!("{} {}", display.label, display.color);
}

fn run_replay(config: &MeterConfig, source: &str, json: bool) -> Result<(), CliError> {
    let read_err = |err: io::Error| CliError::Read { path: source_name(source), source: err };
    let text = if source == "-" {
        io::read_to_string(io::stdin()).map_err(read_err)?
    } else {
        std::fs::read_to_string(source).map_err(read_err)?
    };
    let events = parse_script(&text)?;
    drive(config, &events, json)
}

fn source_name(source: &str) -> String {
    if source == "-" { "stdin".to_owned() } else { source.to_owned() }
}

/// Apply events in order, printing action lines and then the final state.
fn drive(config: &MeterConfig, events: &[ScriptEvent], json: bool) -> Result<(), CliError> {
    let mut host = Host::new(config);
    for event in events {
        let actions = host.apply(event)?;
        if !json {
            print_actions(&actions);
        }
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&host.report())?);
    } else {
        println!("{}", format_readout(&host.engine().readout()));
    }
    Ok(())
}

fn print_actions(actions: &[Action]) {
    for action in actions {
        if !matches!(action, Action::RenderNeeded) {
            println!("{}", format_action(action));
        }
    }
}
