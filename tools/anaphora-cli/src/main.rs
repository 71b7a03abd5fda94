use std::fs;
use std::path::PathBuf;

use anaphora_protocol::AnnotatedSentence;
use anaphora_solver::{Hobbs, ResolverConfig};
use anyhow::Context;
use clap::Parser;
use log::{info, warn, LevelFilter};

#[derive(Parser)]
#[command(author, version, about = "Resolves pronouns in a sequence of annotated sentences")]
struct Cli {
    /// JSON array of annotated sentences, in discourse order
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// JSON resolver settings; missing keys take their defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "N")]
    max_proposals: Option<usize>,

    #[arg(long, value_name = "N")]
    history_depth: Option<usize>,

    /// Print the anaphor -> candidates mapping as JSON
    #[arg(long)]
    json: bool,

    /// -v for progress, -vv for every proposal, -vvv for history evictions
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ResolverConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ResolverConfig::default(),
    };

    if let Some(n) = cli.max_proposals {
        config.max_proposals = n;
    }
    if let Some(n) = cli.history_depth {
        config.history_depth = n;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level(cli.verbose))
        .parse_default_env()
        .init();

    let config = load_config(&cli)?;
    info!("resolver settings: {:?}", config);

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let sentences: Vec<AnnotatedSentence> =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", cli.input.display()))?;
    info!("read {} sentence(s) from {}", sentences.len(), cli.input.display());

    let mut hobbs = Hobbs::new(config);
    for (i, sentence) in sentences.iter().enumerate() {
        match hobbs.process(sentence) {
            Ok(id) => info!("sentence {} processed as {}", i, id),
            // One bad sentence does not stop the run
            Err(err) => warn!("skipping sentence {}: {}", i, err),
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&hobbs.export())?);
    } else {
        print!("{}", hobbs.antecedents());
    }
    Ok(())
}
