use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tinyrand::{Seeded, StdRand};
use tracing::{debug, error, info};

use courtside::classifier::Classifier;
use courtside::closed_form::Venue;
use courtside::context::Context;
use courtside::data::DataConfig;
use courtside::noise::Gaussian;
use courtside::print::{tabulate_rosters, tabulate_standings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Model {
    ClosedForm,
    Classifier,
}

fn parse_model(s: &str) -> anyhow::Result<Model> {
    match s.to_lowercase().as_str() {
        "closed-form" | "c" => Ok(Model::ClosedForm),
        "classifier" | "ml" => Ok(Model::Classifier),
        _ => Err(anyhow!("unsupported model {s}")),
    }
}

fn parse_venue(s: &str) -> anyhow::Result<Venue> {
    Ok(s.parse()?)
}

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// data source configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// first team
    #[clap(short = 'a', long)]
    team_a: Option<String>,

    /// second team
    #[clap(short = 'b', long)]
    team_b: Option<String>,

    /// whether the first team plays at home: yes, no or neutral
    #[clap(short = 'H', long, value_parser = parse_venue)]
    home: Option<Venue>,

    /// prediction model: closed-form or classifier
    #[clap(short, long, value_parser = parse_model, default_value = "closed-form")]
    model: Model,

    /// seed for the score noise of the classifier
    #[clap(short, long)]
    seed: Option<u64>,

    /// print the standings and roster tables
    #[clap(short, long)]
    tables: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.config
            .as_ref()
            .ok_or(anyhow!("config file must be specified"))?;
        Ok(())
    }
}

fn prompt(message: &str) -> anyhow::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("no answer to '{}'", message.trim_end());
    }
    Ok(line.trim().to_string())
}

fn main() -> ExitCode {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = DataConfig::load(args.config.as_ref().unwrap_or(&PathBuf::new()))?;
    let sources = config.sources();
    let context = Context::build(&sources, &config.context)?;

    if args.tables {
        info!(
            "standings:\n{}",
            Console::default().render(&tabulate_standings(context.standings(), context.strengths()))
        );
        info!(
            "rosters:\n{}",
            Console::default().render(&tabulate_rosters(context.rosters()))
        );
    }

    let team_a = match args.team_a {
        Some(team) => team,
        None => prompt("team A: ")?,
    };
    let team_b = match args.team_b {
        Some(team) => team,
        None => prompt("team B: ")?,
    };
    let venue = match args.home {
        Some(venue) => venue,
        None => prompt("is team A at home? (yes/no/neutral): ")?.parse()?,
    };

    match args.model {
        Model::ClosedForm => {
            let forecast = context.closed_form().predict(&team_a, &team_b, venue)?;
            println!("{forecast}");
        }
        Model::Classifier => {
            let classifier = Classifier::train(&context, &config.classifier)?;
            let home = match venue {
                Venue::AHome => Some(team_a.as_str()),
                Venue::BHome => Some(team_b.as_str()),
                Venue::Neutral => None,
            };
            let seed = match args.seed {
                Some(seed) => seed,
                None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
            };
            debug!("noise seed: {seed}");
            let mut noise = Gaussian::new(StdRand::seed(seed));
            let forecast = classifier.predict(&team_a, &team_b, home, &mut noise)?;
            println!("{forecast}");
        }
    }
    Ok(())
}
