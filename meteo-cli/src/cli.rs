use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Select};
use meteo_core::{
    App, Config, Geolocator, Outcome, PreferenceStore, UnitSystem, WeatherProvider,
    present::candidate_labels, provider_from_config,
};

use crate::output::print_outcome;

type MeteoApp = App<Box<dyn WeatherProvider>>;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Weather lookup client backed by Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for the last location, or the default city on first run.
    Show,

    /// Look up a place by name and show its weather.
    Search {
        /// Place name, e.g. "Springfield" or "Paris, France".
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Pick the N-th candidate (1-based) instead of prompting when the
        /// name is ambiguous.
        #[arg(long)]
        pick: Option<usize>,
    },

    /// Switch the unit system and refresh the current location.
    Units {
        #[arg(value_parser = ["metric", "imperial"], ignore_case = true)]
        units: String,
    },

    /// Show weather at the device location.
    Here,

    /// Print the configuration, or write a default config file.
    Config {
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show => {
                let (_, mut app) = open_app()?;
                let outcome = app.restore().await;
                print_outcome(app.state(), &outcome);
            }
            Command::Search { query, pick } => {
                let (_, mut app) = open_app()?;
                let mut outcome = app.search(&query.join(" ")).await;
                if outcome == Outcome::Candidates {
                    outcome = choose(&mut app, pick).await?;
                }
                print_outcome(app.state(), &outcome);
            }
            Command::Units { units } => {
                let units = UnitSystem::try_from(units.as_str())?;
                let (_, mut app) = open_app()?;
                let outcome = app.set_units(units).await;
                if outcome == Outcome::Idle {
                    println!("Units set to {units}.");
                }
                print_outcome(app.state(), &outcome);
            }
            Command::Here => {
                let (config, mut app) = open_app()?;
                let mut geolocator = Geolocator::from_device_config(config.device);
                let outcome = app.use_device_location(&mut geolocator).await;
                print_outcome(app.state(), &outcome);
            }
            Command::Config { init } => show_config(init)?,
        }

        Ok(())
    }
}

fn open_app() -> anyhow::Result<(Config, MeteoApp)> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let store = PreferenceStore::open_default()?;
    let app = App::start(provider, store, config.seed_location.clone());
    Ok((config, app))
}

/// Resolve an ambiguous search, from `--pick` or an interactive prompt.
async fn choose(app: &mut MeteoApp, pick: Option<usize>) -> anyhow::Result<Outcome> {
    let candidates = app.state().candidates.clone();

    let index = match pick {
        Some(n) => n
            .checked_sub(1)
            .filter(|i| *i < candidates.len())
            .ok_or_else(|| anyhow!("--pick must be between 1 and {}", candidates.len()))?,
        None => {
            let labels = candidate_labels(&candidates);
            match Select::new("Several places match. Which one?", labels).raw_prompt() {
                Ok(choice) => choice.index,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(Outcome::Idle);
                }
                Err(InquireError::NotTTY) => {
                    print_outcome(app.state(), &Outcome::Candidates);
                    println!("Re-run with --pick <N> to choose one.");
                    return Ok(Outcome::Idle);
                }
                Err(e) => return Err(e).context("Failed to read selection"),
            }
        }
    };

    let location = candidates
        .get(index)
        .cloned()
        .ok_or_else(|| anyhow!("No candidate at position {}", index + 1))?;

    Ok(app.select(location).await)
}

fn show_config(init: bool) -> anyhow::Result<()> {
    let path = Config::config_file_path()?;

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            Config::default().save()?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    let store = PreferenceStore::open_default()?;
    println!("# config:      {}", path.display());
    println!("# preferences: {}", store.path().display());
    print!("{}", config.to_toml()?);

    Ok(())
}
