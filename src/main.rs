//! Dropdeck entry point
//!
//! Builds a run configuration from the command line (optionally on top of a
//! JSON config file), resolves the drop height and writes one deck per
//! orientation.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use dropdeck::{ConfirmDropHeight, OrientationSource, RunConfig, run_with};

#[derive(Parser, Debug)]
#[command(name = "dropdeck")]
#[command(version, about = "Generate drop-impact input decks, one per orientation")]
struct Cli {
    /// Run configuration (JSON); command-line paths override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// System model file with *node blocks
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// System initial conditions file
    #[arg(short = 'i', long)]
    conditions: Option<PathBuf>,

    /// Drop orientations file (rows of `id x y z`)
    #[arg(short, long, conflicts_with = "inline")]
    orientations: Option<PathBuf>,

    /// Drop orientations typed inline; rows separated by newlines or `;`
    #[arg(long)]
    inline: Option<String>,

    /// Drop height (mm) used when none is found or confirmed
    #[arg(long)]
    drop_height: Option<f64>,

    /// Accept the first drop height found without asking
    #[arg(short, long)]
    yes: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

/// Confirms drop heights on the terminal
struct TerminalPrompt {
    fallback: Option<f64>,
}

impl TerminalPrompt {
    fn ask(question: &str) -> Option<String> {
        print!("{question} ");
        io::stdout().flush().ok()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer).ok()?;
        Some(answer.trim().to_string())
    }
}

impl ConfirmDropHeight for TerminalPrompt {
    fn confirm(&mut self, value: f64, _line: &str) -> bool {
        Self::ask(&format!("Is drop_height = {value} mm correct? [y/N]"))
            .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes"))
    }

    fn fallback(&mut self) -> Option<f64> {
        if self.fallback.is_some() {
            return self.fallback;
        }
        Self::ask("No valid drop_height found. Please enter drop_height (in mm):")
            .and_then(|a| a.parse().ok())
    }
}

fn build_config(cli: &Cli) -> Result<RunConfig> {
    let base = match &cli.config {
        Some(path) => Some(RunConfig::load(path)?),
        None => None,
    };

    let orientations = match (&cli.orientations, &cli.inline) {
        (Some(path), _) => Some(OrientationSource::File(path.clone())),
        (None, Some(text)) => Some(OrientationSource::Inline(text.replace(';', "\n"))),
        (None, None) => None,
    };

    let mut config = match base {
        Some(mut config) => {
            if let Some(model) = &cli.model {
                config.model = model.clone();
            }
            if let Some(conditions) = &cli.conditions {
                config.conditions = conditions.clone();
            }
            if let Some(orientations) = orientations {
                config.orientations = orientations;
            }
            config
        }
        None => {
            let Some(model) = cli.model.clone() else {
                bail!("System model file not specified (--model)");
            };
            let Some(conditions) = cli.conditions.clone() else {
                bail!("System initial conditions file not specified (--conditions)");
            };
            let Some(orientations) = orientations else {
                bail!("Drop orientations not specified (--orientations or --inline)");
            };
            RunConfig::new(model, conditions, orientations)
        }
    };

    if cli.drop_height.is_some() {
        config.drop_height.fallback = cli.drop_height;
    }
    if cli.yes {
        config.drop_height.accept_found = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dropdeck starting (units: mm, ms, g)");

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let result = if cli.yes || cli.config.is_some() {
        let mut policy = config.drop_height;
        run_with(&config, &mut policy)
    } else {
        let mut prompt = TerminalPrompt {
            fallback: config.drop_height.fallback,
        };
        run_with(&config, &mut prompt)
    };
    let output =
        result.with_context(|| format!("drop run for {} failed", config.conditions.display()))?;

    if cli.json {
        println!("{}", output.summary.to_json()?);
    }
    log::info!("Done: {} decks written", output.summary.drops.len());
    Ok(())
}
