mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use pwpanel::{CharClasses, Configuration, DEFAULT_LENGTH, KeystreamSource, evaluate, regenerate};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pwpanel",
    version,
    author,
    about = "Random password generator with character classes and a strength meter"
)]
struct Cli {
    /// Password length (8 to 32)
    #[arg(short, long, default_value_t = DEFAULT_LENGTH)]
    length: usize,

    /// Exclude uppercase letters A-Z
    #[arg(long)]
    no_upper: bool,

    /// Exclude lowercase letters a-z
    #[arg(long)]
    no_lower: bool,

    /// Exclude digits 0-9
    #[arg(long)]
    no_digits: bool,

    /// Include symbols
    #[arg(short, long)]
    symbols: bool,

    /// Open the interactive control panel
    #[arg(short, long)]
    interactive: bool,

    /// Seed the keystream for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn configuration(&self) -> Configuration {
        Configuration::new(
            self.length,
            CharClasses {
                uppercase: !self.no_upper,
                lowercase: !self.no_lower,
                digits: !self.no_digits,
                symbols: self.symbols,
            },
        )
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: !cli.no_color && ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let config = cli.configuration();
    let mut rng = match cli.seed {
        Some(seed) => {
            debug!(seed, "using seeded keystream");
            KeystreamSource::from_u64(seed)
        }
        None => KeystreamSource::from_entropy(),
    };

    if cli.interactive {
        return ui::run_panel(config, rng, &options);
    }

    let password = regenerate(&config, &mut rng).context("Failed to generate password")?;
    let strength = evaluate(&config);

    ui::display_output(&password, &config, &strength, &options);

    Ok(())
}
