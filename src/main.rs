use clap::{Parser, Subcommand};
use phototune::config::{self, EditorConfig};
use phototune::imaging::{
    Adjustment, AdjustmentState, ImageBackend, RustBackend, derive_working_image, enhance,
};
use phototune::output;
use phototune::session::{self, Session};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Factor flags shared by `apply` and `preview`.
///
/// Omitted flags stay at 1.0. Values are clamped to the configured slider
/// range and rounded to two decimals, like slider input.
#[derive(clap::Args, Clone, Debug)]
struct FactorArgs {
    /// Saturation factor (0 = grayscale)
    #[arg(long, allow_negative_numbers = true)]
    saturation: Option<f32>,
    /// Sharpness factor (0 = smoothed)
    #[arg(long, allow_negative_numbers = true)]
    sharpness: Option<f32>,
    /// Contrast factor (0 = flat gray)
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f32>,
    /// Brightness factor (0 = black)
    #[arg(long)]
    brightness: Option<f32>,
}

impl FactorArgs {
    fn to_state(&self, config: &EditorConfig) -> AdjustmentState {
        let flags = [
            (Adjustment::Saturation, self.saturation),
            (Adjustment::Sharpness, self.sharpness),
            (Adjustment::Contrast, self.contrast),
            (Adjustment::Brightness, self.brightness),
        ];
        let mut state = AdjustmentState::default();
        for (adjustment, value) in flags {
            if let Some(value) = value {
                state.set(adjustment, config.sliders.apply(adjustment, value));
            }
        }
        state
    }
}

#[derive(Parser)]
#[command(name = "phototune")]
#[command(about = "Adjust saturation, sharpness, contrast and brightness of photos")]
#[command(long_about = "\
Adjust saturation, sharpness, contrast and brightness of photos

Adjustments always run in the same order:
  saturation → sharpness → contrast → brightness

A factor of 1.0 leaves an adjustment untouched, lower values reduce it,
higher values amplify it. Supported output formats: jpg, jpeg, png, ico, gif.

Run 'phototune gen-config' to generate a documented phototune.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./phototune.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enhance an image at full resolution and save it
    Apply {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        factors: FactorArgs,
    },
    /// Fit an image to the display area, enhance it and save the preview
    Preview {
        input: PathBuf,
        output: PathBuf,
        /// Display area width (default from config)
        #[arg(long)]
        width: Option<u32>,
        /// Display area height (default from config)
        #[arg(long)]
        height: Option<u32>,
        #[command(flatten)]
        factors: FactorArgs,
    },
    /// Drive an editing session from a TOML event script
    Replay { script: PathBuf },
    /// Print a stock phototune.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Apply {
            input,
            output,
            factors,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let state = factors.to_state(&config);
            let backend = RustBackend::new();
            let source = backend.open(&input)?;
            let enhanced = enhance(&source.pixels, &state);
            backend.save(&enhanced, &output)?;
            output::print_apply_output(
                &input,
                source.dimensions(),
                &output,
                enhanced.dimensions(),
                &state,
            );
        }
        Command::Preview {
            input,
            output,
            width,
            height,
            factors,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let state = factors.to_state(&config);
            let available = (
                width.unwrap_or(config.display.width),
                height.unwrap_or(config.display.height),
            );
            let backend = RustBackend::new();
            let source = backend.open(&input)?;
            let working =
                derive_working_image(&source.pixels, available, config.display.filter.into());
            let enhanced = enhance(&working, &state);
            backend.save(&enhanced, &output)?;
            output::print_apply_output(
                &input,
                source.dimensions(),
                &output,
                enhanced.dimensions(),
                &state,
            );
        }
        Command::Replay { script } => {
            let config = load_config(cli.config.as_deref())?;
            replay(&script, &config)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Explicit `--config` path, else `./phototune.toml` when present, else defaults.
fn load_config(path: Option<&Path>) -> Result<EditorConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config_file(path),
        None => config::load_config(Path::new(".")),
    }
}

/// Run every event in `script` through one session, printing a line each.
///
/// Relative paths in the script resolve against the script's directory.
fn replay(script: &Path, config: &EditorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(script)?;
    let events = session::parse_script(&content)?;
    let base = script.parent().unwrap_or_else(|| Path::new("."));

    let mut session = Session::with_default_image(RustBackend::new(), config);
    for (i, event) in events.into_iter().enumerate() {
        let event = event.with_base_dir(base);
        let line = match session.handle(event.clone()) {
            Ok(outcome) => output::format_replay_event(
                i + 1,
                &event,
                &outcome,
                session.adjustments(),
                session.working_image().map(|img| img.dimensions()),
            ),
            Err(e) => output::format_replay_error(i + 1, &event, &e),
        };
        println!("{}", line);
    }
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { "phototune=debug" } else { "phototune=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}
