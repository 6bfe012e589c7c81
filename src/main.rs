use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cropkit::designer::shapes::{clip_path_css, inset_points};
use cropkit::designer::BorderStyle;
use cropkit::replay::{load_composition, save_composition, ReplayScript, Replayer};
use cropkit::{init_logging, Config, BUILD_DATE, VERSION};

/// CropKit headless tools.
#[derive(Parser, Debug)]
#[command(name = "cropkit", version, about = "CropKit composition engine tools")]
struct Cli {
    /// Engine configuration (JSON or TOML). Defaults to the user config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a gesture script against a composition
    Replay {
        /// Composition file to start from
        #[arg(short = 'i', long, value_name = "FILE")]
        composition: PathBuf,

        /// Replay script (JSON)
        #[arg(short, long, value_name = "FILE")]
        script: PathBuf,

        /// Where to write the result; defaults to overwriting the input
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the CSS clip-path of every item on every page
    Clip {
        #[arg(short = 'i', long, value_name = "FILE")]
        composition: PathBuf,
    },
    /// Write the default configuration to a file
    InitConfig {
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    tracing::debug!("cropkit {} (built {})", VERSION, BUILD_DATE);

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Replay {
            composition,
            script,
            output,
        } => {
            let file = load_composition(&composition)?;
            let script = ReplayScript::load(&script)?;
            let mut replayer = Replayer::new(file, &config)?;
            let report = replayer.run(&script)?;
            tracing::info!(
                "Replayed {} steps: {} applied, {} ignored",
                script.steps.len(),
                report.applied,
                report.ignored
            );
            save_composition(output.as_deref().unwrap_or(&composition), &replayer.finish())?;
        }
        Command::Clip { composition } => {
            let file = load_composition(&composition)?;
            for (page_index, page) in file.pages.iter().enumerate() {
                for item in &page.items {
                    let points = item.shape_points();
                    println!("page {} item {}: {}", page_index, item.id, clip_path_css(&points));
                    if item.border_style == BorderStyle::Double {
                        let inner = inset_points(&points, config.editing.double_border_inset);
                        println!("page {} item {} inner: {}", page_index, item.id, clip_path_css(&inner));
                    }
                }
            }
        }
        Command::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => Config::default_path()?,
            };
            Config::default()
                .save_to_file(&path)
                .with_context(|| format!("Failed to write config {}", path.display()))?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_or_default()?,
    };
    config.validate()?;
    Ok(config)
}
