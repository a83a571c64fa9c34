use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use paperpad::draw::PaperMode;
use paperpad::export::ExportDependencies;
use paperpad::replay::ReplayScript;
use paperpad::{Config, Notepad};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PAPERPAD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "paperpad")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Freehand notepad that exports your writing as a transparent PNG"
)]
struct Cli {
    /// Replay a TOML script of drawing actions
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Paper style (blank, lined, or squared); overrides the config file
    #[arg(long, short = 'p', value_name = "MODE")]
    paper: Option<String>,

    /// Write the transparent writing layer to this PNG
    #[arg(long, short = 'o', value_name = "PNG")]
    out: Option<PathBuf>,

    /// Write the paper background to this PNG
    #[arg(long, value_name = "PNG")]
    background_out: Option<PathBuf>,

    /// Export the writing through the clipboard, falling back to a file
    #[arg(long, action = ArgAction::SetTrue)]
    export: bool,

    /// Directory for exported files; overrides the config file
    #[arg(long, value_name = "DIR", requires = "export")]
    download_dir: Option<PathBuf>,

    /// Load settings from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script.as_deref() else {
        print_usage();
        return Ok(());
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config: {:#}. Using defaults.", err);
            Config::default()
        }),
    };

    let script = ReplayScript::load(script_path)?;
    let mut notepad = Notepad::new(script.viewport.to_viewport(), &config)
        .context("Failed to create drawing surfaces")?;

    if let Some(mode) = cli.paper.as_deref() {
        let mode = mode
            .parse::<PaperMode>()
            .map_err(|_| anyhow::anyhow!("Unknown paper mode '{}'", mode))?;
        notepad.set_paper_mode(mode)?;
    }

    script.apply(&mut notepad)?;

    if let Some(path) = cli.out.as_deref() {
        write_png(path, |file| notepad.annotations().surface().write_to_png(file))?;
        println!("Wrote writing layer to {}", path.display());
    }

    if let Some(path) = cli.background_out.as_deref() {
        write_png(path, |file| notepad.paper().surface().write_to_png(file))?;
        println!("Wrote paper background to {}", path.display());
    }

    if cli.export {
        let download_dir = cli
            .download_dir
            .clone()
            .unwrap_or_else(|| config.download_directory());
        let dependencies = Arc::new(ExportDependencies::with_download_dir(download_dir));

        let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
        runtime.block_on(notepad.export(dependencies));
    }

    if !notepad.status().is_empty() {
        println!("{}", notepad.status());
    }

    Ok(())
}

fn write_png<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<(), cairo::IoError>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write(&mut file).with_context(|| format!("Failed to encode {}", path.display()))?;
    Ok(())
}

fn print_usage() {
    println!("paperpad: Freehand notepad with paper backgrounds");
    println!();
    println!("Usage:");
    println!("  paperpad --script drawing.toml --out writing.png");
    println!("  paperpad --script drawing.toml --paper lined --background-out paper.png");
    println!("  paperpad --script drawing.toml --export");
    println!("  paperpad --help");
    println!();
    println!("Scripts are TOML lists of steps, for example:");
    println!("  [viewport]");
    println!("  width = 400.0");
    println!("  height = 300.0");
    println!();
    println!("  [[steps]]");
    println!("  action = \"down\"");
    println!("  x = 20.0");
    println!("  y = 20.0");
    println!();
    println!("Settings are read from ~/.config/paperpad/config.toml");
}
