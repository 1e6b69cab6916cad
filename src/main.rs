use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mdext::{Engine, Settings};

#[derive(Parser)]
#[command(
    name = "mdext",
    version,
    about = "Convert an extended Markdown dialect to HTML"
)]
struct Cli {
    /// Input file; reads stdin when omitted
    file: Option<PathBuf>,

    /// TOML file overlaying the default settings
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Print the table of contents instead of the document
    /// (markup or structured)
    #[arg(long, value_name = "FORMAT")]
    toc: Option<String>,

    /// Write output here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            toml::from_str::<Settings>(&raw)
                .with_context(|| format!("parsing settings from {}", path.display()))?
        }
        None => Settings::default(),
    };

    let source = match &cli.file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            buffer
        }
    };

    let mut engine = Engine::with_settings(settings);
    let html = engine.convert(&source);

    let out = match &cli.toc {
        Some(format) => engine.table_of_contents(format)?,
        None => html,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, out.as_bytes()).with_context(|| format!("writing {}", path.display()))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(out.as_bytes())?;
            if !out.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
