use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use pg_core::config::{Hinting, PixglyphConfig};

pub mod cli;
pub mod handler;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    cli.validate()?;

    // 3. Charger la config, puis appliquer les overrides CLI
    let mut config = resolve_config(&cli.config)?;
    if let Some(width) = cli.width {
        config.convert.width = width;
    }
    if let Some(ref hinting) = cli.hinting {
        match hinting.parse::<Hinting>() {
            Ok(h) => config.raster.hinting = h,
            Err(e) => log::warn!("{e}, utilisation du défaut."),
        }
    }
    if cli.keep_header {
        config.raster.skip_header = false;
    }

    // 4. Événement de requête
    if let Some(ref event) = cli.event {
        return run_event(event, &config);
    }

    // 5. Mode inverse seul
    if let Some(ref text_path) = cli.text {
        let text = std::fs::read_to_string(text_path)
            .with_context(|| format!("Impossible de lire {}", text_path.display()))?;
        if let Some(ref output) = cli.output {
            pipeline::save_ascii_as_png(&text, &config.raster, output)?;
        }
        return Ok(());
    }

    // 6. Image → ASCII
    let grid = pipeline::convert_file(&cli.path, config.convert.width)?;
    let ascii = grid.to_text();
    let mut stdout = io::stdout().lock();
    stdout.write_all(ascii.as_bytes())?;
    stdout.flush()?;
    drop(stdout);

    // 7. ASCII → PNG
    if let Some(ref output) = cli.output {
        pipeline::save_ascii_as_png(&ascii, &config.raster, output)?;
    } else if !cli.no_prompt {
        let mut input = io::stdin().lock();
        let mut out = io::stdout().lock();
        if let Some(name) = pipeline::prompt_save(&mut input, &mut out)? {
            pipeline::save_ascii_as_png(&ascii, &config.raster, &name)?;
            writeln!(out, "File '{}' successfully written to.", name.display())?;
        }
    }

    Ok(())
}

/// Read a JSON request event, handle it, print the JSON response.
fn run_event(path: &Path, config: &PixglyphConfig) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let request: handler::GatewayRequest =
        serde_json::from_str(&content).context("Événement JSON invalide")?;
    let response = handler::handle(&request, config);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Load the config file, or defaults if it does not exist.
fn resolve_config(path: &Path) -> Result<PixglyphConfig> {
    if path.exists() {
        pg_core::config::load_config(path)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(PixglyphConfig::default())
    }
}
