//! Compose command implementation
//!
//! Rebuilds the printable PDF from a directory of previously saved face
//! images, without re-rendering anything.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use trackdeck_render::{load_faces, render_deck_pdf};
use trackdeck_spec::RenderConfig;

/// Run the compose command.
///
/// # Arguments
/// * `cards_dir` - Directory holding `card_NNN_qr.png` / `card_NNN_solution.png` pairs
/// * `output` - PDF output path
/// * `ink_saving` - Print the scan pages on a white sheet instead of black
///
/// # Returns
/// Exit code: 0 success, 1 input error.
pub fn run(cards_dir: &str, output: &str, ink_saving: bool) -> Result<ExitCode> {
    println!("{} {}", "Loading faces from:".cyan().bold(), cards_dir);
    let faces = load_faces(Path::new(cards_dir))
        .with_context(|| format!("Failed to load face images from {cards_dir}"))?;
    if faces.is_empty() {
        println!("  {} no face images found", "!".yellow());
    } else {
        println!("  {} {} card pairs", "✓".green(), faces.len());
    }

    let config = RenderConfig {
        ink_saving,
        ..RenderConfig::default()
    };
    let (scans, reveals): (Vec<_>, Vec<_>) =
        faces.into_iter().map(|f| (f.scan, f.reveal)).unzip();
    let pdf = render_deck_pdf(&scans, &reveals, &config).context("PDF assembly failed")?;

    std::fs::write(output, &pdf).with_context(|| format!("Failed to write PDF: {output}"))?;
    println!(
        "{} {} ({} cards)",
        "✓ Created PDF:".green().bold(),
        output,
        scans.len()
    );

    Ok(ExitCode::SUCCESS)
}
