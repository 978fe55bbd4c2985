//! Generate command implementation
//!
//! Loads a record list, renders both faces of every card, and writes the
//! face PNGs plus the printable duplex PDF.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use trackdeck_render::{render_deck, save_faces, FontOrigin, FontSet};
use trackdeck_spec::{load_records, FontConfig, RenderConfig};

/// Options collected from the command line.
pub struct GenerateOptions<'a> {
    pub songs: &'a str,
    pub output: &'a str,
    pub faces_dir: Option<&'a str>,
    pub skip_pngs: bool,
    pub ink_saving: bool,
    pub border: bool,
    pub label: Option<&'a str>,
    pub card_size: u32,
    pub font_year: Option<&'a str>,
    pub font_artist: Option<&'a str>,
    pub font_song: Option<&'a str>,
}

/// Run the generate command.
///
/// # Returns
/// Exit code: 0 success, 1 input or render error.
pub fn run(opts: &GenerateOptions<'_>) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Loading songs from:".cyan().bold(), opts.songs);
    let records = load_records(Path::new(opts.songs))
        .with_context(|| format!("Failed to load song list: {}", opts.songs))?;
    println!("  {} {} songs", "✓".green(), records.len());

    let config = build_config(opts);
    config.validate().context("Invalid render configuration")?;

    let fonts = FontSet::load(&config.fonts);
    match fonts.origin() {
        FontOrigin::Configured => {}
        FontOrigin::System => {
            println!("  {} using system fonts", "!".yellow());
        }
        FontOrigin::Builtin => {
            println!(
                "  {} no usable fonts found, falling back to the built-in bitmap font",
                "!".yellow()
            );
        }
    }

    println!(
        "{} {} cards at {} px",
        "Rendering:".cyan().bold(),
        records.len(),
        config.card_size
    );
    let deck = render_deck(&records, &config, &fonts).context("Deck render failed")?;

    for warning in &deck.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }

    if !opts.skip_pngs {
        let faces_dir = opts.faces_dir.unwrap_or("cards");
        save_faces(&deck.faces, Path::new(faces_dir))
            .with_context(|| format!("Failed to save face images to {faces_dir}"))?;
        println!(
            "  {} saved {} face images to {}",
            "✓".green(),
            deck.faces.len() * 2,
            faces_dir
        );
    }

    std::fs::write(opts.output, &deck.pdf)
        .with_context(|| format!("Failed to write PDF: {}", opts.output))?;
    println!(
        "{} {} ({} cards, {:.1}s)",
        "✓ Created PDF:".green().bold(),
        opts.output,
        deck.faces.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(ExitCode::SUCCESS)
}

fn build_config(opts: &GenerateOptions<'_>) -> RenderConfig {
    RenderConfig {
        card_size: opts.card_size,
        ink_saving: opts.ink_saving,
        draw_border: opts.border,
        card_label: opts.label.map(str::to_string),
        fonts: FontConfig {
            year: opts.font_year.map(str::to_string),
            artist: opts.font_artist.map(str::to_string),
            song: opts.font_song.map(str::to_string),
        },
        ..RenderConfig::default()
    }
}
