//! Trackdeck CLI - printable music game card decks
//!
//! This binary turns a `songs.json` record list into face PNGs and a
//! duplex-ready PDF, and can rebuild the PDF from saved faces.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use trackdeck_cli::commands;

/// Trackdeck - Music Game Card Generator
#[derive(Parser)]
#[command(name = "trackdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a deck from a song list: face PNGs plus the printable PDF
    Generate {
        /// Path to the song list (songs.json)
        #[arg(short, long)]
        songs: String,

        /// PDF output path
        #[arg(short, long, default_value = "cards.pdf")]
        output: String,

        /// Directory for the per-card face PNGs (default: ./cards)
        #[arg(long)]
        faces_dir: Option<String>,

        /// Skip writing face PNGs; only produce the PDF
        #[arg(long)]
        skip_pngs: bool,

        /// White cards with black accents, to spare printer ink
        #[arg(long)]
        ink_saving: bool,

        /// Draw a cutting-guide border on the scan faces
        #[arg(long)]
        border: bool,

        /// Small label drawn in the reveal face corner
        #[arg(long)]
        label: Option<String>,

        /// Card raster side length in pixels
        #[arg(long, default_value = "2000")]
        card_size: u32,

        /// TrueType font for the year figure
        #[arg(long)]
        font_year: Option<String>,

        /// TrueType font for the artist line
        #[arg(long)]
        font_artist: Option<String>,

        /// TrueType font for the song title line
        #[arg(long)]
        font_song: Option<String>,
    },

    /// Rebuild the PDF from a directory of saved face images
    Compose {
        /// Directory holding card_NNN_qr.png / card_NNN_solution.png pairs
        #[arg(short, long)]
        cards_dir: String,

        /// PDF output path
        #[arg(short, long, default_value = "cards.pdf")]
        output: String,

        /// Print the scan pages on a white sheet instead of black
        #[arg(long)]
        ink_saving: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            songs,
            output,
            faces_dir,
            skip_pngs,
            ink_saving,
            border,
            label,
            card_size,
            font_year,
            font_artist,
            font_song,
        } => commands::generate::run(&commands::generate::GenerateOptions {
            songs: &songs,
            output: &output,
            faces_dir: faces_dir.as_deref(),
            skip_pngs,
            ink_saving,
            border,
            label: label.as_deref(),
            card_size,
            font_year: font_year.as_deref(),
            font_artist: font_artist.as_deref(),
            font_song: font_song.as_deref(),
        }),
        Commands::Compose {
            cards_dir,
            output,
            ink_saving,
        } => commands::compose::run(&cards_dir, &output, ink_saving),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
