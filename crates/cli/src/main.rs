//! CLI tool for extracting images from PowerPoint files.

use anyhow::{Context, Result};
use clap::Parser;
use pptimg::{
    extract_all_to_dir, extract_to_dir, ChunkedCopier, Container, ImageContainer,
    DEFAULT_CHUNK_SIZE,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Extract embedded images from PowerPoint files.
#[derive(Parser, Debug)]
#[command(name = "ppt-images")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file(s) (.ppt, .pps, .pptx, .ppsx)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List images instead of extracting them
    #[arg(short, long)]
    list: bool,

    /// Print the listing as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Extract only the image with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Save the image selected with --name under a different file name
    #[arg(short, long, requires = "name")]
    rename: Option<String>,

    /// Copy buffer size in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Images found in one input file.
#[derive(Debug, Serialize)]
struct Listing {
    file: String,
    format: &'static str,
    images: Vec<ListedImage>,
}

#[derive(Debug, Serialize)]
struct ListedImage {
    name: String,
    /// Known up front only for legacy PPT.
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let copier = ChunkedCopier::new().with_chunk_size(args.chunk_size);
    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    log::debug!(
        "Output directory: {}, chunk size: {} bytes",
        output_dir.display(),
        copier.chunk_size()
    );

    let mut listings = Vec::new();
    let mut failures = 0usize;

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &copier, &output_dir) {
            Ok(Some(listing)) => listings.push(listing),
            Ok(None) => {}
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
                failures += 1;
            }
        }
    }

    if args.list {
        print_listings(&listings, args.json)?;
    }

    if failures > 0 {
        anyhow::bail!("{} of {} input files failed", failures, args.input.len());
    }

    Ok(())
}

/// Process a single PowerPoint file.
///
/// Returns a listing in `--list` mode, otherwise extracts to `output_dir`.
fn process_file(
    input_path: &Path,
    args: &Args,
    copier: &ChunkedCopier,
    output_dir: &Path,
) -> Result<Option<Listing>> {
    let mut deck = Container::open_with(input_path, copier.clone())
        .with_context(|| format!("Failed to open {}", input_path.display()))?;

    if args.verbose {
        eprintln!("  Detected {}: {}", deck.format().name(), deck);
    }

    if args.list {
        return Ok(Some(listing(input_path, &deck)));
    }

    match args.name.as_deref() {
        Some(name) => {
            fs::create_dir_all(output_dir).with_context(|| {
                format!("Failed to create output directory: {}", output_dir.display())
            })?;
            let path = extract_to_dir(&mut deck, name, output_dir, args.rename.as_deref())
                .with_context(|| format!("Failed to extract {}", name))?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
        None => {
            let written = extract_all_to_dir(&mut deck, output_dir).with_context(|| {
                format!("Failed to extract images to {}", output_dir.display())
            })?;
            if args.verbose {
                eprintln!("  Extracted {} images to {}", written.len(), output_dir.display());
            }
        }
    }

    Ok(None)
}

fn listing<C: ImageContainer>(input_path: &Path, deck: &C) -> Listing {
    Listing {
        file: input_path.display().to_string(),
        format: deck.format().name(),
        images: deck
            .index()
            .entries()
            .iter()
            .map(|entry| ListedImage {
                name: entry.name.clone(),
                size: entry.locator.length(),
            })
            .collect(),
    }
}

fn print_listings(listings: &[Listing], json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(listings).context("Failed to serialize listing")?;
        println!("{}", out);
        return Ok(());
    }

    for listing in listings {
        println!("{} ({}, {} images)", listing.file, listing.format, listing.images.len());
        for image in &listing.images {
            match image.size {
                Some(size) => println!("  {}\t{} bytes", image.name, size),
                None => println!("  {}", image.name),
            }
        }
    }

    Ok(())
}
