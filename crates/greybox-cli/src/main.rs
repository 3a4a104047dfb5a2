//! greybox - dataset preparation CLI
//!
//! Explicit entry points over the library crates: batch PNG conversion,
//! sprite-sheet icon extraction, and media scanning. All work starts
//! here; the libraries do nothing on their own.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use greybox_dataset::{MediaScanner, convert_tree, find_files_with_keywords};
use greybox_extract::{Clustering, ExtractOptions, extract_regions};
use greybox_io::{read_raster, save_regions};

#[derive(Parser)]
#[command(name = "greybox", version, about = "Image dataset preparation tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every image under a directory to PNG
    Aspng {
        /// Directory containing source images
        input_dir: PathBuf,
        /// Directory the PNGs are written to
        output_dir: PathBuf,
        /// Worker threads for the conversion pool
        #[arg(long, default_value_t = 4)]
        workers: usize,
    },
    /// Extract icon regions from a sprite sheet
    Icons {
        /// The sprite sheet image
        sheet: PathBuf,
        /// Directory the extracted icons are written to
        out_dir: PathBuf,
        /// Foreground detection mode
        #[arg(long, value_enum, default_value = "color-key")]
        mode: Mode,
        /// Background color as R,G,B (color-key mode); sampled from the
        /// image when omitted
        #[arg(long, value_parser = parse_color)]
        background: Option<[u8; 3]>,
        /// Corner distance below which regions merge
        #[arg(long, default_value_t = greybox_extract::DEFAULT_PROXIMITY)]
        proximity: u32,
        /// Alpha values at or below this count as background (alpha mode)
        #[arg(long, default_value_t = 0)]
        alpha_threshold: u8,
        /// Merge nearby regions even in alpha mode
        #[arg(long, conflicts_with = "no_cluster")]
        cluster: bool,
        /// Keep every connected region separate
        #[arg(long)]
        no_cluster: bool,
        /// Output filename prefix; defaults to the sheet stem
        #[arg(long)]
        prefix: Option<String>,
    },
    /// List media files under a directory, descending into archives
    Scan {
        /// Directory to scan
        dir: PathBuf,
        /// Only report files whose name contains one of these
        #[arg(long, value_delimiter = ',')]
        keywords: Vec<String>,
        /// How many levels of nested archives to unpack
        #[arg(long, default_value_t = 1)]
        depth: u32,
        /// Do not unpack archives
        #[arg(long)]
        no_archives: bool,
        /// Directory archives are unpacked into
        #[arg(long)]
        staging: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Key out one exact background color
    ColorKey,
    /// Use the image's alpha channel
    Alpha,
}

fn parse_color(s: &str) -> std::result::Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B, got '{s}'"));
    }
    let mut color = [0u8; 3];
    for (slot, part) in color.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid channel value '{part}'"))?;
    }
    Ok(color)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Aspng {
            input_dir,
            output_dir,
            workers,
        } => run_aspng(&input_dir, &output_dir, workers),
        Command::Icons {
            sheet,
            out_dir,
            mode,
            background,
            proximity,
            alpha_threshold,
            cluster,
            no_cluster,
            prefix,
        } => run_icons(
            &sheet,
            &out_dir,
            mode,
            background,
            proximity,
            alpha_threshold,
            cluster,
            no_cluster,
            prefix,
        ),
        Command::Scan {
            dir,
            keywords,
            depth,
            no_archives,
            staging,
        } => run_scan(&dir, &keywords, depth, no_archives, staging),
    }
}

fn run_aspng(input_dir: &PathBuf, output_dir: &PathBuf, workers: usize) -> Result<()> {
    let report = convert_tree(input_dir, output_dir, workers)
        .with_context(|| format!("converting {}", input_dir.display()))?;
    println!(
        "converted {} file(s), {} failed",
        report.succeeded, report.failed
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_icons(
    sheet: &PathBuf,
    out_dir: &PathBuf,
    mode: Mode,
    background: Option<[u8; 3]>,
    proximity: u32,
    alpha_threshold: u8,
    cluster: bool,
    no_cluster: bool,
    prefix: Option<String>,
) -> Result<()> {
    let raster =
        read_raster(sheet).with_context(|| format!("reading {}", sheet.display()))?;

    let mut options = match mode {
        Mode::ColorKey => {
            let background = background.unwrap_or_else(|| {
                let color = raster.most_common_color().unwrap_or([255, 255, 255, 255]);
                println!(
                    "using background color: {},{},{}",
                    color[0], color[1], color[2]
                );
                [color[0], color[1], color[2]]
            });
            ExtractOptions::color_key(background).with_clustering(Clustering::Proximity {
                threshold: proximity,
            })
        }
        Mode::Alpha => ExtractOptions::alpha().with_alpha_threshold(alpha_threshold),
    };
    if cluster {
        options = options.with_clustering(Clustering::Proximity {
            threshold: proximity,
        });
    }
    if no_cluster {
        options = options.with_clustering(Clustering::Disabled);
    }

    let regions = extract_regions(&raster, &options)?;
    let prefix = prefix.unwrap_or_else(|| {
        sheet
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "region".to_string())
    });
    let paths = save_regions(regions, out_dir, &prefix)?;
    println!("wrote {} region(s) to {}", paths.len(), out_dir.display());
    Ok(())
}

fn run_scan(
    dir: &PathBuf,
    keywords: &[String],
    depth: u32,
    no_archives: bool,
    staging: Option<PathBuf>,
) -> Result<()> {
    let files = if keywords.is_empty() {
        let mut scanner = MediaScanner::new().with_archive_extraction(!no_archives);
        if let Some(staging) = staging {
            scanner = scanner.with_staging_dir(staging);
        }
        scanner.scan(dir, depth)
    } else {
        find_files_with_keywords(dir, keywords).collect()
    };

    for file in &files {
        println!("{}", file.display());
    }
    eprintln!("{} file(s)", files.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("255, 0, 10"), Ok([255, 0, 10]));
        assert!(parse_color("255,0").is_err());
        assert!(parse_color("1,2,300").is_err());
        assert!(parse_color("a,b,c").is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
