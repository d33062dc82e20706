use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use opl_cover_convert::{BatchSession, ConvertOptions};
use opl_scale::{ScaleMethod, SlotKind};

/// Convert game artwork into OPL art-set slots:
/// - resize into the slot's exact dimensions (letterboxed or stretched)
/// - optional PS2 display pipeline, extra contrast and sharpening
/// - losslessly-optimized PNG output in a timestamped batch directory
#[derive(Parser, Debug)]
#[command(name = "oplconv")]
#[command(about = "Convert and resize game art into OPL image-set slots")]
#[command(
    long_about = "Convert and resize game artwork into the fixed image slots of an OPL art set.
Each run converts a batch of files into one slot, writing optimized PNGs into
a timestamped directory under the output path."
)]
struct Args {
    /// Source image files
    #[arg(required = true, help = "Input image files to convert")]
    inputs: Vec<PathBuf>,

    /// Destination directory; the batch directory is created inside it
    #[arg(short, long, default_value = "converted",
          help = "Output directory (a <slot>_<timestamp> subdirectory is created per batch)")]
    output_dir: PathBuf,

    /// Target slot, fixes the output dimensions
    #[arg(short, long, value_enum, default_value_t = SlotKind::Cover,
          help = "Image slot to convert into")]
    slot: SlotKind,

    /// Scaling algorithm
    #[arg(short, long, value_enum, default_value_t = ScaleMethod::DEFAULT,
          help = "Scaling algorithm (ps2_optimized applies the full display pipeline)")]
    algorithm: ScaleMethod,

    /// Stretch to the slot size instead of letterboxing
    #[arg(long, help = "Ignore the source aspect ratio and fill the whole slot")]
    stretch: bool,

    /// Boost contrast by 20% after scaling
    #[arg(long, help = "Apply an extra contrast boost to the output")]
    enhance_contrast: bool,

    /// Apply one extra sharpen pass after scaling
    #[arg(long, help = "Apply an extra sharpen pass to the output")]
    sharpen: bool,

    /// Append the slot name to every output file name
    #[arg(long, help = "Name outputs {basename}_{slot}.png instead of {basename}.png")]
    auto_rename: bool,

    /// Letterbox fill color
    #[arg(long, default_value = "#000000", value_parser = parse_color,
          help = "Letterbox background color as #rrggbb")]
    background: [u8; 3],
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let options = ConvertOptions {
        slot: args.slot,
        method: args.algorithm,
        maintain_aspect: !args.stretch,
        enhance_contrast: args.enhance_contrast,
        sharpen: args.sharpen,
        background: args.background,
    };

    let total = args.inputs.len();
    let session = BatchSession::builder()
        .with_inputs(args.inputs)
        .with_output_dir(args.output_dir)
        .with_options(options)
        .auto_rename(args.auto_rename)
        .on_progress(move |done, total| {
            println!("  [{}/{}] converted", done, total);
        })
        .build()?;

    let summary = session.run()?;

    for outcome in &summary.outcomes {
        if let Err(e) = &outcome.result {
            eprintln!("  {}: {}", outcome.input.display(), e);
        }
    }
    println!(
        "Converted {}/{} files into {}",
        summary.success_count,
        summary.total_count,
        summary.batch_dir.display()
    );

    if summary.success_count == 0 && total > 0 {
        bail!("no files were converted");
    }
    Ok(())
}

/// Parse a `#rrggbb` (or `rrggbb`) hex color into an RGB triple.
fn parse_color(color: &str) -> Result<[u8; 3], String> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid color '{}', expected #rrggbb", color));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#000000").unwrap(), [0, 0, 0]);
        assert_eq!(parse_color("#ff8000").unwrap(), [255, 128, 0]);
        assert_eq!(parse_color("0A0b0C").unwrap(), [10, 11, 12]);
        assert!(parse_color("#fff").is_err());
        assert!(parse_color("#zzzzzz").is_err());
    }
}
