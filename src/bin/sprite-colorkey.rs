use std::path::PathBuf;
use std::process;

use clap::Parser;

use sprite_colorkey::{plan, process_plan, Color, ProcessOptions, ProcessResult, Tolerance};

#[derive(Parser)]
#[command(
    name = "sprite-colorkey",
    about = "Color-key sprite sheets: replace a solid background color with transparency",
    version,
    after_help = "The key color is auto-detected from the top-left pixel of each image\n\
                  unless --color is given. Output is always PNG.\n\n\
                  Supported formats: bmp, gif, jpeg, jpg, png, tga, tif, tiff"
)]
struct Cli {
    /// Input image file or directory of images
    input: PathBuf,

    /// Output file (single input) or directory (batch input).
    /// Default: same location as input with .png extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Key color as hex, e.g. FF00FF (default: auto-detect per image)
    #[arg(long)]
    color: Option<String>,

    /// Color matching tolerance (Manhattan distance in RGB space, 0-765)
    #[arg(long, default_value_t = 0)]
    tolerance: i64,

    /// Show what would be processed without writing files
    #[arg(long)]
    dry_run: bool,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,
}

fn main() {
    let cli = Cli::parse();

    let key_color = match cli.color.as_deref().map(str::parse::<Color>).transpose() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let tolerance = match Tolerance::new(cli.tolerance) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let opts = ProcessOptions {
        key_color,
        tolerance,
        dry_run: cli.dry_run,
        overwrite: cli.overwrite,
    };

    let batch_plan = match plan(&cli.input, cli.output.as_deref(), opts.dry_run, opts.overwrite) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    eprintln!("Processing {} file(s)...", batch_plan.items.len());
    match opts.key_color {
        Some(c) => eprintln!("Key color: {c}"),
        None => eprintln!("Key color: auto-detect (top-left pixel)"),
    }
    if opts.tolerance.get() > 0 {
        eprintln!("Tolerance: {}", opts.tolerance.get());
    }
    eprintln!();

    if let Some(dir) = &batch_plan.create_dir {
        if opts.dry_run {
            eprintln!("[DRY] would create directory {}", dir.display());
        } else if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: failed to create '{}': {e}", dir.display());
            process::exit(1);
        }
    }

    let results = process_plan(&batch_plan.items, &opts);

    let mut processed = 0u32;
    let mut skipped = 0u32;
    for r in &results {
        print_result(r);
        if r.skipped || !r.success {
            skipped += 1;
        } else {
            processed += 1;
        }
    }

    eprintln!();
    eprintln!(
        "[Summary] Processed: {processed}, Skipped: {skipped} (Total: {})",
        results.len()
    );

    // Per-file failures were reported above; a completed run exits 0.
}

fn print_result(result: &ProcessResult) {
    let name = result.input.file_name().map_or_else(
        || result.input.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.dry_run {
        let key_label = result
            .key_color
            .map_or_else(|| "auto".to_string(), |c| c.to_string());
        eprintln!(
            "[DRY] {name} -> {} (key: {key_label})",
            result.output.display()
        );
    } else if result.skipped {
        eprintln!(
            "[SKIP] {name} -> {} ({})",
            result.output.display(),
            result.message
        );
    } else if result.success {
        #[allow(clippy::cast_precision_loss)]
        let pct = if result.total_pixels > 0 {
            result.replaced as f64 / result.total_pixels as f64 * 100.0
        } else {
            0.0
        };
        let key = result
            .key_color
            .map_or_else(|| "auto".to_string(), |c| c.to_string());
        eprintln!(
            "[OK] {name} -> {}  key={key}  {}/{} pixels ({pct:.1}%)  [{}x{}]",
            result.output.display(),
            result.replaced,
            result.total_pixels,
            result.dimensions.0,
            result.dimensions.1
        );
    } else {
        eprintln!("[ERROR] {name}: {}", result.message);
    }
}
