//! Per-item execution: decode, key, encode, report.
//!
//! Execution consumes the [`WorkItem`]s of an already-computed
//! [`BatchPlan`](crate::batch::BatchPlan). Per-file failures are captured
//! in the returned [`ProcessResult`] instead of propagating, so one bad
//! file never aborts a batch run.

use std::path::PathBuf;

use image::ImageFormat;

use crate::batch::{Action, WorkItem};
use crate::color::{Color, Tolerance};
use crate::keying;

/// Options controlling color-key processing.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Fixed key color; `None` auto-detects per image from the top-left pixel.
    pub key_color: Option<Color>,
    /// Maximum Manhattan RGB distance for a pixel to match the key.
    pub tolerance: Tolerance,
    /// Preview only: never write files or create directories.
    pub dry_run: bool,
    /// Overwrite existing output files.
    pub overwrite: bool,
}

/// Result of handling a single work item.
#[derive(Debug)]
pub struct ProcessResult {
    /// Source image path.
    pub input: PathBuf,
    /// Destination path (written, or would-be for previews and skips).
    pub output: PathBuf,
    /// Whether the item completed without failure.
    pub success: bool,
    /// Whether the item was skipped over an output conflict.
    pub skipped: bool,
    /// Whether this was a dry-run preview.
    pub dry_run: bool,
    /// Key color used, when one was resolved (or fixed by configuration).
    pub key_color: Option<Color>,
    /// Number of pixels made transparent.
    pub replaced: u64,
    /// Total pixel count of the image.
    pub total_pixels: u64,
    /// Final image dimensions.
    pub dimensions: (u32, u32),
    /// Human-readable status message.
    pub message: String,
}

impl ProcessResult {
    fn new(item: &WorkItem) -> Self {
        Self {
            input: item.input.clone(),
            output: item.output.clone(),
            success: false,
            skipped: false,
            dry_run: false,
            key_color: None,
            replaced: 0,
            total_pixels: 0,
            dimensions: (0, 0),
            message: String::new(),
        }
    }
}

/// Handle one work item according to its planned action.
///
/// For [`Action::Process`]: load the image, apply the color key, make sure
/// the output's parent directory exists, and save as PNG. The output is
/// always PNG-encoded, whatever extension the output path carries.
#[must_use]
pub fn process_item(item: &WorkItem, opts: &ProcessOptions) -> ProcessResult {
    let mut result = ProcessResult::new(item);

    match item.action {
        Action::SkipConflict => {
            result.success = true;
            result.skipped = true;
            result.message = "exists, use --overwrite".to_string();
            return result;
        }
        Action::DryRun => {
            result.success = true;
            result.dry_run = true;
            result.key_color = opts.key_color;
            return result;
        }
        Action::Process => {}
    }

    let dyn_img = match image::open(&item.input) {
        Ok(img) => img,
        Err(e) => {
            result.message = format!("failed to open: {e}");
            return result;
        }
    };

    let (keyed, key, replaced) = keying::color_key(&dyn_img, opts.key_color, opts.tolerance);
    let (width, height) = keyed.dimensions();
    result.key_color = Some(key);
    result.replaced = replaced;
    result.total_pixels = u64::from(width) * u64::from(height);
    result.dimensions = (width, height);

    if let Some(parent) = item.output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                result.message = format!("failed to create output directory: {e}");
                return result;
            }
        }
    }

    match keyed.save_with_format(&item.output, ImageFormat::Png) {
        Ok(()) => {
            result.success = true;
        }
        Err(e) => {
            result.message = format!("failed to save: {e}");
        }
    }

    result
}

/// Execute every item of a plan, returning results in item order.
///
/// Uses parallel iteration when the `cli` feature is enabled (via rayon).
/// Items share no state and results always come back in item order.
#[must_use]
pub fn process_plan(items: &[WorkItem], opts: &ProcessOptions) -> Vec<ProcessResult> {
    #[cfg(feature = "cli")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| process_item(item, opts))
            .collect()
    }

    #[cfg(not(feature = "cli"))]
    {
        items.iter().map(|item| process_item(item, opts)).collect()
    }
}
