//! Color-key sprite sheets: replace a solid background color with transparency.
//!
//! Sprite sheets are often authored on a solid key color (classically
//! magenta). This crate replaces every pixel within a Manhattan-distance
//! tolerance of the key color with fully transparent black, and writes the
//! result as PNG. The key color is auto-detected from the top-left pixel
//! of each image unless fixed explicitly.
//!
//! # Quick Start
//!
//! ```no_run
//! use sprite_colorkey::{color_key, Tolerance};
//!
//! let img = image::open("hero_sheet.bmp").unwrap();
//! let (keyed, key, replaced) = color_key(&img, None, Tolerance::default());
//! println!("keyed {replaced} pixels against {key}");
//! keyed.save("hero_sheet.png").unwrap();
//! ```
//!
//! # Batch runs
//!
//! A whole directory is planned upfront (output paths resolved and
//! conflicts classified before anything is opened), then executed:
//!
//! ```no_run
//! use std::path::Path;
//! use sprite_colorkey::{plan, process_plan, ProcessOptions};
//!
//! let plan = plan(Path::new("assets/raw"), Some(Path::new("assets/textures")), false, false)
//!     .expect("planning failed");
//! for result in process_plan(&plan.items, &ProcessOptions::default()) {
//!     println!("{}: {}", result.input.display(), result.message);
//! }
//! ```

#![deny(missing_docs)]

pub mod batch;
pub mod color;
mod engine;
pub mod error;
pub mod keying;

pub use batch::{
    is_supported_image, plan, resolve_output_path, Action, BatchPlan, WorkItem,
    SUPPORTED_EXTENSIONS,
};
pub use color::{Color, Tolerance, MAX_TOLERANCE};
pub use engine::{process_item, process_plan, ProcessOptions, ProcessResult};
pub use error::{Error, Result};
pub use keying::{color_key, detect_key_color};
