//! Batch planning: input discovery, output-path resolution, conflicts.
//!
//! A [`BatchPlan`] is computed in full before any image is opened. Every
//! discovered input becomes a [`WorkItem`] whose [`Action`] is already
//! decided, so execution never has to re-check the filesystem to know
//! whether an item should be processed, previewed, or skipped.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File extensions the planner accepts as image inputs.
pub const SUPPORTED_EXTENSIONS: [&str; 8] =
    ["png", "bmp", "gif", "jpg", "jpeg", "tga", "tiff", "tif"];

/// Check if a file has a supported image extension (case-insensitive).
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let ext = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// What execution should do with a planned work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Decode, key, and save the image.
    Process,
    /// The output already exists and `--overwrite` was not given.
    SkipConflict,
    /// Dry-run: report the destination and key without touching files.
    DryRun,
}

/// One planned unit of work: an input file, its resolved output, and the
/// action decided for it. Immutable once planned.
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Source image path.
    pub input: PathBuf,
    /// Resolved destination path (always a `.png` name unless the caller
    /// named an explicit output file).
    pub output: PathBuf,
    /// The decision made for this item.
    pub action: Action,
}

/// A fully computed plan for one invocation.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    /// Work items in processing order.
    pub items: Vec<WorkItem>,
    /// Batch output directory that does not exist yet and must be created
    /// before execution (`None` when no creation is needed).
    pub create_dir: Option<PathBuf>,
}

/// Resolve the output path for a single input file. Pure, no I/O.
///
/// - No output specified: the input path with its extension replaced by
///   `.png`, in the same directory.
/// - Batch mode with an output directory: `dir/<input stem>.png`.
/// - Single-file mode with an explicit output: that exact path.
#[must_use]
pub fn resolve_output_path(input: &Path, output: Option<&Path>, is_batch: bool) -> PathBuf {
    match output {
        None => input.with_extension("png"),
        Some(dir) if is_batch => {
            let mut name = input.file_stem().unwrap_or_default().to_os_string();
            name.push(".png");
            dir.join(name)
        }
        Some(file) => file.to_path_buf(),
    }
}

/// Collect image files from a path (single file or directory).
///
/// Directories contribute their direct children only (non-recursive),
/// sorted by filename so the same directory always yields the same
/// processing order. Unsupported extensions are skipped silently in
/// directory mode but rejected outright for a single named file.
fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        if is_supported_image(input) {
            return Ok(vec![input.to_path_buf()]);
        }
        return Err(Error::UnsupportedFormat(input.to_path_buf()));
    }

    if input.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(input)?
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|e| e.path())
            .filter(|p| is_supported_image(p))
            .collect();
        files.sort();
        return Ok(files);
    }

    Err(Error::InputNotFound(input.to_path_buf()))
}

/// Decide the action for one input/output pair.
///
/// An existing output forces a skip unless `--overwrite` was given, with
/// one narrow exemption: re-keying a `.png` file in place (the output
/// path is the input file itself) is always allowed.
fn classify(input: &Path, output: &Path, dry_run: bool, overwrite: bool) -> Action {
    let in_place_png = output == input
        && input
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));

    if output.exists() && !overwrite && !in_place_png {
        Action::SkipConflict
    } else if dry_run {
        Action::DryRun
    } else {
        Action::Process
    }
}

/// Plan one invocation: discover inputs, resolve outputs, classify each
/// item, and validate the batch output directory.
///
/// All filesystem checks happen here, before any image is opened.
///
/// # Errors
///
/// - [`Error::InputNotFound`] if `input` exists as neither file nor
///   directory.
/// - [`Error::UnsupportedFormat`] if `input` is a single file with an
///   unsupported extension.
/// - [`Error::NoSupportedFiles`] if discovery yields nothing.
/// - [`Error::OutputNotDirectory`] if a batch output path exists but is
///   not a directory.
/// - [`Error::Io`] if the input directory cannot be read.
pub fn plan(
    input: &Path,
    output: Option<&Path>,
    dry_run: bool,
    overwrite: bool,
) -> Result<BatchPlan> {
    let files = discover_inputs(input)?;
    if files.is_empty() {
        return Err(Error::NoSupportedFiles);
    }

    let is_batch = input.is_dir();
    let mut create_dir = None;
    if is_batch {
        if let Some(out) = output {
            if out.exists() {
                if !out.is_dir() {
                    return Err(Error::OutputNotDirectory(out.to_path_buf()));
                }
            } else {
                create_dir = Some(out.to_path_buf());
            }
        }
    }

    let items = files
        .into_iter()
        .map(|file| {
            let out_path = resolve_output_path(&file, output, is_batch);
            let action = classify(&file, &out_path, dry_run, overwrite);
            WorkItem {
                input: file,
                output: out_path,
                action,
            }
        })
        .collect();

    Ok(BatchPlan { items, create_dir })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_image(Path::new("sheet.png")));
        assert!(is_supported_image(Path::new("sheet.BMP")));
        assert!(is_supported_image(Path::new("sheet.Jpeg")));
        assert!(is_supported_image(Path::new("sheet.tga")));
        assert!(is_supported_image(Path::new("sheet.tif")));
    }

    #[test]
    fn unsupported_extensions_are_rejected() {
        assert!(!is_supported_image(Path::new("sheet.txt")));
        assert!(!is_supported_image(Path::new("sheet.webp")));
        assert!(!is_supported_image(Path::new("sheet")));
    }

    #[test]
    fn default_output_swaps_extension_for_png() {
        let out = resolve_output_path(Path::new("a/b.bmp"), None, false);
        assert_eq!(out, PathBuf::from("a/b.png"));
    }

    #[test]
    fn batch_output_joins_stem_onto_directory() {
        let out = resolve_output_path(Path::new("src/x.bmp"), Some(Path::new("out")), true);
        assert_eq!(out, PathBuf::from("out/x.png"));
    }

    #[test]
    fn explicit_single_file_output_is_used_verbatim() {
        let out = resolve_output_path(
            Path::new("sheet.bmp"),
            Some(Path::new("textures/hero.png")),
            false,
        );
        assert_eq!(out, PathBuf::from("textures/hero.png"));
    }

    #[test]
    fn missing_input_path_is_an_error() {
        let err = plan(Path::new("definitely/not/here.bmp"), None, false, false).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn single_unsupported_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        fs::write(&txt, "not an image").unwrap();

        let err = plan(&txt, None, false, false).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn directory_without_images_yields_no_supported_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), "x").unwrap();

        let err = plan(dir.path(), None, false, false).unwrap_err();
        assert!(matches!(err, Error::NoSupportedFiles));
    }

    #[test]
    fn directory_discovery_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), "x").unwrap();
        fs::write(dir.path().join("a.bmp"), "x").unwrap();
        fs::write(dir.path().join("c.txt"), "x").unwrap();

        let plan = plan(dir.path(), None, false, false).unwrap();
        let names: Vec<_> = plan
            .items
            .iter()
            .map(|i| i.input.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.bmp", "b.png"]);
    }

    #[test]
    fn existing_output_without_overwrite_is_a_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sheet.bmp");
        let output = dir.path().join("sheet.png");
        fs::write(&input, "x").unwrap();
        fs::write(&output, "x").unwrap();

        let plan = plan(&input, None, false, false).unwrap();
        assert_eq!(plan.items[0].action, Action::SkipConflict);
    }

    #[test]
    fn overwrite_bypasses_the_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sheet.bmp");
        fs::write(&input, "x").unwrap();
        fs::write(dir.path().join("sheet.png"), "x").unwrap();

        let plan = plan(&input, None, false, true).unwrap();
        assert_eq!(plan.items[0].action, Action::Process);
    }

    #[test]
    fn in_place_png_reprocessing_is_allowed_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sheet.png");
        fs::write(&input, "x").unwrap();

        let plan = plan(&input, None, false, false).unwrap();
        assert_eq!(plan.items[0].action, Action::Process);
        assert_eq!(plan.items[0].output, input);
    }

    #[test]
    fn dry_run_marks_items_instead_of_processing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sheet.bmp");
        fs::write(&input, "x").unwrap();

        let plan = plan(&input, None, true, false).unwrap();
        assert_eq!(plan.items[0].action, Action::DryRun);
    }

    #[test]
    fn conflicts_still_win_over_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sheet.bmp");
        fs::write(&input, "x").unwrap();
        fs::write(dir.path().join("sheet.png"), "x").unwrap();

        let plan = plan(&input, None, true, false).unwrap();
        assert_eq!(plan.items[0].action, Action::SkipConflict);
    }

    #[test]
    fn batch_output_must_be_a_directory_if_it_exists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bmp"), "x").unwrap();
        let collision = dir.path().join("out.png");
        fs::write(&collision, "x").unwrap();

        let err = plan(dir.path(), Some(&collision), false, false).unwrap_err();
        assert!(matches!(err, Error::OutputNotDirectory(_)));
    }

    #[test]
    fn missing_batch_output_directory_is_recorded_for_creation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bmp"), "x").unwrap();
        let out = dir.path().join("textures");

        let plan = plan(dir.path(), Some(&out), false, false).unwrap();
        assert_eq!(plan.create_dir.as_deref(), Some(out.as_path()));
        assert_eq!(plan.items[0].output, out.join("a.png"));
    }

    #[test]
    fn existing_batch_output_directory_needs_no_creation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bmp"), "x").unwrap();
        let out = dir.path().join("textures");
        fs::create_dir(&out).unwrap();

        let plan = plan(dir.path(), Some(&out), false, false).unwrap();
        assert!(plan.create_dir.is_none());
    }
}
