//! Directory-level conversion from COCO documents to grouped YOLO labels.
//!
//! Every `*.json` file directly inside the input directory is converted in
//! file-name order through a fixed pipeline:
//!
//! 1. parse the document into a [`SourceRecord`]
//! 2. map categories to tooth numbers, then teeth to boxes
//! 3. group the teeth ([`group_teeth`])
//! 4. per group: allocate a class id, merge the boxes, format a YOLO line
//! 5. write `<stem>.txt` and copy the referenced image next to it
//!
//! Class ids come from a single [`LabelAllocator`] shared by the whole run.

pub mod report;

pub use report::{
    ConversionCounts, ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity,
};

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::DentyoloError;
use crate::grouping::{group_teeth, SingletonPolicy};
use crate::ir::io_coco_json::read_source_record;
use crate::ir::io_yolo::{check_image_size, format_label_line, write_label_file, LABEL_EXTENSION};
use crate::ir::{BBoxXYXY, SourceRecord, ToothBoxes};
use crate::labels::LabelAllocator;

const SOURCE_EXTENSION: &str = "json";

/// What to do when a single file fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run and return the file's error.
    #[default]
    Abort,
    /// Log the failure, record it in the report and carry on.
    Skip,
}

/// Settings for one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub singletons: SingletonPolicy,
    pub on_error: FailurePolicy,
}

impl ConvertOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            singletons: SingletonPolicy::default(),
            on_error: FailurePolicy::default(),
        }
    }
}

/// Label lines for one record plus the bookkeeping that goes in the report.
#[derive(Clone, Debug, Default)]
pub struct RecordLabels {
    pub lines: Vec<String>,
    pub skipped_categories: usize,
    pub unmapped_annotations: usize,
    pub overwritten_annotations: usize,
}

/// Converts every source document in `opts.input_dir`.
///
/// Class ids are drawn from `labels`, which may already hold labels from an
/// earlier call; ids are never reset within one allocator.
///
/// Under [`FailurePolicy::Abort`] the first failing file ends the run with
/// its error. Under [`FailurePolicy::Skip`] failures are recorded in the
/// returned report and the caller decides how to surface them.
pub fn convert_dir(
    opts: &ConvertOptions,
    labels: &mut LabelAllocator,
) -> Result<ConversionReport, DentyoloError> {
    if !opts.input_dir.is_dir() {
        return Err(DentyoloError::InputDirNotFound {
            path: opts.input_dir.clone(),
        });
    }

    fs::create_dir_all(&opts.output_dir).map_err(|source| {
        DentyoloError::OutputDirectoryUnwritable {
            path: opts.output_dir.clone(),
            source,
        }
    })?;

    if same_directory(&opts.input_dir, &opts.output_dir)? {
        return Err(DentyoloError::SameDirectory {
            path: opts.input_dir.clone(),
        });
    }

    let sources = collect_source_files(&opts.input_dir)?;
    info!(
        "Found {} annotation file(s) in {}",
        sources.len(),
        opts.input_dir.display()
    );

    let mut report = ConversionReport::new(&opts.input_dir, &opts.output_dir);
    report.counts.files = sources.len();

    for source in &sources {
        match convert_file(source, opts, labels, &mut report) {
            Ok(()) => report.counts.converted += 1,
            Err(err) => match opts.on_error {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Skip => {
                    warn!("Skipping {}: {}", source.display(), err);
                    report.counts.skipped += 1;
                    report.add(ConversionIssue::warning(
                        ConversionIssueCode::SkippedFile,
                        source,
                        err.to_string(),
                    ));
                }
            },
        }
    }

    report.class_labels = labels.labels().to_vec();
    info!(
        "Converted {} of {} file(s), {} class label(s)",
        report.counts.converted,
        report.counts.files,
        report.class_labels.len()
    );

    Ok(report)
}

/// Turns one parsed record into YOLO label lines.
///
/// This is the pure part of the pipeline; it touches no files.
pub fn convert_record(
    record: &SourceRecord,
    singletons: SingletonPolicy,
    labels: &mut LabelAllocator,
) -> Result<RecordLabels, DentyoloError> {
    let categories = record.category_map();
    let teeth = record.tooth_boxes(&categories);

    let lines = label_lines(record, &teeth, singletons, labels)?;

    Ok(RecordLabels {
        lines,
        skipped_categories: categories.skipped,
        unmapped_annotations: teeth.unmapped,
        overwritten_annotations: teeth.overwritten,
    })
}

fn label_lines(
    record: &SourceRecord,
    teeth: &ToothBoxes,
    singletons: SingletonPolicy,
    labels: &mut LabelAllocator,
) -> Result<Vec<String>, DentyoloError> {
    let groups = group_teeth(teeth.boxes.keys().copied(), singletons);
    if groups.is_empty() {
        return Ok(Vec::new());
    }

    let merged = groups
        .iter()
        .map(|group| BBoxXYXY::merge(group.teeth().iter().filter_map(|t| teeth.boxes.get(t))))
        .collect::<Result<Vec<_>, _>>()?;
    let (width, height) = (record.image.width, record.image.height);
    check_image_size(width, height)?;

    // class ids are only allocated once the record is known to convert
    let mut lines = Vec::with_capacity(groups.len());
    for (group, bbox) in groups.iter().zip(&merged) {
        let class_id = labels.assign(&group.label());
        let line = format_label_line(class_id, bbox, width, height)?;
        debug!("{} -> {}", group, line);
        lines.push(line);
    }

    Ok(lines)
}

fn convert_file(
    source: &Path,
    opts: &ConvertOptions,
    labels: &mut LabelAllocator,
    report: &mut ConversionReport,
) -> Result<(), DentyoloError> {
    let record = read_source_record(source)?;
    let image_name = image_file_name(source, &record.image.file_name)?;
    let image_src = opts.input_dir.join(image_name);
    let image_dst = opts.output_dir.join(image_name);
    if same_file(&image_src, &image_dst) {
        return Err(DentyoloError::ImageCopyOntoItself { path: image_src });
    }
    fs::metadata(&image_src).map_err(|source| DentyoloError::MissingImageFile {
        path: image_src.clone(),
        source,
    })?;

    let converted = convert_record(&record, opts.singletons, labels)?;

    let label_path = opts
        .output_dir
        .join(label_file_name(source))
        .with_extension(LABEL_EXTENSION);
    write_label_file(&label_path, &converted.lines)?;

    fs::copy(&image_src, &image_dst).map_err(|source| DentyoloError::MissingImageFile {
        path: image_src.clone(),
        source,
    })?;

    record_tolerated(source, &converted, report);
    report.counts.label_lines += converted.lines.len();
    report.counts.images_copied += 1;

    info!(
        "{} -> {} ({} line(s))",
        source.display(),
        label_path.display(),
        converted.lines.len()
    );
    Ok(())
}

fn record_tolerated(source: &Path, converted: &RecordLabels, report: &mut ConversionReport) {
    report.counts.skipped_categories += converted.skipped_categories;
    report.counts.unmapped_annotations += converted.unmapped_annotations;
    report.counts.overwritten_annotations += converted.overwritten_annotations;

    if converted.skipped_categories > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::NonToothCategories,
            source,
            format!(
                "{} categor(ies) without a tooth number ignored",
                converted.skipped_categories
            ),
        ));
    }
    if converted.unmapped_annotations > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::UnmappedAnnotations,
            source,
            format!(
                "{} annotation(s) outside tooth categories ignored",
                converted.unmapped_annotations
            ),
        ));
    }
    if converted.overwritten_annotations > 0 {
        report.add(ConversionIssue::info(
            ConversionIssueCode::OverwrittenTooth,
            source,
            format!(
                "{} repeated tooth annotation(s), last box kept",
                converted.overwritten_annotations
            ),
        ));
    }
    if converted.lines.is_empty() {
        report.add(ConversionIssue::info(
            ConversionIssueCode::EmptyLabelFile,
            source,
            "no tooth groups, label file is empty",
        ));
    }
}

/// File name of `source`, used as the base for its label file.
fn label_file_name(source: &Path) -> PathBuf {
    source.file_name().map(PathBuf::from).unwrap_or_default()
}

/// The image name as a single path component, so the copy stays inside
/// the input and output directories.
fn image_file_name<'a>(source: &Path, name: &'a str) -> Result<&'a Path, DentyoloError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => Ok(Path::new(part)),
        _ => Err(DentyoloError::UnsafeImageName {
            path: source.to_path_buf(),
            name: name.to_string(),
        }),
    }
}

/// True when both paths exist and resolve to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn collect_source_files(root: &Path) -> Result<Vec<PathBuf>, DentyoloError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| DentyoloError::DirectoryScan {
            path: root.to_path_buf(),
            source,
        })?;

        let ext = entry.path().extension().and_then(|ext| ext.to_str());
        if entry.file_type().is_file() && ext == Some(SOURCE_EXTENSION) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn same_directory(a: &Path, b: &Path) -> Result<bool, DentyoloError> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}
