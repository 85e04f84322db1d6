//! Conversion report types.
//!
//! A [`ConversionReport`] summarises one run: what was read, what was
//! written, what was tolerated along the way, and the class labels the run
//! allocated. It renders as text for people and serializes to JSON for
//! scripts.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Summary of one conversion run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ConversionReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub counts: ConversionCounts,
    /// Issues recorded while converting, in file order.
    pub issues: Vec<ConversionIssue>,
    /// Class labels in class-id order. Printed only, never written to disk.
    pub class_labels: Vec<String>,
}

impl ConversionReport {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn add(&mut self, issue: ConversionIssue) {
        self.issues.push(issue);
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Warning)
            .count()
    }

    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == ConversionSeverity::Info)
            .count()
    }

    /// Files abandoned under the skip policy.
    pub fn skipped_files(&self) -> impl Iterator<Item = &ConversionIssue> {
        self.issues
            .iter()
            .filter(|i| i.code == ConversionIssueCode::SkippedFile)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counts;
        writeln!(
            f,
            "Converted {} of {} file(s): {} -> {}",
            c.converted,
            c.files,
            self.input_dir.display(),
            self.output_dir.display()
        )?;
        writeln!(
            f,
            "  {} label line(s), {} image(s) copied, {} class label(s)",
            c.label_lines,
            c.images_copied,
            self.class_labels.len()
        )?;

        if c.skipped_categories + c.unmapped_annotations + c.overwritten_annotations > 0 {
            writeln!(
                f,
                "  tolerated: {} non-tooth categor(ies), {} unmapped annotation(s), {} overwritten annotation(s)",
                c.skipped_categories, c.unmapped_annotations, c.overwritten_annotations
            )?;
        }

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Warning)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == ConversionSeverity::Info)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        if !self.class_labels.is_empty() {
            writeln!(f)?;
            writeln!(f, "Classes:")?;
            for (id, label) in self.class_labels.iter().enumerate() {
                writeln!(f, "  {}: {}", id, label)?;
            }
        }

        Ok(())
    }
}

/// Run-wide totals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConversionCounts {
    /// Source documents found in the input directory.
    pub files: usize,
    pub converted: usize,
    pub skipped: usize,
    pub label_lines: usize,
    pub images_copied: usize,
    pub skipped_categories: usize,
    pub unmapped_annotations: usize,
    pub overwritten_annotations: usize,
}

/// A single issue recorded during conversion.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionIssue {
    pub severity: ConversionSeverity,
    pub code: ConversionIssueCode,
    /// Source file the issue belongs to.
    pub file: PathBuf,
    pub message: String,
}

impl ConversionIssue {
    pub fn warning(
        code: ConversionIssueCode,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: ConversionSeverity::Warning,
            code,
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn info(
        code: ConversionIssueCode,
        file: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: ConversionSeverity::Info,
            code,
            file: file.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConversionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionSeverity {
    /// The file was not converted.
    Warning,
    /// Something was tolerated; the file was still converted.
    Info,
}

/// Stable issue codes for programmatic consumption.
///
/// These codes are part of the JSON output and should remain stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionIssueCode {
    /// The file failed and was skipped.
    SkippedFile,
    /// Categories without a tooth number were left out.
    NonToothCategories,
    /// Annotations pointing at non-tooth or unknown categories were left out.
    UnmappedAnnotations,
    /// A tooth was annotated more than once; the last box was kept.
    OverwrittenTooth,
    /// No groups were formed, so the label file is empty.
    EmptyLabelFile,
}
