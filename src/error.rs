use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dentyolo operations.
#[derive(Debug, Error)]
pub enum DentyoloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed annotation document {path}: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when a merge is requested for an empty group. Grouping never
    /// produces empty groups, so this marks a broken invariant.
    #[error("Cannot merge an empty set of boxes")]
    EmptyMerge,

    #[error("Invalid image size {width}x{height}: both dimensions must be positive")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("Image file {path} could not be copied: {source}")]
    MissingImageFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document names its image with a path instead of a bare file name.
    #[error("Image name {name:?} in {path} must be a plain file name")]
    UnsafeImageName { path: PathBuf, name: String },

    #[error("Image {path} would be copied onto itself")]
    ImageCopyOntoItself { path: PathBuf },

    #[error("Output directory {path} is not writable: {source}")]
    OutputDirectoryUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write label file {path}: {source}")]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {path}: {source}")]
    DirectoryScan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Input directory not found: {path}")]
    InputDirNotFound { path: PathBuf },

    #[error("Input and output directories are the same: {path}")]
    SameDirectory { path: PathBuf },

    #[error("Conversion finished with {skipped} skipped file(s)")]
    FilesSkipped { skipped: usize },

    #[error("Failed to render report as JSON: {0}")]
    ReportWrite(#[source] serde_json::Error),
}
