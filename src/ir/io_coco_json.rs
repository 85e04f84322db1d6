//! COCO-style JSON reader for dental annotation documents.
//!
//! Each input file describes a single X-ray: only `images[0]` is used, and
//! every annotation is assumed to belong to it.
//!
//! # COCO Format Reference
//!
//! COCO bounding boxes use `[x, y, width, height]` format where `(x, y)` is
//! the top-left corner in absolute pixels. Boxes are converted to min/max
//! form as they are read.
//!
//! Fields other than the ones below are ignored, so full COCO exports
//! (`info`, `licenses`, `segmentation`, ...) parse without changes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::model::{Annotation, Category, ImageInfo, SourceRecord};
use super::{BBoxXYXY, CategoryId};
use crate::error::DentyoloError;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

#[derive(Debug, Deserialize)]
struct CocoRecord {
    #[serde(deserialize_with = "first_image")]
    images: CocoImage,

    categories: Vec<CocoCategory>,

    annotations: Vec<CocoAnnotation>,
}

#[derive(Debug, Deserialize)]
struct CocoImage {
    #[serde(deserialize_with = "pixel_dimension")]
    width: u32,
    #[serde(deserialize_with = "pixel_dimension")]
    height: u32,
    file_name: String,
}

#[derive(Debug, Deserialize)]
struct CocoCategory {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CocoAnnotation {
    category_id: u64,

    /// COCO bbox format: [x, y, width, height] with (x,y) as top-left corner
    bbox: [f64; 4],
}

/// Keeps the first entry of `images`, rejecting an empty array.
fn first_image<'de, D>(deserializer: D) -> Result<CocoImage, D::Error>
where
    D: Deserializer<'de>,
{
    let images = Vec::<CocoImage>::deserialize(deserializer)?;
    images
        .into_iter()
        .next()
        .ok_or_else(|| serde::de::Error::custom("'images' array is empty"))
}

/// Accepts any JSON number holding a whole, non-negative pixel count, so
/// exports that write `640.0` read the same as `640`.
fn pixel_dimension<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(serde::de::Error::custom(format!(
            "image dimension {value} is not a whole pixel count"
        )));
    }
    Ok(value as u32)
}

// ============================================================================
// Public API
// ============================================================================

/// Reads a source record from a COCO JSON file.
///
/// # Errors
/// Returns [`DentyoloError::Io`] if the file cannot be opened and
/// [`DentyoloError::MalformedDocument`] if it is not valid JSON or lacks
/// `images`, `categories` or `annotations`.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use dentyolo::ir::io_coco_json::read_source_record;
///
/// let record = read_source_record(Path::new("xray_001.json"))?;
/// println!("{} annotations", record.annotations.len());
/// # Ok::<(), dentyolo::DentyoloError>(())
/// ```
pub fn read_source_record(path: &Path) -> Result<SourceRecord, DentyoloError> {
    let file = File::open(path).map_err(DentyoloError::Io)?;
    let reader = BufReader::new(file);

    let coco: CocoRecord =
        serde_json::from_reader(reader).map_err(|source| DentyoloError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(coco_to_record(coco))
}

/// Reads a source record from a COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<SourceRecord, serde_json::Error> {
    let coco: CocoRecord = serde_json::from_str(json)?;
    Ok(coco_to_record(coco))
}

/// Reads a source record from a COCO JSON byte slice.
pub fn from_coco_slice(bytes: &[u8]) -> Result<SourceRecord, serde_json::Error> {
    let coco: CocoRecord = serde_json::from_slice(bytes)?;
    Ok(coco_to_record(coco))
}

fn coco_to_record(coco: CocoRecord) -> SourceRecord {
    let image = ImageInfo {
        file_name: coco.images.file_name,
        width: coco.images.width,
        height: coco.images.height,
    };

    let categories = coco
        .categories
        .into_iter()
        .map(|cat| Category::new(cat.id, cat.name))
        .collect();

    let annotations = coco
        .annotations
        .into_iter()
        .map(|ann| {
            let [x, y, w, h] = ann.bbox;
            Annotation::new(CategoryId::new(ann.category_id), BBoxXYXY::from_xywh(x, y, w, h))
        })
        .collect();

    SourceRecord {
        image,
        categories,
        annotations,
    }
}
