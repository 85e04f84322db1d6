//! YOLOv5 label writer.
//!
//! Each label file holds one line per object:
//! `class_id center_x center_y width height`, with the four coordinates
//! normalized by the image size and rounded to six decimals.

use std::fs;
use std::path::Path;

use super::{BBoxXYXY, ClassId};
use crate::error::DentyoloError;

pub const LABEL_EXTENSION: &str = "txt";

/// Decimal places kept for normalized coordinates.
const COORD_DECIMALS: usize = 6;

/// Formats one YOLO label line for a pixel-space box.
///
/// # Errors
/// Returns [`DentyoloError::InvalidImageSize`] if either image dimension is
/// zero.
///
/// # Example
/// ```
/// use dentyolo::ir::{BBoxXYXY, ClassId};
/// use dentyolo::ir::io_yolo::format_label_line;
///
/// let full = BBoxXYXY::from_xyxy(0.0, 0.0, 640.0, 480.0);
/// let line = format_label_line(ClassId(0), &full, 640, 480)?;
/// assert_eq!(line, "0 0.5 0.5 1.0 1.0");
/// # Ok::<(), dentyolo::DentyoloError>(())
/// ```
pub fn format_label_line(
    class_id: ClassId,
    bbox: &BBoxXYXY,
    image_width: u32,
    image_height: u32,
) -> Result<String, DentyoloError> {
    check_image_size(image_width, image_height)?;

    let image_w = f64::from(image_width);
    let image_h = f64::from(image_height);
    let (cx, cy, w, h) = bbox.to_cxcywh();

    Ok(format!(
        "{} {} {} {} {}",
        class_id,
        format_coordinate(cx / image_w),
        format_coordinate(cy / image_h),
        format_coordinate(w / image_w),
        format_coordinate(h / image_h),
    ))
}

/// Fails with [`DentyoloError::InvalidImageSize`] unless both dimensions
/// are positive.
pub fn check_image_size(image_width: u32, image_height: u32) -> Result<(), DentyoloError> {
    if image_width == 0 || image_height == 0 {
        return Err(DentyoloError::InvalidImageSize {
            width: image_width,
            height: image_height,
        });
    }
    Ok(())
}

/// Rounds to six decimals and renders the shortest plain-decimal form,
/// keeping at least one fractional digit (`1.0`, `0.5`, `0.123457`).
///
/// Rounding is done on the exact binary value, so it is correctly rounded;
/// exact ties go to the even digit. Negative zero renders as `0.0`.
pub fn format_coordinate(value: f64) -> String {
    let mut text = format!("{:.*}", COORD_DECIMALS, value);
    if !text.contains('.') {
        // inf / NaN carry no fractional part to trim
        return text;
    }

    let trimmed = text.trim_end_matches('0').len();
    text.truncate(trimmed);
    if text.ends_with('.') {
        text.push('0');
    }
    if text == "-0.0" {
        text.remove(0);
    }
    text
}

/// Writes label lines joined by `\n`, without a trailing newline.
///
/// An empty `lines` slice produces an empty file.
pub fn write_label_file(path: &Path, lines: &[String]) -> Result<(), DentyoloError> {
    fs::write(path, lines.join("\n")).map_err(|source| DentyoloError::LabelWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Fuzz-only entrypoint for label line formatting.
#[cfg(feature = "fuzzing")]
pub fn fuzz_format_label_line(
    coords: [f64; 4],
    image_width: u32,
    image_height: u32,
) -> Result<String, DentyoloError> {
    let [xmin, ymin, xmax, ymax] = coords;
    format_label_line(
        ClassId(0),
        &BBoxXYXY::from_xyxy(xmin, ymin, xmax, ymax),
        image_width,
        image_height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_image_box_is_centered() {
        let bbox = BBoxXYXY::from_xyxy(0.0, 0.0, 100.0, 50.0);
        let line = format_label_line(ClassId(0), &bbox, 100, 50).unwrap();
        assert_eq!(line, "0 0.5 0.5 1.0 1.0");
    }

    #[test]
    fn rounds_to_six_decimals() {
        let bbox = BBoxXYXY::from_xyxy(10.0, 10.0, 20.0, 40.0);
        let line = format_label_line(ClassId(7), &bbox, 3, 7).unwrap();
        // cx = 15/3 = 5, cy = 25/7, w = 10/3, h = 30/7
        assert_eq!(line, "7 5.0 3.571429 3.333333 4.285714");
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let bbox = BBoxXYXY::from_xyxy(0.0, 0.0, 1.0, 1.0);
        let err = format_label_line(ClassId(0), &bbox, 0, 10).unwrap_err();
        assert!(matches!(
            err,
            DentyoloError::InvalidImageSize {
                width: 0,
                height: 10
            }
        ));
        assert!(format_label_line(ClassId(0), &bbox, 10, 0).is_err());
    }

    #[test]
    fn format_coordinate_trims_trailing_zeros() {
        assert_eq!(format_coordinate(0.25), "0.25");
        assert_eq!(format_coordinate(1.0), "1.0");
        assert_eq!(format_coordinate(0.0), "0.0");
        assert_eq!(format_coordinate(12.5), "12.5");
        assert_eq!(format_coordinate(0.1 + 0.2), "0.3");
    }

    #[test]
    fn format_coordinate_rounds_small_values() {
        assert_eq!(format_coordinate(0.000001), "0.000001");
        assert_eq!(format_coordinate(0.0000004), "0.0");
        assert_eq!(format_coordinate(0.1234567), "0.123457");
        assert_eq!(format_coordinate(2.0 / 3.0), "0.666667");
    }

    #[test]
    fn format_coordinate_breaks_exact_ties_to_even() {
        // 2^-7 and 3 * 2^-7 are exact binary values ending in 5 at the 7th decimal
        assert_eq!(format_coordinate(0.0078125), "0.007812");
        assert_eq!(format_coordinate(0.0234375), "0.023438");
    }

    #[test]
    fn format_coordinate_normalizes_negative_zero() {
        assert_eq!(format_coordinate(-0.0), "0.0");
        assert_eq!(format_coordinate(-0.0000001), "0.0");
        assert_eq!(format_coordinate(-0.25), "-0.25");
    }

    #[test]
    fn write_label_file_joins_without_trailing_newline() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("a.txt");

        let lines = vec![
            "0 0.5 0.5 1.0 1.0".to_string(),
            "1 0.1 0.1 0.2 0.2".to_string(),
        ];
        write_label_file(&path, &lines).expect("write labels");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "0 0.5 0.5 1.0 1.0\n1 0.1 0.1 0.2 0.2"
        );

        write_label_file(&path, &[]).expect("write empty labels");
        assert!(fs::read_to_string(&path).unwrap().is_empty());
    }

    #[test]
    fn write_label_file_reports_path_on_failure() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("missing_dir").join("a.txt");

        let err = write_label_file(&path, &[]).unwrap_err();
        assert!(matches!(err, DentyoloError::LabelWrite { .. }));
    }
}
