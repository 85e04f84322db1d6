//! Bounding boxes in min/max (XYXY) form, plus the corner+size adapter and
//! the enclosing-box merge used to collapse a tooth group into one box.

use serde::Serialize;

use crate::error::DentyoloError;

/// An axis-aligned bounding box in absolute pixels, XYXY format
/// (xmin, ymin, xmax, ymax).
///
/// The constructor does not enforce `min <= max`; a box built from a
/// negative width or height is kept as-is and reported by [`is_ordered`].
///
/// [`is_ordered`]: BBoxXYXY::is_ordered
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BBoxXYXY {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BBoxXYXY {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Converts from corner+size form `(x, y, width, height)` where `(x, y)`
    /// is the top-left corner. This is the layout COCO uses for `bbox`.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Returns `(cx, cy, w, h)`.
    #[inline]
    pub fn to_cxcywh(&self) -> (f64, f64, f64, f64) {
        (
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
            self.width(),
            self.height(),
        )
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// Returns the smallest box enclosing every box in `boxes`.
    ///
    /// The result does not depend on the order of the input.
    ///
    /// # Errors
    /// Returns [`DentyoloError::EmptyMerge`] when `boxes` yields nothing.
    pub fn merge<'a, I>(boxes: I) -> Result<Self, DentyoloError>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut iter = boxes.into_iter();
        let first = *iter.next().ok_or(DentyoloError::EmptyMerge)?;

        Ok(iter.fold(first, |acc, b| {
            Self::from_xyxy(
                acc.xmin.min(b.xmin),
                acc.ymin.min(b.ymin),
                acc.xmax.max(b.xmax),
                acc.ymax.max(b.ymax),
            )
        }))
    }
}
