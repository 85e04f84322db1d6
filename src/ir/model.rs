//! In-memory model of one source annotation document.
//!
//! A [`SourceRecord`] describes a single X-ray image: its size and file
//! name, the tooth categories, and one pixel-space box per annotation.
//! The readers in [`io_coco_json`](super::io_coco_json) build it; the
//! conversion pipeline only ever reads it.

use serde::Serialize;
use std::collections::BTreeMap;

use super::bbox::BBoxXYXY;
use super::ids::{CategoryId, ToothId};

/// Number of characters preceding the tooth number in a category name,
/// e.g. the `Tooth_` in `Tooth_14`.
pub const CATEGORY_PREFIX_LEN: usize = 6;

/// One parsed annotation document.
#[derive(Clone, Debug, Serialize)]
pub struct SourceRecord {
    /// The image the annotations belong to (the document's first image).
    pub image: ImageInfo,

    /// All category definitions, tooth and non-tooth alike.
    pub categories: Vec<Category>,

    /// All annotations, boxes already converted to min/max form.
    pub annotations: Vec<Annotation>,
}

/// Size and file name of the annotated image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// A category definition from the source document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Parses the tooth number following the fixed name prefix.
    ///
    /// Returns `None` for names whose suffix is not an integer, which is how
    /// non-tooth categories are told apart.
    pub fn tooth_id(&self) -> Option<ToothId> {
        let suffix: String = self.name.chars().skip(CATEGORY_PREFIX_LEN).collect();
        suffix.trim().parse::<i64>().ok().map(ToothId::new)
    }
}

/// A single annotated box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub category_id: CategoryId,
    pub bbox: BBoxXYXY,
}

impl Annotation {
    pub fn new(category_id: impl Into<CategoryId>, bbox: BBoxXYXY) -> Self {
        Self {
            category_id: category_id.into(),
            bbox,
        }
    }
}

/// Category id to tooth number, with the count of categories left out.
#[derive(Clone, Debug, Default)]
pub struct CategoryMap {
    pub teeth: BTreeMap<CategoryId, ToothId>,
    /// Categories whose name carries no tooth number.
    pub skipped: usize,
}

/// Tooth number to box, ordered by tooth number.
#[derive(Clone, Debug, Default)]
pub struct ToothBoxes {
    pub boxes: BTreeMap<ToothId, BBoxXYXY>,
    /// Annotations whose category is not a tooth.
    pub unmapped: usize,
    /// Annotations that replaced an earlier box for the same tooth.
    pub overwritten: usize,
}

impl SourceRecord {
    /// Builds the category-id to tooth-number mapping.
    ///
    /// When two categories share an id the later one wins.
    pub fn category_map(&self) -> CategoryMap {
        let mut map = CategoryMap::default();
        for category in &self.categories {
            match category.tooth_id() {
                Some(tooth) => {
                    map.teeth.insert(category.id, tooth);
                }
                None => map.skipped += 1,
            }
        }
        map
    }

    /// Collects one box per tooth. A later annotation for the same tooth
    /// replaces the earlier one.
    pub fn tooth_boxes(&self, categories: &CategoryMap) -> ToothBoxes {
        let mut result = ToothBoxes::default();
        for ann in &self.annotations {
            let Some(&tooth) = categories.teeth.get(&ann.category_id) else {
                result.unmapped += 1;
                continue;
            };
            if result.boxes.insert(tooth, ann.bbox).is_some() {
                result.overwritten += 1;
            }
        }
        result
    }
}
