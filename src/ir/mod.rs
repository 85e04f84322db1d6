//! Typed representation of the annotation data flowing through dentyolo.
//!
//! Source documents are parsed into a [`SourceRecord`] with boxes already
//! in min/max pixel form ([`BBoxXYXY`]). Newtype ids keep category ids,
//! tooth numbers and YOLO class ids apart at compile time.
//!
//! # Example
//!
//! ```
//! use dentyolo::ir::{Annotation, BBoxXYXY, Category, ImageInfo, SourceRecord, ToothId};
//!
//! let record = SourceRecord {
//!     image: ImageInfo { file_name: "xray.png".into(), width: 100, height: 100 },
//!     categories: vec![Category::new(1u64, "Tooth_14")],
//!     annotations: vec![Annotation::new(1u64, BBoxXYXY::from_xywh(10.0, 10.0, 20.0, 30.0))],
//! };
//!
//! let teeth = record.tooth_boxes(&record.category_map());
//! assert!(teeth.boxes.contains_key(&ToothId::new(14)));
//! ```

mod bbox;
mod ids;
pub mod io_coco_json;
pub mod io_yolo;
mod model;

// Re-export core types for convenient access
pub use bbox::BBoxXYXY;
pub use ids::{CategoryId, ClassId, ToothId};
pub use model::{
    Annotation, Category, CategoryMap, ImageInfo, SourceRecord, ToothBoxes, CATEGORY_PREFIX_LEN,
};
