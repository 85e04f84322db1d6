#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub const SAMPLE_XRAY: &str = include_str!("../fixtures/sample_xray.json");

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Writes `<stem>.json` describing a single image, plus the image itself.
///
/// `teeth` holds `(tooth number, [x, y, w, h])`; each tooth gets its own
/// `Tooth_NN` category.
pub fn write_xray(dir: &Path, stem: &str, width: u32, height: u32, teeth: &[(i64, [f64; 4])]) {
    let image_name = format!("{stem}.bmp");

    let categories: Vec<serde_json::Value> = teeth
        .iter()
        .enumerate()
        .map(|(i, (tooth, _))| serde_json::json!({"id": i + 1, "name": format!("Tooth_{tooth}")}))
        .collect();
    let annotations: Vec<serde_json::Value> = teeth
        .iter()
        .enumerate()
        .map(|(i, (_, bbox))| serde_json::json!({"id": i + 1, "image_id": 1, "category_id": i + 1, "bbox": bbox}))
        .collect();

    let doc = serde_json::json!({
        "images": [{"id": 1, "file_name": image_name, "width": width, "height": height}],
        "categories": categories,
        "annotations": annotations,
    });

    fs::create_dir_all(dir).expect("create input dir");
    fs::write(
        dir.join(format!("{stem}.json")),
        serde_json::to_string_pretty(&doc).expect("serialize doc"),
    )
    .expect("write json");
    write_bmp(&dir.join(image_name), width, height);
}

/// Copies the bundled sample document and a matching image into `dir`.
pub fn write_sample(dir: &Path) {
    fs::create_dir_all(dir).expect("create input dir");
    fs::write(dir.join("sample_xray.json"), SAMPLE_XRAY).expect("write sample json");
    write_bmp(&dir.join("sample_xray.bmp"), 200, 100);
}
