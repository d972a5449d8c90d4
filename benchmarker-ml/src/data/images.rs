//! Labeled image datasets laid out as one subdirectory per class.
//!
//! ```text
//! ClassifierData/
//! ├── Training/
//! │   ├── cat/  *.jpg
//! │   └── dog/  *.jpg
//! └── Testing/
//!     ├── cat/
//!     └── dog/
//! ```

use crate::error::BenchError;
use image::imageops::FilterType;
use ndarray::{Array1, Array2};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

/// Images grouped by label, decoded into fixed-length feature vectors.
#[derive(Debug, Clone)]
pub struct LabeledImages {
    /// Class labels in sorted order; a sample's label is an index into this list.
    pub labels: Vec<String>,
    /// One row per image: RGB thumbnail pixels scaled to [0, 1].
    pub features: Array2<f64>,
    /// Label index per row of `features`.
    pub targets: Array1<usize>,
}

impl LabeledImages {
    /// Decode every image below `root`, labeling it by its immediate subdirectory.
    pub fn from_labeled_directories(root: &Path, thumbnail_side: u32) -> Result<Self, BenchError> {
        let mut labels = Vec::new();
        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                labels.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        labels.sort();
        if labels.is_empty() {
            return Err(BenchError::dataset(format!(
                "no label directories in {}",
                root.display()
            )));
        }

        let width = feature_len(thumbnail_side);
        let mut data = Vec::new();
        let mut targets = Vec::new();
        for (label_idx, label) in labels.iter().enumerate() {
            let files = image_files(&root.join(label));
            if files.is_empty() {
                return Err(BenchError::dataset(format!(
                    "label directory '{label}' in {} has no images",
                    root.display()
                )));
            }
            for file in files {
                data.extend(thumbnail_features(&file, thumbnail_side)?);
                targets.push(label_idx);
            }
        }

        let samples = targets.len();
        tracing::debug!(
            root = %root.display(),
            labels = labels.len(),
            samples,
            "Loaded labeled images"
        );
        Ok(Self {
            labels,
            features: Array2::from_shape_vec((samples, width), data)?,
            targets: Array1::from_vec(targets),
        })
    }

    pub fn sample_count(&self) -> usize {
        self.targets.len()
    }

    /// This set's targets renumbered against another label list. Labels
    /// missing from `labels` get indices past its end.
    pub fn targets_for_labels(&self, labels: &[String]) -> Array1<usize> {
        self.targets.mapv(|idx| {
            let name = &self.labels[idx];
            match labels.iter().position(|l| l == name) {
                Some(pos) => pos,
                None => labels.len() + idx,
            }
        })
    }
}

fn feature_len(side: u32) -> usize {
    (side as usize) * (side as usize) * 3
}

fn image_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_image(p))
        .collect();
    files.sort();
    files
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn thumbnail_features(path: &Path, side: u32) -> Result<Vec<f64>, BenchError> {
    let img = image::open(path)?;
    let thumb = img.resize_exact(side, side, FilterType::Triangle).to_rgb8();
    Ok(thumb
        .as_raw()
        .iter()
        .map(|&px| f64::from(px) / 255.0)
        .collect())
}
