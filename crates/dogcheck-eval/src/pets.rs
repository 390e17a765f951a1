use std::collections::BTreeMap;
use std::path::Path;

use dogcheck_core::pet_label_from_filename;

use crate::errors::EvalError;

/// Ground-truth labels keyed by image path.
pub type PetLabels = BTreeMap<String, String>;

/// Derive ground-truth labels for every image file in `image_dir`.
///
/// Keys are `image_dir` joined with the file name. Hidden files and
/// subdirectories are skipped.
pub fn collect_pet_labels(image_dir: &Path) -> Result<PetLabels, EvalError> {
    let entries = std::fs::read_dir(image_dir).map_err(|err| {
        EvalError::InvalidDataset(format!(
            "cannot read image directory '{}': {err}",
            image_dir.display()
        ))
    })?;

    let mut labels = PetLabels::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }
        let image = image_dir.join(&file_name).to_string_lossy().into_owned();
        labels.insert(image, pet_label_from_filename(&file_name));
    }
    Ok(labels)
}
