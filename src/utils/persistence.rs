use std::{fs, path::Path};

use crate::{draft::PropertyDraft, errors::ListingError};

/// Writes the draft to disk atomically by staging to a temporary file.
pub fn save_draft_to_file(draft: &PropertyDraft, path: &Path) -> Result<(), ListingError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(draft)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a draft snapshot from disk, returning structured errors on failure.
pub fn load_draft_from_file(path: &Path) -> Result<PropertyDraft, ListingError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
