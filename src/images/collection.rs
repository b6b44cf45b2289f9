use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Upper bound advertised by the upload panel.
pub const MAX_IMAGES: usize = 10;

/// A file the host selected for upload, before it is accepted into the
/// collection. The handle is opaque to the collection; only the decode
/// collaborator looks inside.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub handle: FileHandle,
}

#[derive(Debug, Clone)]
pub enum FileHandle {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl SelectedFile {
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = guess_mime(&name);
        Self {
            name,
            mime,
            handle: FileHandle::Path(path),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

fn guess_mime(name: &str) -> String {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" => "image/png".to_string(),
        "gif" => "image/gif".to_string(),
        "webp" => "image/webp".to_string(),
        "bmp" => "image/bmp".to_string(),
        "svg" => "image/svg+xml".to_string(),
        "" => "application/octet-stream".to_string(),
        other => format!("application/{other}"),
    }
}

/// An accepted gallery entry. Identity is fixed at accept time; reordering
/// reassigns positions, never ids. The source handle is released once the
/// preview has been produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    pub id: Uuid,
    pub name: String,
    pub mime: String,
    pub preview: String,
}

/// Renders a selected file into something displayable (a data URL, a blob
/// reference, a path). Hosts supply their own; the collection only needs
/// the call to resolve.
pub trait PreviewDecoder {
    fn decode(&self, file: &SelectedFile) -> Result<String, DecodeError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DecodeError(pub String);

/// Decoder that hands back the file's on-disk location as the preview
/// reference. Suits hosts that render from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPreviewDecoder;

impl PreviewDecoder for PathPreviewDecoder {
    fn decode(&self, file: &SelectedFile) -> Result<String, DecodeError> {
        match &file.handle {
            FileHandle::Path(path) => Ok(path.display().to_string()),
            FileHandle::Bytes(_) => Err(DecodeError(format!(
                "No path available for `{}`",
                file.name
            ))),
        }
    }
}

/// Who decides which image is primary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PrimaryPolicy {
    /// The wizard's rule: the first image is always primary and cannot be
    /// overridden. Promote an image by reordering it to the front.
    #[default]
    FirstIsPrimary,
    /// The property viewer's rule: primary is an independently settable
    /// pointer; the pointed-at element does not move.
    MovablePointer,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("`{name}` is not an image file ({mime})")]
    UnsupportedFileType { name: String, mime: String },
    #[error("`{name}` skipped: the gallery already holds {MAX_IMAGES} images")]
    CollectionFull { name: String },
    #[error("`{name}` could not be decoded: {message}")]
    DecodeFailed { name: String, message: String },
    #[error("No image with id {0}")]
    UnknownImage(Uuid),
    #[error("Image index {index} is out of range (gallery holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("The first image is always primary for this gallery; reorder instead")]
    PrimaryFixed,
}

/// One file that did not make it into the collection, with the reason the
/// host should surface as a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    pub name: String,
    pub reason: ImageError,
}

/// Result of one `add_images` batch. Rejections never abort the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub added: Vec<Uuid>,
    pub rejected: Vec<RejectedFile>,
}

impl BatchOutcome {
    pub fn accepted(&self) -> usize {
        self.added.len()
    }
}

/// Ordered image list with a designated primary index.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ImageCollection {
    policy: PrimaryPolicy,
    items: Vec<ImageRef>,
    primary: usize,
}

impl ImageCollection {
    pub fn new(policy: PrimaryPolicy) -> Self {
        Self {
            policy,
            items: Vec::new(),
            primary: 0,
        }
    }

    pub fn policy(&self) -> PrimaryPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ImageRef] {
        &self.items
    }

    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|image| image.id == id)
    }

    pub fn primary_index(&self) -> usize {
        match self.policy {
            PrimaryPolicy::FirstIsPrimary => 0,
            PrimaryPolicy::MovablePointer => self.primary,
        }
    }

    pub fn primary(&self) -> Option<&ImageRef> {
        self.items.get(self.primary_index())
    }

    /// Accepts image-MIME files into the gallery in selection order.
    /// Non-image files, overflow past [`MAX_IMAGES`], and decode failures
    /// are collected as per-file rejections; the rest of the batch still
    /// lands. Previews are decoded sequentially, so the stored order is
    /// always the selection order.
    pub fn add_images<D: PreviewDecoder>(
        &mut self,
        files: Vec<SelectedFile>,
        decoder: &D,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for file in files {
            if !file.is_image() {
                tracing::warn!(name = %file.name, mime = %file.mime, "skipping non-image file");
                outcome.rejected.push(RejectedFile {
                    reason: ImageError::UnsupportedFileType {
                        name: file.name.clone(),
                        mime: file.mime.clone(),
                    },
                    name: file.name,
                });
                continue;
            }
            if self.items.len() >= MAX_IMAGES {
                outcome.rejected.push(RejectedFile {
                    reason: ImageError::CollectionFull {
                        name: file.name.clone(),
                    },
                    name: file.name,
                });
                continue;
            }
            match decoder.decode(&file) {
                Ok(preview) => {
                    let image = ImageRef {
                        id: Uuid::new_v4(),
                        name: file.name,
                        mime: file.mime,
                        preview,
                    };
                    outcome.added.push(image.id);
                    self.items.push(image);
                }
                Err(err) => {
                    tracing::warn!(name = %file.name, error = %err, "preview decode failed");
                    outcome.rejected.push(RejectedFile {
                        reason: ImageError::DecodeFailed {
                            name: file.name.clone(),
                            message: err.0,
                        },
                        name: file.name,
                    });
                }
            }
        }
        outcome
    }

    /// Removes the image with the given id. When the removed slot sits at
    /// or before the primary pointer and the pointer is above zero, the
    /// pointer shifts down one so it keeps naming a sensible neighbor.
    pub fn remove(&mut self, id: Uuid) -> Result<ImageRef, ImageError> {
        let index = self.index_of(id).ok_or(ImageError::UnknownImage(id))?;
        let removed = self.items.remove(index);
        if matches!(self.policy, PrimaryPolicy::MovablePointer)
            && index <= self.primary
            && self.primary > 0
        {
            self.primary -= 1;
        }
        Ok(removed)
    }

    /// Moves the element at `from` so it ends up at `to`, shifting the
    /// elements in between. Drag gestures and the move-left/right buttons
    /// both route through here so they always agree on the result.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ImageError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(ImageError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        let image = self.items.remove(from);
        self.items.insert(to, image);
        Ok(())
    }

    /// Swaps the image one slot toward the front. No-op at the left edge.
    pub fn move_left(&mut self, index: usize) -> Result<(), ImageError> {
        if index == 0 {
            return bounds_only(index, self.items.len());
        }
        self.reorder(index, index - 1)
    }

    /// Swaps the image one slot toward the back. No-op at the right edge.
    pub fn move_right(&mut self, index: usize) -> Result<(), ImageError> {
        if index + 1 >= self.items.len() {
            return bounds_only(index, self.items.len());
        }
        self.reorder(index, index + 1)
    }

    /// Marks `index` as primary without moving the element. Rejected under
    /// [`PrimaryPolicy::FirstIsPrimary`].
    pub fn set_primary(&mut self, index: usize) -> Result<(), ImageError> {
        match self.policy {
            PrimaryPolicy::FirstIsPrimary => Err(ImageError::PrimaryFixed),
            PrimaryPolicy::MovablePointer => {
                if index >= self.items.len() {
                    return Err(ImageError::IndexOutOfRange {
                        index,
                        len: self.items.len(),
                    });
                }
                self.primary = index;
                Ok(())
            }
        }
    }
}

fn bounds_only(index: usize, len: usize) -> Result<(), ImageError> {
    if index >= len {
        Err(ImageError::IndexOutOfRange { index, len })
    } else {
        Ok(())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, &self.id.to_string()[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubDecoder;

    impl PreviewDecoder for StubDecoder {
        fn decode(&self, file: &SelectedFile) -> Result<String, DecodeError> {
            Ok(format!("preview:{}", file.name))
        }
    }

    fn file(name: &str) -> SelectedFile {
        SelectedFile::from_path(PathBuf::from(name))
    }

    fn filled(policy: PrimaryPolicy, count: usize) -> ImageCollection {
        let mut collection = ImageCollection::new(policy);
        let files = (0..count).map(|i| file(&format!("img{i}.jpg"))).collect();
        collection.add_images(files, &StubDecoder);
        collection
    }

    #[test]
    fn non_image_files_are_rejected_per_file() {
        let mut collection = ImageCollection::new(PrimaryPolicy::FirstIsPrimary);
        let outcome = collection.add_images(
            vec![file("a.jpg"), file("notes.txt"), file("b.png")],
            &StubDecoder,
        );
        assert_eq!(outcome.accepted(), 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert!(matches!(
            outcome.rejected[0].reason,
            ImageError::UnsupportedFileType { .. }
        ));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn batch_fills_remaining_slots_past_the_cap() {
        let mut collection = filled(PrimaryPolicy::FirstIsPrimary, MAX_IMAGES - 1);
        let outcome =
            collection.add_images(vec![file("x.jpg"), file("y.jpg")], &StubDecoder);
        assert_eq!(outcome.accepted(), 1);
        assert!(matches!(
            outcome.rejected[0].reason,
            ImageError::CollectionFull { .. }
        ));
        assert_eq!(collection.len(), MAX_IMAGES);
    }

    #[test]
    fn reorder_round_trips() {
        let mut collection = filled(PrimaryPolicy::FirstIsPrimary, 4);
        let original: Vec<_> = collection.items().to_vec();
        collection.reorder(0, 2).unwrap();
        assert_ne!(collection.items(), original.as_slice());
        collection.reorder(2, 0).unwrap();
        assert_eq!(collection.items(), original.as_slice());
    }

    #[test]
    fn move_buttons_match_drag_semantics() {
        let mut dragged = filled(PrimaryPolicy::FirstIsPrimary, 3);
        let mut buttoned = dragged.clone();
        dragged.reorder(2, 1).unwrap();
        buttoned.move_left(2).unwrap();
        assert_eq!(dragged.items(), buttoned.items());

        // Edges are no-ops, not errors.
        buttoned.move_left(0).unwrap();
        buttoned.move_right(2).unwrap();
        assert_eq!(dragged.items(), buttoned.items());
    }

    #[test]
    fn primary_pointer_shifts_down_on_remove() {
        let mut collection = filled(PrimaryPolicy::MovablePointer, 5);
        collection.set_primary(2).unwrap();
        let victim = collection.items()[1].id;
        collection.remove(victim).unwrap();
        assert_eq!(collection.primary_index(), 1);
    }

    #[test]
    fn primary_pointer_stays_when_removing_later_slot() {
        let mut collection = filled(PrimaryPolicy::MovablePointer, 5);
        collection.set_primary(2).unwrap();
        let victim = collection.items()[4].id;
        collection.remove(victim).unwrap();
        assert_eq!(collection.primary_index(), 2);
    }

    #[test]
    fn first_is_primary_rejects_overrides() {
        let mut collection = filled(PrimaryPolicy::FirstIsPrimary, 3);
        assert_eq!(collection.primary_index(), 0);
        assert!(matches!(
            collection.set_primary(1),
            Err(ImageError::PrimaryFixed)
        ));
    }

    #[test]
    fn remove_by_unknown_id_is_an_error() {
        let mut collection = filled(PrimaryPolicy::MovablePointer, 2);
        let err = collection.remove(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ImageError::UnknownImage(_)));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn mime_guessing_covers_common_extensions() {
        assert!(file("photo.JPG").is_image());
        assert!(file("photo.webp").is_image());
        assert!(!file("report.pdf").is_image());
        assert!(!file("README").is_image());
    }
}
