//! Ordered image gallery for a property: upload filtering, preview
//! decoding, reordering, primary-image tracking, and the pure layout
//! hints the rendering layer consumes.

pub mod collection;
pub mod layout;

pub use collection::{
    BatchOutcome, DecodeError, FileHandle, ImageCollection, ImageError, ImageRef,
    PathPreviewDecoder, PreviewDecoder, PrimaryPolicy, RejectedFile, SelectedFile, MAX_IMAGES,
};
pub use layout::{aspect_ratio, grid_layout, AspectHint, GridHint};
