//! Presentation hints derived from the image count. Pure and
//! deterministic; the rendering layer maps these onto its grid classes.

/// Column arrangement for a gallery of `count` images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridHint {
    /// Maximum number of columns at full width.
    pub columns: u8,
    /// Render as a single centered block rather than a spread grid.
    pub centered: bool,
    /// Show an overflow indicator for images past this visible slot.
    pub overflow_after: Option<usize>,
}

/// Aspect ratio a slot should render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectHint {
    /// 4:3.
    Landscape,
    Square,
}

pub fn grid_layout(count: usize) -> GridHint {
    match count {
        0 | 1 => GridHint {
            columns: 1,
            centered: true,
            overflow_after: None,
        },
        2 => GridHint {
            columns: 2,
            centered: true,
            overflow_after: None,
        },
        3..=6 => GridHint {
            columns: 3,
            centered: false,
            overflow_after: None,
        },
        _ => GridHint {
            columns: 4,
            centered: false,
            overflow_after: Some(6),
        },
    }
}

pub fn aspect_ratio(count: usize, index: usize) -> AspectHint {
    match (count, index) {
        (1, _) => AspectHint::Landscape,
        (2, _) => AspectHint::Square,
        (3, 0) => AspectHint::Landscape,
        _ => AspectHint::Square,
    }
}
