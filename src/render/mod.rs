//! The view layer: three coordinated SVG sub-views over one loaded dataset.
//!
//! [`Stage`] owns the shared selection state and composes the haplotype
//! matrix, the region selector and the dendrogram into one document.
//! Interaction arrives as [`ViewEvent`]s dispatched through
//! [`Stage::handle`]; each event invalidates only the views it affects, so a
//! state change re-renders the dependent views and nothing else.

pub mod dendrogram;
pub mod haplotype_view;
pub mod layout;
pub mod region_selector;
pub mod stage;
pub mod widgets;
#[cfg(test)]
mod tests;

pub use layout::LayoutConfig;
pub use stage::Stage;
pub use widgets::Tooltip;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// ----------------------------------------------------------------------------
// View events
// ----------------------------------------------------------------------------

/// Typed counterparts of the DOM custom events the views exchange, carrying
/// the same payloads (`select-haplotype` sends the clicked row indexes and
/// the shift-modifier state).
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    /// Haplotype rows were clicked.
    SelectHaplotype { indexes: Vec<usize>, shift_key: bool },
    /// A click on the stage background outside any row.
    ClearSelection,
    /// A region indicator was clicked.
    ToggleRegion { tree_index: usize },
    /// The pointer entered a matrix cell.
    HoverCell { haplotype: usize, mutation: usize },
    /// The pointer left the stage.
    HoverEnd,
}

// ----------------------------------------------------------------------------
// Population colors
// ----------------------------------------------------------------------------

pub const NEUTRAL_COLOR: &str = "#8a8a8a";

const POPULATION_PALETTE: [&str; 8] = [
    "#1f4fcc", "#cc1f1f", "#238023", "#b4640a", "#7a1fa2", "#0a8a8a", "#b41f7a", "#5a5a1e",
];

/// Stable color for a population name; the empty name is neutral gray.
pub fn population_color(popname: &str) -> &'static str {
    if popname.is_empty() {
        return NEUTRAL_COLOR;
    }
    let mut hasher = DefaultHasher::new();
    popname.hash(&mut hasher);
    POPULATION_PALETTE[(hasher.finish() % POPULATION_PALETTE.len() as u64) as usize]
}
