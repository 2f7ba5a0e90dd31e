//! `relate-viewer` renders the output of the Relate ancestral-inference tool
//! as three coordinated SVG views: a haplotype-by-mutation matrix, a genomic
//! region selector, and a dendrogram of the selected region's tree.
//!
//! The parsing and tree algorithms live in the `relate-phylo` member crate;
//! this crate owns dataset loading, the population lookup, layout geometry,
//! the view layer and the command-line binary.
//!
//! One [`Dataset`] is an analysis session: it owns the haplotype list, the
//! mutation table, the ancestral forest, the derived incidence matrix and the
//! population index together, and is constructed atomically — either all
//! input files load and parse, or nothing is exposed to the views.

pub mod cli;
pub mod dataset;
pub mod render;

#[doc(inline)]
pub use crate::cli::Cli;
#[doc(inline)]
pub use crate::dataset::{Dataset, SessionConfig};
#[doc(inline)]
pub use crate::render::Stage;
