//! `relate-phylo` parses the flat-text outputs of the Relate ancestral
//! inference tool and reconstructs the per-region forest they describe.
//!
//! Three formats are covered:
//!
//! 1. A haplotype list, one identifier per line (the text before the first
//!    `.`), whose line ordinal is the haplotype's canonical integer id.
//! 2. A `;`-delimited mutation table (`.mut`), one [`Mutation`] per row.
//! 3. A tree file (`.anc`), one line per genomic region, each line a flattened
//!    bracket notation of [`Branch`] fragments.
//!
//! The parsed trees form a [`Forest`] of [`Ancestor`]s. From the forest and
//! the mutation table a [`HaplotypeMutationMatrix`] is derived once: for every
//! (haplotype, mutation) pair, whether that haplotype carries the mutation,
//! answered by walking the branch subtree below each of the mutation's mapped
//! branches.

mod ancestor;
mod branch;
pub mod examples;
mod forest;
mod haplotype;
mod matrix;
mod mutation;

#[doc(inline)]
pub use crate::ancestor::{Ancestor, Region};
#[doc(inline)]
pub use crate::branch::Branch;
#[doc(inline)]
pub use crate::forest::Forest;
#[doc(inline)]
pub use crate::haplotype::parse_haplotypes;
#[doc(inline)]
pub use crate::matrix::HaplotypeMutationMatrix;
#[doc(inline)]
pub use crate::mutation::{parse_mutations, Mutation};
