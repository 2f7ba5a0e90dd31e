use crate::{Forest, Mutation};
use log::debug;

// ----------------------------------------------------------------------------
// Haplotype x mutation incidence
// ----------------------------------------------------------------------------

/// Dense boolean matrix indexed `[haplotype][mutation]`: whether a haplotype
/// carries a mutation. Derived once after all trees are parsed and frozen
/// afterwards; views only read it.
#[derive(Clone, Debug, Default)]
pub struct HaplotypeMutationMatrix {
    cells: Vec<Vec<bool>>,
}

impl HaplotypeMutationMatrix {
    /// One-time derivation pass.
    ///
    /// For each mutation in column order: the union of all branches
    /// transitively descending (inclusive) from every id in its
    /// `branch_indices`, restricted to its own tree, marks that column for
    /// every id in the union inside `[0, haplotype_count)`. Ids outside that
    /// range are ignored at the write, not guarded during the walk; mutations
    /// pointing at an unknown tree leave their column empty.
    ///
    /// ## Examples
    ///
    /// A mutation mapped to the root of a cherry marks both leaves; one mapped
    /// to a single leaf marks only that leaf.
    ///
    /// ```rust
    /// use relate_phylo::{examples, HaplotypeMutationMatrix};
    ///
    /// let (forest, mutations) = examples::cherry_with_mutations();
    /// let matrix = HaplotypeMutationMatrix::derive(2, &mutations, &forest);
    /// assert!(matrix.is_set(0, 0) && matrix.is_set(1, 0)); // root mutation
    /// assert!(matrix.is_set(0, 1) && !matrix.is_set(1, 1)); // leaf mutation
    /// ```
    pub fn derive(haplotype_count: usize, mutations: &[Mutation], forest: &Forest) -> Self {
        let mut cells = vec![vec![false; mutations.len()]; haplotype_count];

        for (column, mutation) in mutations.iter().enumerate() {
            let Some(ancestor) = forest.ancestor(mutation.tree_index) else {
                continue;
            };
            for &branch_id in &mutation.branch_indices {
                for branch in ancestor.descendant_branches(branch_id) {
                    if branch.branch_id < haplotype_count {
                        cells[branch.branch_id][column] = true;
                    }
                }
            }
        }

        debug!(
            "Derived incidence matrix: {} haplotypes x {} mutations.",
            haplotype_count,
            mutations.len()
        );
        HaplotypeMutationMatrix { cells }
    }

    pub fn is_set(&self, haplotype: usize, mutation: usize) -> bool {
        self.cells
            .get(haplotype)
            .and_then(|row| row.get(mutation))
            .copied()
            .unwrap_or(false)
    }

    /// One haplotype's full mutation row.
    pub fn row(&self, haplotype: usize) -> Option<&[bool]> {
        self.cells.get(haplotype).map(Vec::as_slice)
    }

    pub fn haplotype_count(&self) -> usize {
        self.cells.len()
    }

    pub fn mutation_count(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }
}
