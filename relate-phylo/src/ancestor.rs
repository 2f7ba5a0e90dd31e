use crate::Branch;
use color_eyre::eyre::{eyre, Report, Result};
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Region
// ----------------------------------------------------------------------------

/// A contiguous span of mutation-ordinal positions governed by one ancestral
/// tree. Regions tile `[0, last_mutation_snp]` with no gaps: each region's
/// `end` is one less than its successor's `start`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Region {
    pub start: i64,
    pub end: i64,
}

// ----------------------------------------------------------------------------
// Ancestor
// ----------------------------------------------------------------------------

/// One reconstructed ancestral tree and the region it governs.
///
/// The tree's position in the [`Forest`](crate::Forest) is its `tree_index`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Ancestor {
    pub branches: Vec<Branch>,
    pub region: Region,
}

impl Ancestor {
    /// Resolve child links: a branch's children are exactly the other branches
    /// of the same tree whose parent id equals its id. One linear scan per
    /// branch; the links are never mutated afterwards.
    pub fn resolve_children(&mut self) {
        for id in 0..self.branches.len() {
            let children = self
                .branches
                .iter()
                .enumerate()
                .filter(|(child, branch)| *child != id && branch.parent_branch_id == id as i64)
                .map(|(child, _branch)| child)
                .collect();
            self.branches[id].children = children;
        }
    }

    /// Check tree structure after parsing: exactly one root, and every
    /// non-root parent id resolving within the tree.
    pub fn validate(&self) -> Result<(), Report> {
        let roots = self.branches.iter().filter(|branch| branch.is_root()).count();
        if roots != 1 {
            return Err(eyre!("Tree must have exactly one root branch, found {roots}."));
        }
        for branch in &self.branches {
            if !branch.is_root() && self.branch(branch.parent_branch_id).is_none() {
                return Err(eyre!(
                    "Branch {} points at a parent outside the tree: {}.",
                    branch.branch_id,
                    branch.parent_branch_id
                ));
            }
        }
        Ok(())
    }

    /// Look up a branch by raw id. Fragment order assigns ids, so this is an
    /// index; ids outside the tree yield [`None`].
    pub fn branch(&self, branch_id: i64) -> Option<&Branch> {
        usize::try_from(branch_id).ok().and_then(|id| self.branches.get(id))
    }

    /// The root branch (parent id `-1`).
    pub fn root(&self) -> Option<&Branch> {
        self.branches.iter().find(|branch| branch.is_root())
    }

    /// Terminal branches reachable from `branch_id`, depth-first pre-order.
    /// Unknown ids yield an empty sequence, not an error.
    pub fn leaf_branches(&self, branch_id: i64) -> Vec<&Branch> {
        self.descendant_branches(branch_id)
            .into_iter()
            .filter(|branch| branch.is_terminal())
            .collect()
    }

    /// `branch_id` itself and all branches below it, depth-first pre-order.
    /// Unknown ids yield an empty sequence, not an error.
    ///
    /// Cost is proportional to the subtree, not the whole tree; interactive
    /// callers invoke this repeatedly.
    pub fn descendant_branches(&self, branch_id: i64) -> Vec<&Branch> {
        let mut collected = Vec::new();
        if let Some(branch) = self.branch(branch_id) {
            self.collect_descendants(branch, &mut collected);
        }
        collected
    }

    fn collect_descendants<'tree>(
        &'tree self,
        branch: &'tree Branch,
        collected: &mut Vec<&'tree Branch>,
    ) {
        collected.push(branch);
        for &child in &branch.children {
            if let Some(child) = self.branches.get(child) {
                self.collect_descendants(child, collected);
            }
        }
    }

    /// Ids of the terminal branches below (and including) `branch_id`.
    pub fn leaf_ids(&self, branch_id: i64) -> Vec<usize> {
        self.leaf_branches(branch_id).into_iter().map(|branch| branch.branch_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::examples;

    #[test]
    fn leaf_traversal_is_preorder_consistent() {
        // root -> {A, B}, A -> {C, D}: leaves come back as {C, D, B}
        let tree = examples::nested_tree();
        let leaves = tree.leaf_branches(0);
        let ids: Vec<usize> = leaves.iter().map(|branch| branch.branch_id).collect();
        assert_eq!(ids, vec![3, 4, 2]); // C, D, B
    }

    #[test]
    fn descendants_include_the_branch_itself() {
        let tree = examples::nested_tree();
        let ids: Vec<usize> =
            tree.descendant_branches(1).iter().map(|branch| branch.branch_id).collect();
        assert_eq!(ids, vec![1, 3, 4]); // A, C, D
    }

    #[test]
    fn missing_branch_yields_empty_sequences() {
        let tree = examples::nested_tree();
        assert!(tree.descendant_branches(99).is_empty());
        assert!(tree.leaf_branches(-7).is_empty());
    }

    #[test]
    fn two_roots_fail_validation() {
        let mut tree = examples::nested_tree();
        tree.branches[1].parent_branch_id = -1;
        assert!(tree.validate().is_err());
    }

    #[test]
    fn dangling_parent_fails_validation() {
        let mut tree = examples::nested_tree();
        tree.branches[2].parent_branch_id = 40;
        assert!(tree.validate().is_err());
    }
}
