use crate::{branch, Ancestor, Branch, Region};
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Forest
// ----------------------------------------------------------------------------

/// The per-region ancestral trees reconstructed from a Relate `.anc` file,
/// ordered by `tree_index`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Forest {
    pub ancestors: Vec<Ancestor>,
}

impl Forest {
    /// Parse a `.anc` file: two discarded header lines, then one tree per
    /// line. Each line carries a leading decimal region start, a `:`, and a
    /// branch-list payload whose sibling fragments are joined by `") "`.
    ///
    /// `last_snp` is the final mutation's `snp` ordinal and closes the last
    /// region; earlier regions end one short of their successor's start.
    ///
    /// Any fragment that fails the bracket pattern aborts the parse, leaving
    /// no partially populated tree behind.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use relate_phylo::{examples, Forest};
    ///
    /// let forest = Forest::parse(examples::ANC_TEXT, 5)?;
    /// assert_eq!(forest.ancestors.len(), 2);
    /// assert_eq!(forest.ancestors[0].region.end + 1, forest.ancestors[1].region.start);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn parse(text: &str, last_snp: i64) -> Result<Forest, Report> {
        let pattern = Regex::new(branch::FRAGMENT)?;

        let mut starts = Vec::new();
        let mut trees = Vec::new();
        for (number, line) in text.lines().enumerate().skip(2) {
            if line.trim().is_empty() {
                continue;
            }
            let (start, branches) = parse_tree_line(line, &pattern)
                .wrap_err_with(|| format!("Failed to parse .anc line {}", number + 1))?;
            starts.push(start);
            trees.push(branches);
        }

        let mut ancestors = trees
            .into_iter()
            .enumerate()
            .map(|(index, branches)| {
                let start = starts[index];
                let end = match starts.get(index + 1) {
                    Some(next) => next - 1,
                    None => last_snp,
                };
                Ancestor { branches, region: Region { start, end } }
            })
            .collect_vec();

        for (index, ancestor) in ancestors.iter_mut().enumerate() {
            ancestor.resolve_children();
            ancestor.validate().wrap_err_with(|| format!("Malformed tree at index {index}"))?;
        }

        debug!("Parsed {} ancestral trees.", ancestors.len());
        Ok(Forest { ancestors })
    }

    /// Tree lookup by `tree_index`.
    pub fn ancestor(&self, tree_index: usize) -> Option<&Ancestor> {
        self.ancestors.get(tree_index)
    }

    /// The regions of every tree, in `tree_index` order.
    pub fn regions(&self) -> Vec<Region> {
        self.ancestors.iter().map(|ancestor| ancestor.region).collect()
    }

    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }
}

/// One `.anc` line: leading region start, `:`, then the branch payload.
///
/// Splitting on the literal `") "` consumes every closing paren except the
/// final fragment's, so the paren is restored on each fragment that lost it.
fn parse_tree_line(line: &str, pattern: &Regex) -> Result<(i64, Vec<Branch>), Report> {
    let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(eyre!("Tree line does not begin with a region start number: {line:?}"));
    }
    let start = digits
        .parse()
        .wrap_err_with(|| format!("Region start is not an integer: {digits:?}"))?;

    let payload = line
        .splitn(2, ':')
        .nth(1)
        .ok_or_else(|| eyre!("Tree line has no `:` before the branch list: {line:?}"))?
        .trim();

    let branches = payload
        .split(") ")
        .enumerate()
        .map(|(branch_id, fragment)| {
            let fragment = fragment.trim();
            let restored = match fragment.ends_with(')') {
                true => fragment.to_string(),
                false => format!("{fragment})"),
            };
            Branch::from_fragment(&restored, branch_id, pattern)
        })
        .collect::<Result<Vec<_>, Report>>()?;

    Ok((start, branches))
}

#[cfg(test)]
mod tests {
    use super::Forest;
    use crate::examples;

    #[test]
    fn regions_tile_the_mutation_axis() {
        let forest = Forest::parse(examples::ANC_TEXT, 5).unwrap();
        let regions = forest.regions();
        assert_eq!(regions[0].start, 0);
        for pair in regions.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
        assert_eq!(regions.last().unwrap().end, 5);
    }

    #[test]
    fn children_links_are_resolved_per_tree() {
        let forest = Forest::parse(examples::ANC_TEXT, 5).unwrap();
        let tree = forest.ancestor(0).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(root.branch_id, 6);
        assert_eq!(root.children, vec![4, 5]);
        assert_eq!(tree.branches[4].children, vec![0, 1]);
        assert!(tree.branches[0].is_terminal());
    }

    #[test]
    fn malformed_fragment_aborts_the_parse() {
        // the second fragment omits its numeric fields
        let text = "header\nheader\n0: 2:(0.5 0 0 1) 2:() -1:(0.0 0 0 1)\n";
        assert!(Forest::parse(text, 1).is_err());
    }

    #[test]
    fn missing_colon_aborts_the_parse() {
        let text = "header\nheader\n0 no colon here\n";
        assert!(Forest::parse(text, 1).is_err());
    }

    #[test]
    fn header_lines_are_discarded() {
        let forest = Forest::parse(examples::ANC_TEXT, 5).unwrap();
        assert_eq!(forest.len(), 2);
    }
}
