use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use regex::Regex;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Branch
// ----------------------------------------------------------------------------

/// Pattern for one `.anc` branch fragment: `parent:(distance weight from to)`.
pub const FRAGMENT: &str = r"^(-?\d+):\((\S+)\s+(\S+)\s+(\S+)\s+(\S+)\)$";

/// One edge/node record in a reconstructed ancestral tree.
///
/// `branch_id` is the fragment's ordinal on its `.anc` line and is unique only
/// within its tree; terminal branches reuse haplotype indices as ids. A parent
/// id of `-1` marks the root. A branch is terminal iff it has no children.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Branch {
    pub branch_id: usize,
    pub parent_branch_id: i64,
    pub distance: f64,
    pub weight: f64,
    pub branch_from: i64,
    pub branch_to: i64,
    /// Positions of this branch's children in the owning tree's branch list,
    /// resolved once after the whole tree has parsed.
    #[serde(default)]
    pub children: Vec<usize>,
}

impl Branch {
    /// Parse one bracket fragment. A fragment that does not match [`FRAGMENT`]
    /// is a fatal parse-shape error for its tree.
    pub fn from_fragment(fragment: &str, branch_id: usize, pattern: &Regex) -> Result<Branch, Report> {
        let captures = pattern.captures(fragment).ok_or_else(|| {
            eyre!("Branch fragment does not match `parent:(distance weight from to)`: {fragment:?}")
        })?;

        let branch = Branch {
            branch_id,
            parent_branch_id: parse_number(&captures[1], fragment)?,
            distance: parse_number(&captures[2], fragment)?,
            weight: parse_number(&captures[3], fragment)?,
            branch_from: parse_number(&captures[4], fragment)?,
            branch_to: parse_number(&captures[5], fragment)?,
            children: Vec::new(),
        };

        Ok(branch)
    }

    pub fn is_root(&self) -> bool {
        self.parent_branch_id == -1
    }

    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }
}

fn parse_number<T>(capture: &str, fragment: &str) -> Result<T, Report>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    capture
        .parse()
        .wrap_err_with(|| format!("Branch fragment holds a malformed number: {fragment:?}"))
}

#[cfg(test)]
mod tests {
    use super::{Branch, FRAGMENT};
    use regex::Regex;

    #[test]
    fn fragment_fields_are_captured_in_order() {
        let pattern = Regex::new(FRAGMENT).unwrap();
        let branch = Branch::from_fragment("6:(0.25 2 0 9)", 3, &pattern).unwrap();
        assert_eq!(branch.branch_id, 3);
        assert_eq!(branch.parent_branch_id, 6);
        assert_eq!(branch.distance, 0.25);
        assert_eq!(branch.weight, 2.0);
        assert_eq!(branch.branch_from, 0);
        assert_eq!(branch.branch_to, 9);
        assert!(!branch.is_root());
    }

    #[test]
    fn root_fragment_has_parent_minus_one() {
        let pattern = Regex::new(FRAGMENT).unwrap();
        let branch = Branch::from_fragment("-1:(0.0 0 0 9)", 6, &pattern).unwrap();
        assert!(branch.is_root());
    }

    #[test]
    fn fragment_missing_a_field_is_rejected() {
        let pattern = Regex::new(FRAGMENT).unwrap();
        assert!(Branch::from_fragment("6:(0.25 2 0)", 0, &pattern).is_err());
    }

    #[test]
    fn fragment_with_a_non_numeric_field_is_rejected() {
        let pattern = Regex::new(FRAGMENT).unwrap();
        assert!(Branch::from_fragment("6:(0.25 two 0 9)", 0, &pattern).is_err());
    }
}
