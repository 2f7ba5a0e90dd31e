// ----------------------------------------------------------------------------
// Haplotype list
// ----------------------------------------------------------------------------

/// Parse a newline-delimited haplotype list.
///
/// Each non-empty line contributes the substring before its first `.` as one
/// haplotype identifier. Order is preserved and duplicates are allowed; the
/// position in the returned sequence is the haplotype's canonical integer id,
/// reused as the `branch_id` of terminal branches.
///
/// ## Examples
///
/// ```rust
/// use relate_phylo::parse_haplotypes;
///
/// let haplotypes = parse_haplotypes("HG00001.1.hap\nHG00002.2.hap\n");
/// assert_eq!(haplotypes, vec!["HG00001", "HG00002"]);
/// ```
pub fn parse_haplotypes(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| line.split('.').next().unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_haplotypes;

    #[test]
    fn order_and_duplicates_are_preserved() {
        let text = "B.1\nA.2\n\nA.3\n";
        assert_eq!(parse_haplotypes(text), vec!["B", "A", "A"]);
    }

    #[test]
    fn lines_without_a_dot_are_taken_whole() {
        assert_eq!(parse_haplotypes("HG00001\n"), vec!["HG00001"]);
    }
}
