use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Mutation
// ----------------------------------------------------------------------------

/// One row of the Relate `.mut` table.
///
/// A mutation maps onto zero or more branches of exactly one tree
/// (`tree_index`). `is_not_mapping` excludes it from geometric placement in
/// the dendrogram but not from the incidence matrix derivation. The row's
/// position in the table is the mutation's column index everywhere else.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Mutation {
    pub snp: i64,
    pub pos_of_snp: i64,
    pub dist: i64,
    pub rs_id: String,
    pub tree_index: usize,
    /// Ids of the branches this mutation event is attached to in its tree.
    pub branch_indices: Vec<i64>,
    pub is_not_mapping: bool,
    pub is_flipped: bool,
    pub age_begin: f64,
    pub age_end: f64,
    /// Ancestral/derived alleles, `/`-delimited in the input.
    pub alleles: Vec<String>,
}

/// Parse a `.mut` table: `;`-delimited rows, the first line a discarded
/// column header.
///
/// The two age fields parse leniently (`NaN` on malformed input, propagated);
/// malformed integer fields abort the parse.
///
/// ## Examples
///
/// ```rust
/// use relate_phylo::parse_mutations;
///
/// let text = "snp;pos;dist;rsid;tree;branches;notmap;flip;agebegin;ageend;alleles\n\
///             0;10000;5;rs111;0;4;0;0;120.5;340.2;A/G\n";
/// let mutations = parse_mutations(text)?;
/// assert_eq!(mutations[0].branch_indices, vec![4]);
/// assert_eq!(mutations[0].alleles, vec!["A", "G"]);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn parse_mutations(text: &str) -> Result<Vec<Mutation>, Report> {
    let mut mutations = Vec::new();
    for (number, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let mutation = parse_row(line)
            .wrap_err_with(|| format!("Failed to parse .mut table line {}", number + 1))?;
        mutations.push(mutation);
    }
    debug!("Parsed {} mutations.", mutations.len());
    Ok(mutations)
}

fn parse_row(line: &str) -> Result<Mutation, Report> {
    let fields = line.split(';').collect_vec();
    if fields.len() < 11 {
        return Err(eyre!("Expected 11 fields, found {}: {line:?}", fields.len()));
    }

    let mutation = Mutation {
        snp: parse_int(fields[0], "snp")?,
        pos_of_snp: parse_int(fields[1], "pos_of_snp")?,
        dist: parse_int(fields[2], "dist")?,
        rs_id: fields[3].trim().to_string(),
        tree_index: fields[4]
            .trim()
            .parse()
            .wrap_err_with(|| format!("Field \"tree_index\" is not an index: {:?}", fields[4]))?,
        branch_indices: fields[5]
            .split_whitespace()
            .map(|id| parse_int(id, "branch_indices"))
            .collect::<Result<Vec<_>, Report>>()?,
        is_not_mapping: fields[6].trim() == "1",
        is_flipped: fields[7].trim() == "1",
        // ages are lenient: malformed input propagates as NaN
        age_begin: fields[8].trim().parse().unwrap_or(f64::NAN),
        age_end: fields[9].trim().parse().unwrap_or(f64::NAN),
        alleles: fields[10].trim().split('/').map(String::from).collect(),
    };

    Ok(mutation)
}

fn parse_int(field: &str, name: &str) -> Result<i64, Report> {
    field
        .trim()
        .parse()
        .wrap_err_with(|| format!("Field {name:?} is not an integer: {field:?}"))
}

#[cfg(test)]
mod tests {
    use super::parse_mutations;

    #[test]
    fn header_is_discarded_and_fields_are_positional() {
        let text = "header\n5;12345;7;rs42;1;2 6;1;0;10.5;20.5;C/T\n";
        let mutations = parse_mutations(text).unwrap();
        assert_eq!(mutations.len(), 1);
        let mutation = &mutations[0];
        assert_eq!(mutation.snp, 5);
        assert_eq!(mutation.pos_of_snp, 12345);
        assert_eq!(mutation.dist, 7);
        assert_eq!(mutation.rs_id, "rs42");
        assert_eq!(mutation.tree_index, 1);
        assert_eq!(mutation.branch_indices, vec![2, 6]);
        assert!(mutation.is_not_mapping);
        assert!(!mutation.is_flipped);
        assert_eq!(mutation.alleles, vec!["C", "T"]);
    }

    #[test]
    fn malformed_ages_propagate_as_nan() {
        let text = "header\n0;1;1;rs1;0;0;0;0;oops;;A/G\n";
        let mutations = parse_mutations(text).unwrap();
        assert!(mutations[0].age_begin.is_nan());
        assert!(mutations[0].age_end.is_nan());
    }

    #[test]
    fn malformed_integer_field_is_an_error() {
        let text = "header\nx;1;1;rs1;0;0;0;0;1.0;2.0;A/G\n";
        assert!(parse_mutations(text).is_err());
    }

    #[test]
    fn short_row_is_an_error() {
        let text = "header\n0;1;1;rs1;0;0\n";
        assert!(parse_mutations(text).is_err());
    }
}
