//! Small hand-built trees and raw-text fixtures shared by tests and
//! documentation examples.

use crate::{parse_haplotypes, parse_mutations, Ancestor, Branch, Forest, Mutation, Region};
use color_eyre::eyre::{Report, Result};

/// A four-haplotype `.anc` fixture: two header lines, then two trees of seven
/// branches each (terminals 0..=3, cherries 4 and 5, root 6). The first tree
/// starts at mutation ordinal 0, the second at 3.
pub const ANC_TEXT: &str = "\
NUM_HAPLOTYPES 4
NUM_TREES 2
0: 4:(0.5 1 0 2) 4:(0.5 0 0 2) 5:(1.0 0 0 2) 5:(1.0 2 0 2) 6:(0.7 0 0 2) 6:(0.2 0 0 2) -1:(0.0 0 0 2)
3: 4:(0.3 1 3 5) 4:(0.3 0 3 5) 5:(0.8 0 3 5) 5:(0.8 2 3 5) 6:(0.6 0 3 5) 6:(0.1 0 3 5) -1:(0.0 0 3 5)
";

/// The matching `.mut` fixture: six mutations, three per tree.
pub const MUT_TEXT: &str = "\
snp;pos_of_snp;dist;rs-id;tree-index;branch-indices;is-not-mapping;is-flipped;age-begin;age-end;alleles
0;10000;5;rs111;0;0;0;0;120.5;340.2;A/G
1;10005;12;rs112;0;4;0;0;80.0;200.0;C/T
2;10017;3;rs113;0;6;0;0;500.0;900.0;G/A
3;10020;7;rs114;1;5;0;0;60.0;95.5;T/C
4;10027;2;rs115;1;2;1;0;30.0;55.0;A/C
5;10029;9;rs116;1;1 3;0;1;15.0;40.0;G/T
";

/// The matching haplotype list.
pub const HAPLOTYPE_TEXT: &str = "\
HG00001.1.hap
HG00002.1.hap
HG00003.1.hap
HG00004.1.hap
";

/// A population lookup fixture; HG00004 is deliberately absent.
pub const HAPMAP_TEXT: &str = "\
sampleid\tpopname\tgpopname
HG00001\tGBR\tEUR
HG00002\tGBR\tEUR
HG00003\tYRI\tAFR
";

fn branch(branch_id: usize, parent_branch_id: i64, distance: f64) -> Branch {
    Branch {
        branch_id,
        parent_branch_id,
        distance,
        weight: 0.0,
        branch_from: 0,
        branch_to: 9,
        children: Vec::new(),
    }
}

fn mutation(snp: i64, tree_index: usize, branch_indices: Vec<i64>) -> Mutation {
    Mutation {
        snp,
        pos_of_snp: 10_000 + snp,
        dist: 1,
        rs_id: format!("rs{snp}"),
        tree_index,
        branch_indices,
        is_not_mapping: false,
        is_flipped: false,
        age_begin: 10.0,
        age_end: 20.0,
        alleles: vec!["A".to_string(), "G".to_string()],
    }
}

/// `root -> {A, B}`, `A -> {C, D}`, with ids root=0, A=1, B=2, C=3, D=4.
pub fn nested_tree() -> Ancestor {
    let mut tree = Ancestor {
        branches: vec![
            branch(0, -1, 0.0),
            branch(1, 0, 1.0),
            branch(2, 0, 2.0),
            branch(3, 1, 1.0),
            branch(4, 1, 1.5),
        ],
        region: Region { start: 0, end: 9 },
    };
    tree.resolve_children();
    tree
}

/// A single cherry (two leaves under one root) plus two mutations: column 0
/// mapped to the root, column 1 mapped to leaf 0.
pub fn cherry_with_mutations() -> (Forest, Vec<Mutation>) {
    let mut tree = Ancestor {
        branches: vec![branch(0, 2, 0.5), branch(1, 2, 0.5), branch(2, -1, 0.0)],
        region: Region { start: 0, end: 1 },
    };
    tree.resolve_children();

    let forest = Forest { ancestors: vec![tree] };
    let mutations = vec![mutation(0, 0, vec![2]), mutation(1, 0, vec![0])];
    (forest, mutations)
}

/// The full fixture dataset: haplotypes, mutations and forest parsed from the
/// raw-text constants above.
pub fn dataset() -> Result<(Vec<String>, Vec<Mutation>, Forest), Report> {
    let haplotypes = parse_haplotypes(HAPLOTYPE_TEXT);
    let mutations = parse_mutations(MUT_TEXT)?;
    let last_snp = mutations.last().map(|mutation| mutation.snp).unwrap_or(0);
    let forest = Forest::parse(ANC_TEXT, last_snp)?;
    Ok((haplotypes, mutations, forest))
}
