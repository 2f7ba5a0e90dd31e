use crate::dataset::Dataset;
use crate::render::layout::LayoutConfig;
use crate::render::{population_color, NEUTRAL_COLOR};
use itertools::Itertools;
use log::debug;
use relate_phylo::Ancestor;
use std::collections::BTreeMap;
use svg::node::element::{Circle, Group, Line, Text};

// ----------------------------------------------------------------------------
// Dendrogram view
// ----------------------------------------------------------------------------

const GRID_TARGET: usize = 5;
const GRID_COLOR: &str = "#e0e0e0";
const MARKER_FILL: &str = "#b42d2d";
const MARKER_RADIUS: f64 = 2.5;

/// Geometry of one drawn branch line.
struct DrawnBranch {
    y: f64,
    x_start: f64,
    x_end: f64,
}

/// Draw a horizontal cladogram for the selected tree.
///
/// Terminal branches draw first, one horizontal line per leaf at the matching
/// haplotype row. Internal branches follow by a bottom-up reduction: whenever
/// all of a branch's children have been drawn, the children are joined by a
/// vertical beam and the branch gets its own horizontal line, until no
/// further completed sibling pair exists — the root is drawn as a side effect
/// of its children completing, not as a separate step.
///
/// An internal branch takes its children's population color when both agree,
/// neutral gray otherwise. Circular markers overlay every mapped mutation of
/// the displayed tree at its first mapped branch's line midpoint.
pub fn draw(dataset: &Dataset, layout: &LayoutConfig, tree_index: usize, origin_x: f64) -> Group {
    let mut group = Group::new().set("id", "dendrogram");
    let Some(ancestor) = dataset.forest.ancestor(tree_index) else {
        return group;
    };
    if ancestor.root().is_none() {
        return group;
    }

    let total_length = total_length(ancestor);
    let scale = layout.cluster_width() / total_length;
    let depths = depths(ancestor);
    let row_height = layout.haplotype_view_width();

    let mut drawn: BTreeMap<usize, DrawnBranch> = BTreeMap::new();
    let mut populations: BTreeMap<usize, String> = BTreeMap::new();

    group = grid(group, layout, total_length, scale, origin_x);

    // terminal branches first; terminal ids are haplotype indices, so each
    // leaf line sits on its haplotype's row
    for (index, branch) in ancestor.branches.iter().enumerate() {
        if !branch.is_terminal() {
            continue;
        }
        let y = layout.row_y(branch.branch_id) + row_height / 2.0;
        let x_end = origin_x + depths[index] * scale;
        let x_start = origin_x + (depths[index] - branch.distance) * scale;
        let popname = dataset
            .haplotypes
            .get(branch.branch_id)
            .map(|haplotype| dataset.ethnicities.popname(haplotype))
            .unwrap_or_default();

        group = group.add(branch_line(x_start, x_end, y, population_color(&popname)));
        populations.insert(index, popname);
        drawn.insert(index, DrawnBranch { y, x_start, x_end });
    }

    // bottom-up pairwise reduction over the pending work list
    loop {
        let mut advanced = false;
        for (index, branch) in ancestor.branches.iter().enumerate() {
            if drawn.contains_key(&index) || branch.children.is_empty() {
                continue;
            }
            if !branch.children.iter().all(|child| drawn.contains_key(child)) {
                continue;
            }

            let child_ys = branch.children.iter().map(|child| drawn[child].y).collect_vec();
            let y_min = child_ys.iter().copied().fold(f64::MAX, f64::min);
            let y_max = child_ys.iter().copied().fold(f64::MIN, f64::max);
            let y = (y_min + y_max) / 2.0;
            let x_end = origin_x + depths[index] * scale;
            let x_start = origin_x + (depths[index] - branch.distance) * scale;

            // both children must name the same population for the branch to
            // inherit it
            let child_pops = branch
                .children
                .iter()
                .map(|child| populations.get(child).cloned().unwrap_or_default())
                .collect_vec();
            let shared = match child_pops.iter().all_equal() {
                true => child_pops.first().cloned().unwrap_or_default(),
                false => String::new(),
            };
            let color = match shared.is_empty() {
                true => NEUTRAL_COLOR,
                false => population_color(&shared),
            };

            // vertical beam joining the completed children, then the branch's
            // own horizontal line
            group = group.add(
                Line::new()
                    .set("class", "beam")
                    .set("x1", x_end)
                    .set("y1", y_min)
                    .set("x2", x_end)
                    .set("y2", y_max)
                    .set("stroke", color)
                    .set("stroke-width", 1.2),
            );
            group = group.add(branch_line(x_start, x_end, y, color));

            populations.insert(index, shared);
            drawn.insert(index, DrawnBranch { y, x_start, x_end });
            advanced = true;
        }
        // no further completed sibling pair
        if !advanced {
            break;
        }
    }

    // mutation markers at the first mapped branch's line midpoint
    for mutation in &dataset.mutations {
        if mutation.tree_index != tree_index || mutation.is_not_mapping {
            continue;
        }
        let Some(first) = mutation.branch_indices.first() else {
            continue;
        };
        let Some(branch) = usize::try_from(*first).ok().and_then(|id| drawn.get(&id)) else {
            continue;
        };
        group = group.add(
            Circle::new()
                .set("cx", (branch.x_start + branch.x_end) / 2.0)
                .set("cy", branch.y)
                .set("r", MARKER_RADIUS)
                .set("fill", MARKER_FILL),
        );
    }

    debug!("Drew dendrogram for tree {tree_index}: {} branches.", drawn.len());
    group
}

fn branch_line(x_start: f64, x_end: f64, y: f64, color: &str) -> Line {
    Line::new()
        .set("class", "branch")
        .set("x1", x_start)
        .set("y1", y)
        .set("x2", x_end)
        .set("y2", y)
        .set("stroke", color)
        .set("stroke-width", 1.2)
}

/// Distance grid with 1/2/5-stepped lines, redrawn on every draw call.
fn grid(mut group: Group, layout: &LayoutConfig, total_length: f64, scale: f64, origin_x: f64) -> Group {
    let step = nice_step(total_length, GRID_TARGET);
    let top = layout.matrix_top();
    let bottom = top + layout.inner_height();

    let mut value = 0.0;
    while value <= total_length * (1.0 + f64::EPSILON) {
        let x = origin_x + value * scale;
        group = group
            .add(
                Line::new()
                    .set("class", "grid")
                    .set("x1", x)
                    .set("y1", top)
                    .set("x2", x)
                    .set("y2", bottom)
                    .set("stroke", GRID_COLOR)
                    .set("stroke-dasharray", "3 3"),
            )
            .add(
                Text::new(format!("{value:.2}"))
                    .set("x", x)
                    .set("y", bottom + layout.primary_font_size_px)
                    .set("font-size", layout.primary_font_size_px * 0.8)
                    .set("fill", "#606060")
                    .set("text-anchor", "middle"),
            );
        value += step;
    }

    group
}

/// 1/2/5 x 10^k step dividing `range` into about `target` intervals.
///
/// Zero, negative and non-finite ranges still yield a positive step, so
/// degenerate trees (a single branch, zero total length) draw an axis instead
/// of dividing by zero.
pub(crate) fn nice_step(range: f64, target: usize) -> f64 {
    let range = match range.is_finite() && range > 0.0 {
        true => range,
        false => 1.0,
    };
    let rough = range / target.max(1) as f64;
    let magnitude = 10f64.powf(rough.log10().floor());
    let normalized = rough / magnitude;
    let nice = match normalized {
        n if n < 1.5 => 1.0,
        n if n < 3.5 => 2.0,
        n if n < 7.5 => 5.0,
        _ => 10.0,
    };
    nice * magnitude
}

/// Total branch length, summed by walking from any terminal branch up to the
/// root. Guarded to stay positive so the horizontal scale is always finite.
fn total_length(ancestor: &Ancestor) -> f64 {
    let Some(terminal) = ancestor.branches.iter().find(|branch| branch.is_terminal()) else {
        return 1.0;
    };
    let mut length = 0.0;
    let mut current = terminal;
    // bounded by the branch count; validated trees cannot cycle
    for _ in 0..ancestor.branches.len() {
        if current.is_root() {
            break;
        }
        length += current.distance;
        match ancestor.branch(current.parent_branch_id) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    match length.is_finite() && length > 0.0 {
        true => length,
        false => 1.0,
    }
}

/// Cumulative distance from the root for every branch, own length included.
fn depths(ancestor: &Ancestor) -> Vec<f64> {
    ancestor
        .branches
        .iter()
        .map(|branch| {
            let mut depth = 0.0;
            let mut current = branch;
            for _ in 0..ancestor.branches.len() {
                if current.is_root() {
                    break;
                }
                depth += current.distance;
                match ancestor.branch(current.parent_branch_id) {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
            depth
        })
        .collect()
}
