use crate::dataset::Dataset;
use crate::render::layout::{LayoutConfig, MUTATION_PITCH};
use crate::render::{population_color, widgets};
use std::collections::BTreeSet;
use svg::node::element::{Group, Line, Rectangle, Text};

// ----------------------------------------------------------------------------
// Haplotype matrix view
// ----------------------------------------------------------------------------

const SELECTED_FILL: &str = "#fff3c4";
const REGION_BORDER: &str = "#d8d8d8";

/// Draw one row per haplotype, subdivided by region: a filled cell for every
/// mutated position (from the incidence matrix), a checkbox per row, and the
/// row label. Selected rows carry a highlight rectangle behind their cells.
///
/// `label_offset` shifts the row labels right while the dendrogram panel is
/// open; the stage repositions them in one coalesced pass.
pub fn draw(
    dataset: &Dataset,
    layout: &LayoutConfig,
    selection: &BTreeSet<usize>,
    label_offset: f64,
) -> Group {
    let mut group = Group::new().set("id", "haplotype-view");
    let row_height = layout.haplotype_view_width();
    let matrix_left = layout.matrix_left();
    let mutation_count = dataset.mutation_count();

    // region boundaries, drawn once behind the rows
    for ancestor in &dataset.forest.ancestors {
        let x = matrix_left + (ancestor.region.end + 1) as f64 * MUTATION_PITCH;
        group = group.add(
            Line::new()
                .set("x1", x)
                .set("y1", layout.matrix_top())
                .set("x2", x)
                .set("y2", layout.matrix_top() + layout.inner_height())
                .set("stroke", REGION_BORDER),
        );
    }

    for (index, haplotype) in dataset.haplotypes.iter().enumerate() {
        let y = layout.row_y(index);
        let selected = selection.contains(&index);
        let popname = dataset.ethnicities.popname(haplotype);

        if selected {
            group = group.add(
                Rectangle::new()
                    .set("class", "selected")
                    .set("x", matrix_left)
                    .set("y", y)
                    .set("width", layout.mutation_width())
                    .set("height", row_height)
                    .set("fill", SELECTED_FILL),
            );
        }

        group = group.add(widgets::checkbox(
            layout.padding.left,
            y + (row_height - widgets::CHECKBOX_SIZE) / 2.0,
            selected,
        ));

        // cells, region by region, so each region forms its own band
        for ancestor in &dataset.forest.ancestors {
            let start = ancestor.region.start.max(0) as usize;
            let Ok(end) = usize::try_from(ancestor.region.end) else {
                continue;
            };
            for mutation in start..=end.min(mutation_count.saturating_sub(1)) {
                if !dataset.matrix.is_set(index, mutation) {
                    continue;
                }
                group = group.add(
                    Rectangle::new()
                        .set("x", matrix_left + mutation as f64 * MUTATION_PITCH)
                        .set("y", y)
                        .set("width", MUTATION_PITCH)
                        .set("height", row_height)
                        .set("fill", population_color(&popname)),
                );
            }
        }

        let label = match popname.is_empty() {
            true => haplotype.clone(),
            false => format!("{haplotype} ({popname})"),
        };
        group = group.add(
            Text::new(label)
                .set("x", matrix_left + layout.mutation_width() + 6.0 + label_offset)
                .set("y", y + row_height * 0.8)
                .set("font-size", layout.primary_font_size_px)
                .set("fill", "#202020"),
        );
    }

    group
}
