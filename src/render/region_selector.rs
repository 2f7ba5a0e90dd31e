use crate::dataset::Dataset;
use crate::render::layout::{LayoutConfig, MUTATION_PITCH};
use svg::node::element::{Group, Line, Rectangle, Text};

// ----------------------------------------------------------------------------
// Region selector view
// ----------------------------------------------------------------------------

const INDICATOR_HEIGHT: f64 = 8.0;
const INDICATOR_FILL: &str = "#b0c4e8";
const INDICATOR_ACTIVE_FILL: &str = "#1f4fcc";
const LABEL_RISE: f64 = 14.0;

/// Draw one clickable indicator per region plus a diagonal leader line to a
/// rotated label. At most one region is active at a time; the active
/// indicator is emphasized.
///
/// Returns the group and the measured width of the drawn band — the one
/// view-layer output the layout's `stage_width` depends on, so it is only
/// known after this first draw.
pub fn draw(dataset: &Dataset, layout: &LayoutConfig, active: Option<usize>) -> (Group, f64) {
    let mut group = Group::new().set("id", "region-selector");
    let matrix_left = layout.matrix_left();
    let indicator_y = layout.matrix_top() - INDICATOR_HEIGHT - 4.0;
    let mut measured_width = layout.mutation_width();

    for (tree_index, region) in dataset.forest.regions().iter().enumerate() {
        let x0 = matrix_left + region.start as f64 * MUTATION_PITCH;
        let x1 = matrix_left + (region.end + 1) as f64 * MUTATION_PITCH;
        let selected = active == Some(tree_index);

        group = group.add(
            Rectangle::new()
                .set("class", "region-indicator")
                .set("id", format!("region-indicator-{tree_index}"))
                .set("x", x0)
                .set("y", indicator_y)
                .set("width", (x1 - x0).max(1.0))
                .set("height", INDICATOR_HEIGHT)
                .set("fill", match selected {
                    true => INDICATOR_ACTIVE_FILL,
                    false => INDICATOR_FILL,
                })
                .set("stroke", "#606060"),
        );

        // diagonal leader up to the rotated label
        let cx = (x0 + x1) / 2.0;
        let label_x = cx + LABEL_RISE;
        let label_y = indicator_y - LABEL_RISE;
        group = group.add(
            Line::new()
                .set("x1", cx)
                .set("y1", indicator_y)
                .set("x2", label_x)
                .set("y2", label_y)
                .set("stroke", "#a0a0a0"),
        );

        let label = format!("{}-{}", region.start, region.end);
        // rotated labels overhang the band; the measured width covers them
        let overhang =
            label_x + label.len() as f64 * layout.primary_font_size_px * 0.42 - matrix_left;
        measured_width = measured_width.max(overhang);

        group = group.add(
            Text::new(label)
                .set("x", label_x)
                .set("y", label_y)
                .set("font-size", layout.primary_font_size_px * 0.9)
                .set("fill", "#202020")
                .set("transform", format!("rotate(-45 {label_x} {label_y})")),
        );
    }

    (group, measured_width)
}
