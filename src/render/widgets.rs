use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Rectangle, Text};

// ----------------------------------------------------------------------------
// Tooltip
// ----------------------------------------------------------------------------

/// Hover readout. Presentation only: show/hide is its entire state machine.
#[derive(Clone, Debug, Default)]
pub struct Tooltip {
    content: Option<(String, f64, f64)>,
}

impl Tooltip {
    pub fn show(&mut self, text: impl Into<String>, x: f64, y: f64) {
        self.content = Some((text.into(), x, y));
    }

    pub fn hide(&mut self) {
        self.content = None;
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn draw(&self) -> Group {
        let mut group = Group::new().set("id", "tooltip");
        if let Some((text, x, y)) = &self.content {
            let width = text.len() as f64 * 6.5 + 12.0;
            group = group
                .add(
                    Rectangle::new()
                        .set("x", x - 6.0)
                        .set("y", y - 16.0)
                        .set("width", width)
                        .set("height", 18.0)
                        .set("fill", "#f5f5f5")
                        .set("stroke", "#c0c0c0")
                        .set("rx", 2.0),
                )
                .add(
                    Text::new(text.clone())
                        .set("x", *x)
                        .set("y", y - 3.0)
                        .set("font-size", 11.0)
                        .set("fill", "#202020"),
                );
        }
        group
    }
}

// ----------------------------------------------------------------------------
// Checkbox
// ----------------------------------------------------------------------------

pub const CHECKBOX_SIZE: f64 = 10.0;

/// One per-row checkbox control; checked state mirrors the row's selection.
pub fn checkbox(x: f64, y: f64, checked: bool) -> Group {
    let mut group = Group::new().set("class", "checkbox").add(
        Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", CHECKBOX_SIZE)
            .set("height", CHECKBOX_SIZE)
            .set("fill", "#ffffff")
            .set("stroke", "#606060")
            .set("rx", 1.5),
    );
    if checked {
        let tick = Data::new()
            .move_to((x + 2.0, y + 5.0))
            .line_to((x + 4.0, y + 8.0))
            .line_to((x + 8.0, y + 2.0));
        group = group.add(
            Path::new()
                .set("d", tick)
                .set("fill", "none")
                .set("stroke", "#238023")
                .set("stroke-width", 1.6),
        );
    }
    group
}
