use crate::dataset::{Dataset, SessionConfig};
use crate::render::layout::{LayoutConfig, MUTATION_PITCH, PANEL_GAP};
use crate::render::widgets::Tooltip;
use crate::render::{dendrogram, haplotype_view, region_selector, ViewEvent};
use log::debug;
use std::collections::BTreeSet;
use svg::Document;

// ----------------------------------------------------------------------------
// Stage
// ----------------------------------------------------------------------------

/// Top-level view container.
///
/// The stage owns the layout, the shared selection state and the three
/// sub-view groups, and applies the two selection policies: a bare click on
/// the background deselects every haplotype, and a haplotype selection with
/// the shift modifier *unions* into the current selection where a plain one
/// *replaces* it. Region toggling follows its own two-state machine: clicking
/// the active region deactivates it, clicking another region replaces it
/// directly.
///
/// Rendering is targeted: [`Stage::handle`] drops only the cached groups the
/// event affects, and [`Stage::render`] redraws exactly those. Label
/// repositioning is coalesced — any number of invalidations collapse into one
/// reposition pass on the next render.
pub struct Stage<'data> {
    dataset: &'data Dataset,
    layout: LayoutConfig,
    tooltip: Tooltip,
    pub(crate) selection: BTreeSet<usize>,
    pub(crate) active_region: Option<usize>,
    pub(crate) labels_dirty: bool,
    pub(crate) selector_width: Option<f64>,
    pub(crate) selector_group: Option<svg::node::element::Group>,
    pub(crate) haplotype_group: Option<svg::node::element::Group>,
    pub(crate) dendrogram_group: Option<svg::node::element::Group>,
}

impl<'data> Stage<'data> {
    pub fn new(config: &SessionConfig, dataset: &'data Dataset) -> Self {
        Stage {
            dataset,
            layout: LayoutConfig::new(config, dataset),
            tooltip: Tooltip::default(),
            selection: BTreeSet::new(),
            active_region: None,
            labels_dirty: false,
            selector_width: None,
            selector_group: None,
            haplotype_group: None,
            dendrogram_group: None,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    pub fn active_region(&self) -> Option<usize> {
        self.active_region
    }

    /// The region selector's measured width; [`None`] until its first draw.
    pub fn measured_selector_width(&self) -> Option<f64> {
        self.selector_width
    }

    /// Apply one interaction event, invalidating only the views it affects.
    pub fn handle(&mut self, event: ViewEvent) {
        debug!("Stage event: {event:?}");
        match event {
            ViewEvent::SelectHaplotype { indexes, shift_key } => {
                match shift_key {
                    // shift unions into the current selection
                    true => self.selection.extend(indexes),
                    // a plain click replaces it
                    false => self.selection = indexes.into_iter().collect(),
                }
                self.haplotype_group = None;
            }
            ViewEvent::ClearSelection => {
                self.selection.clear();
                self.haplotype_group = None;
            }
            ViewEvent::ToggleRegion { tree_index } => {
                self.active_region = match self.active_region {
                    // clicking the active region toggles back to none
                    Some(active) if active == tree_index => None,
                    // any other click replaces directly, no intermediate clear
                    _ => Some(tree_index),
                };
                self.selector_group = None;
                self.dendrogram_group = None;
                // row labels move when the dendrogram panel opens or closes
                self.labels_dirty = true;
            }
            ViewEvent::HoverCell { haplotype, mutation } => {
                match (self.dataset.haplotypes.get(haplotype), self.dataset.mutations.get(mutation))
                {
                    (Some(id), Some(record)) => {
                        let x = self.layout.matrix_left() + mutation as f64 * MUTATION_PITCH;
                        let y = self.layout.row_y(haplotype);
                        self.tooltip.show(format!("{id} {}", record.rs_id), x, y);
                    }
                    _ => self.tooltip.hide(),
                }
            }
            ViewEvent::HoverEnd => self.tooltip.hide(),
        }
    }

    /// Compose the full SVG document, redrawing only the views invalidated
    /// since the last render.
    pub fn render(&mut self) -> Document {
        // coalesced reposition: however many events marked the labels dirty,
        // exactly one relayout happens here
        if self.labels_dirty {
            self.haplotype_group = None;
            self.labels_dirty = false;
        }

        // the selector draws first; the stage width depends on its measured
        // extent, so it must complete before the document is sized
        if self.selector_group.is_none() {
            let (group, width) = region_selector::draw(self.dataset, &self.layout, self.active_region);
            self.selector_width = Some(width);
            self.selector_group = Some(group);
        }

        let panel_open = self.active_region.is_some();
        let panel_width = match panel_open {
            true => PANEL_GAP + self.layout.cluster_width(),
            false => 0.0,
        };

        if self.haplotype_group.is_none() {
            self.haplotype_group = Some(haplotype_view::draw(
                self.dataset,
                &self.layout,
                &self.selection,
                panel_width,
            ));
        }

        // the dendrogram draws last, after the matrix and selector geometry
        // it depends on is in place
        if self.dendrogram_group.is_none() {
            if let Some(tree_index) = self.active_region {
                let origin_x =
                    self.layout.matrix_left() + self.layout.mutation_width() + PANEL_GAP;
                self.dendrogram_group =
                    Some(dendrogram::draw(self.dataset, &self.layout, tree_index, origin_x));
            }
        }

        let selector_width = self.selector_width.unwrap_or(0.0);
        let width = self.layout.stage_width(selector_width) + panel_width;
        let height = self.layout.stage_height() + self.layout.primary_font_size_px * 2.0;

        let mut document = Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height)
            .set("font-family", "sans-serif");

        if let Some(group) = &self.selector_group {
            document = document.add(group.clone());
        }
        if let Some(group) = &self.haplotype_group {
            document = document.add(group.clone());
        }
        if let Some(group) = &self.dendrogram_group {
            document = document.add(group.clone());
        }
        document.add(self.tooltip.draw())
    }
}
