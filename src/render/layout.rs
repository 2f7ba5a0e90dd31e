use crate::dataset::{Dataset, Padding, SessionConfig};

// ----------------------------------------------------------------------------
// Layout
// ----------------------------------------------------------------------------

/// Vertical gap between haplotype rows.
pub const ROW_GAP: f64 = 4.0;
/// Horizontal pixels per mutation column.
pub const MUTATION_PITCH: f64 = 1.5;
/// Gap between the matrix and the dendrogram panel.
pub const PANEL_GAP: f64 = 16.0;

const MIN_ROW_HEIGHT: f64 = 8.0;

/// Derived pixel geometry consumed by every view.
///
/// Nothing is cached: each value recomputes from the held counts, so the
/// layout always agrees with the loaded dataset at the cost of repeated
/// arithmetic on draw-time-only call sites.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    pub padding: Padding,
    pub primary_font_size_px: f64,
    pub haplotype_count: usize,
    pub mutation_count: usize,
}

impl LayoutConfig {
    pub fn new(config: &SessionConfig, dataset: &Dataset) -> Self {
        LayoutConfig {
            padding: config.padding,
            primary_font_size_px: config.primary_font_size_px,
            haplotype_count: dataset.haplotype_count(),
            mutation_count: dataset.mutation_count(),
        }
    }

    /// Height of one haplotype track, floored at 8px.
    pub fn haplotype_view_width(&self) -> f64 {
        self.primary_font_size_px.max(MIN_ROW_HEIGHT)
    }

    /// Total width of the mutation axis at the fixed per-mutation pitch.
    pub fn mutation_width(&self) -> f64 {
        MUTATION_PITCH * self.mutation_count as f64
    }

    /// Height of the haplotype track block.
    pub fn inner_height(&self) -> f64 {
        let rows = self.haplotype_count as f64;
        self.haplotype_view_width() * rows + ROW_GAP * (rows - 1.0).max(0.0)
    }

    /// Width reserved for the per-row checkbox controls.
    pub fn checkbox_column(&self) -> f64 {
        self.haplotype_view_width() + 8.0
    }

    /// Left edge of the matrix cells.
    pub fn matrix_left(&self) -> f64 {
        self.padding.left + self.checkbox_column()
    }

    /// Height of the region-selector band above the matrix.
    pub fn selector_band_height(&self) -> f64 {
        self.primary_font_size_px * 4.0
    }

    /// Top edge of the haplotype tracks.
    pub fn matrix_top(&self) -> f64 {
        self.padding.top + self.selector_band_height()
    }

    /// Vertical position of one haplotype row.
    pub fn row_y(&self, index: usize) -> f64 {
        self.matrix_top() + index as f64 * (self.haplotype_view_width() + ROW_GAP)
    }

    /// Width of the dendrogram cluster panel.
    pub fn cluster_width(&self) -> f64 {
        self.mutation_width().max(160.0)
    }

    /// Width reserved for row labels right of the matrix.
    pub fn label_column(&self) -> f64 {
        self.primary_font_size_px * 10.0
    }

    /// Full stage width. Only valid once the region selector has completed
    /// its first draw and reported its measured width; the stage records that
    /// measurement and feeds it back in here.
    pub fn stage_width(&self, region_selector_width: f64) -> f64 {
        self.padding.left
            + self.checkbox_column()
            + self.mutation_width().max(region_selector_width)
            + self.label_column()
            + self.padding.right
    }

    pub fn stage_height(&self) -> f64 {
        self.matrix_top() + self.inner_height() + self.padding.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::LayoutConfig;
    use crate::dataset::Padding;

    fn layout(font: f64, haplotypes: usize, mutations: usize) -> LayoutConfig {
        LayoutConfig {
            padding: Padding::uniform(10.0),
            primary_font_size_px: font,
            haplotype_count: haplotypes,
            mutation_count: mutations,
        }
    }

    #[test]
    fn row_height_is_floored_at_eight_pixels() {
        assert_eq!(layout(6.0, 1, 1).haplotype_view_width(), 8.0);
        assert_eq!(layout(14.0, 1, 1).haplotype_view_width(), 14.0);
    }

    #[test]
    fn mutation_axis_uses_a_fixed_pitch() {
        assert_eq!(layout(12.0, 1, 200).mutation_width(), 300.0);
    }

    #[test]
    fn inner_height_counts_gaps_between_rows() {
        let layout = layout(10.0, 4, 1);
        assert_eq!(layout.inner_height(), 10.0 * 4.0 + 4.0 * 3.0);
    }

    #[test]
    fn single_row_has_no_gap() {
        assert_eq!(layout(10.0, 1, 1).inner_height(), 10.0);
    }

    #[test]
    fn stage_width_grows_with_the_measured_selector() {
        let layout = layout(12.0, 2, 10);
        assert!(layout.stage_width(400.0) > layout.stage_width(0.0));
    }
}
