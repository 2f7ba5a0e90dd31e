use crate::dataset::{Dataset, Padding, SessionConfig};
use crate::render::{dendrogram, Stage, ViewEvent};
use relate_phylo::examples;

fn config() -> SessionConfig {
    SessionConfig {
        data_url: "data".to_string(),
        hapmap_url: "hapmap.tsv".to_string(),
        analysis_id: "example".to_string(),
        padding: Padding::uniform(12.0),
        primary_font_size_px: 12.0,
    }
}

fn dataset() -> Dataset {
    Dataset::build(
        &config(),
        examples::HAPLOTYPE_TEXT,
        examples::MUT_TEXT,
        examples::ANC_TEXT,
        examples::HAPMAP_TEXT,
    )
    .unwrap()
}

fn select(indexes: &[usize], shift_key: bool) -> ViewEvent {
    ViewEvent::SelectHaplotype { indexes: indexes.to_vec(), shift_key }
}

#[test]
fn plain_click_replaces_and_shift_click_unions() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);

    stage.handle(select(&[2], false));
    assert_eq!(stage.selection().iter().copied().collect::<Vec<_>>(), vec![2]);

    stage.handle(select(&[4], true));
    assert_eq!(stage.selection().iter().copied().collect::<Vec<_>>(), vec![2, 4]);

    stage.handle(select(&[0], false));
    assert_eq!(stage.selection().iter().copied().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn background_click_clears_the_whole_selection() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);

    stage.handle(select(&[1], false));
    stage.handle(select(&[3], true));
    stage.handle(ViewEvent::ClearSelection);
    assert!(stage.selection().is_empty());
}

#[test]
fn region_toggle_is_idempotent() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);

    stage.handle(ViewEvent::ToggleRegion { tree_index: 0 });
    assert_eq!(stage.active_region(), Some(0));
    let open = stage.render().to_string();
    assert_eq!(open.matches("id=\"dendrogram\"").count(), 1);

    stage.handle(ViewEvent::ToggleRegion { tree_index: 0 });
    assert_eq!(stage.active_region(), None);
    let closed = stage.render().to_string();
    assert_eq!(closed.matches("id=\"dendrogram\"").count(), 0);
}

#[test]
fn region_replacement_leaves_exactly_one_dendrogram() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);

    stage.handle(ViewEvent::ToggleRegion { tree_index: 0 });
    stage.handle(ViewEvent::ToggleRegion { tree_index: 1 });
    assert_eq!(stage.active_region(), Some(1));

    let document = stage.render().to_string();
    assert_eq!(document.matches("id=\"dendrogram\"").count(), 1);
    // tree 1 has three mutations but one is excluded from placement
    assert_eq!(document.matches("<circle").count(), 2);
}

#[test]
fn selector_width_is_measured_on_the_first_draw() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);

    assert!(stage.measured_selector_width().is_none());
    stage.render();
    assert!(stage.measured_selector_width().unwrap_or(0.0) > 0.0);
}

#[test]
fn events_invalidate_only_the_views_they_affect() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);
    stage.render();
    assert!(stage.selector_group.is_some());
    assert!(stage.haplotype_group.is_some());

    // selecting rows touches the matrix view only
    stage.handle(select(&[1], false));
    assert!(stage.haplotype_group.is_none());
    assert!(stage.selector_group.is_some());

    // toggling a region touches the selector and the dendrogram, and marks
    // the labels for one coalesced reposition pass
    stage.handle(ViewEvent::ToggleRegion { tree_index: 1 });
    stage.handle(ViewEvent::ToggleRegion { tree_index: 0 });
    assert!(stage.selector_group.is_none());
    assert!(stage.labels_dirty);
    stage.render();
    assert!(!stage.labels_dirty);
}

#[test]
fn hover_shows_and_hides_the_tooltip() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);

    stage.handle(ViewEvent::HoverCell { haplotype: 0, mutation: 0 });
    assert!(stage.render().to_string().contains("rs111"));

    stage.handle(ViewEvent::HoverEnd);
    assert!(!stage.render().to_string().contains("rs111"));
}

#[test]
fn hover_outside_the_dataset_hides_the_tooltip() {
    let config = config();
    let dataset = dataset();
    let mut stage = Stage::new(&config, &dataset);

    stage.handle(ViewEvent::HoverCell { haplotype: 0, mutation: 0 });
    stage.handle(ViewEvent::HoverCell { haplotype: 99, mutation: 0 });
    assert!(!stage.render().to_string().contains("rs111"));
}

#[test]
fn dendrogram_for_an_unknown_tree_is_empty() {
    let config = config();
    let dataset = dataset();
    let stage = Stage::new(&config, &dataset);
    let group = dendrogram::draw(&dataset, stage.layout(), 9, 0.0);
    assert!(!group.to_string().contains("<line"));
}

#[test]
fn nice_step_guards_degenerate_ranges() {
    assert!(dendrogram::nice_step(0.0, 5) > 0.0);
    assert!(dendrogram::nice_step(-3.0, 5) > 0.0);
    assert!(dendrogram::nice_step(f64::NAN, 5) > 0.0);
    assert_eq!(dendrogram::nice_step(10.0, 5), 2.0);
    assert!((dendrogram::nice_step(1.0, 5) - 0.2).abs() < 1e-9);
}
