use crate::dataset::{remote, Dataset, EthnicityIndex, Padding, SessionConfig, Summary};
use relate_phylo::examples;
use std::fs;

fn config(data_url: &str, hapmap_url: &str) -> SessionConfig {
    SessionConfig {
        data_url: data_url.to_string(),
        hapmap_url: hapmap_url.to_string(),
        analysis_id: "example".to_string(),
        padding: Padding::uniform(12.0),
        primary_font_size_px: 12.0,
    }
}

#[test]
fn build_assembles_all_parts() {
    let config = config("data", "hapmap.tsv");
    let dataset = Dataset::build(
        &config,
        examples::HAPLOTYPE_TEXT,
        examples::MUT_TEXT,
        examples::ANC_TEXT,
        examples::HAPMAP_TEXT,
    )
    .unwrap();

    assert_eq!(dataset.haplotype_count(), 4);
    assert_eq!(dataset.mutation_count(), 6);
    assert_eq!(dataset.forest.len(), 2);
    assert_eq!(dataset.matrix.haplotype_count(), 4);
    assert_eq!(dataset.ethnicities.len(), 3);
}

#[test]
fn build_fails_on_a_malformed_tree_file() {
    let config = config("data", "hapmap.tsv");
    let anc = "header\nheader\n0: 2:(0.5 0 0 1) 2:(broken) -1:(0.0 0 0 1)\n";
    let result = Dataset::build(
        &config,
        examples::HAPLOTYPE_TEXT,
        examples::MUT_TEXT,
        anc,
        examples::HAPMAP_TEXT,
    );
    assert!(result.is_err());
}

#[test]
fn unknown_sample_resolves_to_the_sentinel() {
    let index = EthnicityIndex::parse(examples::HAPMAP_TEXT).unwrap();
    let datum = index.sample("HG00004");
    assert_eq!(datum.sampleid, "HG00004");
    assert_eq!(datum.popname, "");
    assert_eq!(datum.gpopname, "");

    // also holds for an index with no rows at all
    let empty = EthnicityIndex::default();
    assert_eq!(empty.sample("does-not-exist").popname, "");
}

#[test]
fn known_sample_projects_its_population() {
    let index = EthnicityIndex::parse(examples::HAPMAP_TEXT).unwrap();
    assert_eq!(index.popname("HG00003"), "YRI");
    assert_eq!(index.sample("HG00001").gpopname, "EUR");
}

#[tokio::test]
async fn load_joins_the_fetches_all_or_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_str().unwrap().to_string();
    let hapmap = dir.path().join("hapmap.tsv");
    fs::write(&hapmap, examples::HAPMAP_TEXT).unwrap();

    let config = config(&data_dir, hapmap.to_str().unwrap());

    // the mutation table is missing: nothing loads
    fs::write(dir.path().join("example.haploidid.fullassembled.BOTH.txt"), examples::HAPLOTYPE_TEXT)
        .unwrap();
    fs::write(dir.path().join("example.anc"), examples::ANC_TEXT).unwrap();
    assert!(Dataset::load(&config).await.is_err());

    // the same config becomes loadable once the file appears
    fs::write(dir.path().join("example.mut"), examples::MUT_TEXT).unwrap();
    let dataset = Dataset::load(&config).await.unwrap();
    assert_eq!(dataset.analysis_id, "example");
    assert_eq!(dataset.mutation_count(), 6);
}

#[tokio::test]
async fn fetch_text_reports_a_missing_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.mut");
    let result = remote::fetch_text(path.to_str().unwrap()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn materialize_writes_the_file_and_its_manifest_record() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.anc");
    fs::write(&source, examples::ANC_TEXT).unwrap();

    let record =
        remote::materialize(source.to_str().unwrap(), dir.path(), "example.anc").await.unwrap();
    assert_eq!(fs::read_to_string(&record.local_path).unwrap(), examples::ANC_TEXT);

    // the manifest record survives a serde round trip
    let json = serde_json::to_string(&record).unwrap();
    let restored: remote::RemoteFile = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, record);
}

#[test]
fn summary_roundtrips_through_json() {
    let config = config("data", "hapmap.tsv");
    let dataset = Dataset::build(
        &config,
        examples::HAPLOTYPE_TEXT,
        examples::MUT_TEXT,
        examples::ANC_TEXT,
        examples::HAPMAP_TEXT,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    dataset.write_summary(&path).unwrap();

    let summary: Summary = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(summary.analysis_id, "example");
    assert_eq!(summary.trees, 2);
    assert_eq!(summary.regions.len(), 2);
    assert_eq!(summary.regions[1].end, 5);
}
