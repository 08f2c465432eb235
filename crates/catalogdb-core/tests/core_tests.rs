use catalogdb_core::config::{chunk_len, Config, IngestConfig, SearchConfig, Settings};
use catalogdb_core::generate::generate_catalog;
use catalogdb_core::{CatalogStore, Chunk, Error, Record};

fn records(n: u64) -> Vec<Record> {
    (1..=n).map(|id| Record::new(id, format!("item {id}"), "misc")).collect()
}

#[test]
fn store_accepts_dense_ids_and_looks_up_by_id() {
    let store = CatalogStore::new(records(5)).expect("store");
    assert_eq!(store.len(), 5);
    assert_eq!(store.get(1).map(|r| r.id), Some(1));
    assert_eq!(store.get(5).map(|r| r.id), Some(5));
    assert!(store.get(0).is_none(), "ids are 1-based");
    assert!(store.get(6).is_none());
    assert!(store.get(u64::MAX).is_none());
}

#[test]
fn store_rejects_gaps_and_misordering() {
    let mut gap = records(3);
    gap[2].id = 4;
    assert!(matches!(CatalogStore::new(gap), Err(Error::InvalidCatalog(_))));

    let mut swapped = records(3);
    swapped.swap(0, 1);
    assert!(matches!(CatalogStore::new(swapped), Err(Error::InvalidCatalog(_))));

    assert!(CatalogStore::new(Vec::new()).expect("empty store").is_empty());
}

#[test]
fn store_resolves_keys_and_slices_chunks() {
    let store = CatalogStore::new(records(10)).expect("store");
    assert_eq!(store.resolve_key("7").map(|r| r.id), Some(7));
    assert!(store.resolve_key("abc").is_none());
    assert!(store.resolve_key("-1").is_none());
    assert!(store.resolve_key("0").is_none());
    assert!(store.resolve_key("11").is_none());

    let ids: Vec<u64> = store.slice(Chunk::new(2, 5)).iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);
    assert_eq!(store.slice(Chunk::new(8, 20)).len(), 2, "clamped to store end");
}

#[test]
fn record_key_is_decimal_id() {
    let r = Record::new(42, "Sony Desk Lamp – Red", "Home & Kitchen");
    assert_eq!(r.key(), "42");
    let json = serde_json::to_value(&r).expect("json");
    assert_eq!(json["id"], 42);
    assert_eq!(json["category"], "Home & Kitchen");
}

#[test]
fn settings_defaults_match_service_constants() {
    let settings = Config::from_toml_str("").settings().expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.ingest.batch_size, 50_000);
    assert_eq!(settings.ingest.num_workers, 12);
    assert_eq!(settings.ingest.queue_buffer, 100);
    assert_eq!(settings.search.fuzziness, 2);
    assert_eq!(settings.search.page_size, 50);
    assert!(settings.engine.index_dir.is_none());
}

#[test]
fn settings_overrides_from_toml() {
    let cfg = Config::from_toml_str(
        r#"
        [ingest]
        num_workers = 4
        [engine]
        index_dir = "/tmp/catalog-index"
        "#,
    );
    let settings = cfg.settings().expect("settings");
    assert_eq!(settings.ingest.num_workers, 4);
    assert_eq!(settings.ingest.batch_size, 50_000, "untouched keys keep defaults");
    assert_eq!(settings.engine.index_path().expect("path").to_string_lossy(), "/tmp/catalog-index");
    let workers: usize = cfg.get("ingest.num_workers").expect("get");
    assert_eq!(workers, 4);
}

#[test]
fn settings_validation_rejects_degenerate_values() {
    assert!(Config::from_toml_str("[ingest]\nnum_workers = 0").settings().is_err());
    assert!(Config::from_toml_str("[ingest]\nqueue_buffer = 0").settings().is_err());
    assert!(Config::from_toml_str("[search]\nfuzziness = 3").settings().is_err());
    assert!(Config::from_toml_str("[search]\npage_size = 0").settings().is_err());

    let tiny = IngestConfig { batch_size: 3, num_workers: 4, queue_buffer: 1 };
    assert!(matches!(tiny.chunk_len(), Err(Error::InvalidConfig(_))));
    assert_eq!(IngestConfig::default().chunk_len().expect("len"), 4166);
    assert!(SearchConfig::default().validate().is_ok());
}

#[test]
fn chunk_len_depends_only_on_batch_size_and_workers() {
    assert_eq!(chunk_len(50_000, 12).expect("len"), 4166);
    assert_eq!(chunk_len(7, 7).expect("len"), 1);
    assert!(matches!(chunk_len(6, 7), Err(Error::InvalidConfig(_))));
    assert!(matches!(chunk_len(100, 0), Err(Error::InvalidConfig(_))));
    for queue_buffer in [0, 1, 100] {
        let config = IngestConfig { batch_size: 90, num_workers: 4, queue_buffer };
        assert_eq!(config.chunk_len().expect("len"), chunk_len(90, 4).expect("len"));
    }
}

#[test]
fn reversed_chunk_covers_nothing() {
    let reversed = Chunk { start: 9, end: 4 };
    assert_eq!(reversed.len(), 0);
    assert!(reversed.is_empty());
    assert_eq!(reversed.range().count(), 0);
    assert_eq!(Chunk::new(4, 9).len(), 5);
    assert_eq!(Chunk::new(4, 4).range().count(), 0);
}

#[test]
fn generated_catalog_is_dense_and_seed_deterministic() {
    let a = generate_catalog(200, Some(7));
    let b = generate_catalog(200, Some(7));
    assert_eq!(a, b);
    let store = CatalogStore::new(a).expect("generated ids are dense");
    assert_eq!(store.len(), 200);
    for r in store.iter() {
        assert!(!r.name.is_empty());
        assert!(!r.category.is_empty());
    }
}
