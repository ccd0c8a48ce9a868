use std::path::Path;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use cumulo_core::scripting::register_cloud_api;
use cumulo_core::{ApiError, Image, ImageCatalog, ImageUpdate, ImagesService, ListOptions};
use rhai::Engine;

fn snapshot(id: u64) -> Image {
    Image {
        id,
        name: format!("snapshot-{}", id),
        kind: "snapshot".into(),
        distribution: "Ubuntu".into(),
        slug: None,
        public: false,
        regions: vec!["nyc3".into()],
        min_disk_size: 20,
        created_at: Utc.with_ymd_and_hms(2024, 4, 23, 8, 0, 0).unwrap(),
    }
}

fn ids(images: &[Image]) -> Vec<u64> {
    images.iter().map(|img| img.id).collect()
}

#[test]
fn sample_catalog_splits_cleanly_by_origin() {
    let catalog = ImageCatalog::sample();
    let opts = ListOptions::default();

    assert_eq!(catalog.list(&opts).unwrap().items.len(), 5);
    assert_eq!(catalog.list_distribution(&opts).unwrap().items.len(), 2);
    assert_eq!(catalog.list_application(&opts).unwrap().items.len(), 1);
    assert_eq!(catalog.list_user(&opts).unwrap().items.len(), 2);
}

#[test]
fn listing_paginates_honestly() {
    let catalog = ImageCatalog::new((1..=5).map(snapshot).collect());

    let first = catalog.list(&ListOptions { page: 1, per_page: 2 }).unwrap();
    assert_eq!(ids(&first.items), [1, 2]);
    assert!(first.has_more);

    let second = catalog.list(&ListOptions { page: 2, per_page: 2 }).unwrap();
    assert_eq!(ids(&second.items), [3, 4]);
    assert!(second.has_more);

    let third = catalog.list(&ListOptions { page: 3, per_page: 2 }).unwrap();
    assert_eq!(ids(&third.items), [5]);
    assert!(!third.has_more);

    let past_the_end = catalog.list(&ListOptions { page: 4, per_page: 2 }).unwrap();
    assert!(past_the_end.items.is_empty());
    assert!(!past_the_end.has_more);
}

#[test]
fn lookups_find_images_by_id_and_slug() {
    let catalog = ImageCatalog::sample();

    assert_eq!(catalog.get_by_id(6_918_990).unwrap().name, "24.04 (LTS) x64");
    assert_eq!(catalog.get_by_slug("debian-12-x64").unwrap().id, 6_372_321);

    let err = catalog.get_by_id(1).unwrap_err();
    assert_eq!(err.to_string(), "image not found: 1");
    let err = catalog.get_by_slug("no-such-slug").unwrap_err();
    assert_eq!(err.to_string(), "image not found: no-such-slug");
}

#[test]
fn update_persists_the_new_name() {
    let catalog = ImageCatalog::sample();

    let updated = catalog
        .update(22_662_611, &ImageUpdate { name: "web-02".into() })
        .unwrap();

    assert_eq!(updated.name, "web-02");
    assert_eq!(catalog.get_by_id(22_662_611).unwrap().name, "web-02");
}

#[test]
fn update_rejects_an_empty_name() {
    let catalog = ImageCatalog::sample();

    let err = catalog.update(22_662_611, &ImageUpdate::default()).unwrap_err();

    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert_eq!(err.to_string(), "invalid request: image name cannot be empty");
    // Nothing was touched.
    assert_eq!(catalog.get_by_id(22_662_611).unwrap().name, "web-01 2024-04-22");
}

#[test]
fn delete_removes_the_image_for_good() {
    let catalog = ImageCatalog::sample();

    catalog.delete(22_662_612).unwrap();

    assert_eq!(catalog.len(), 4);
    assert!(catalog.get_by_id(22_662_612).is_err());
    let err = catalog.delete(22_662_612).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn loads_a_catalog_from_a_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("images.json");
    std::fs::write(
        &path,
        r#"[
            {
                "id": 1,
                "name": "golden-build",
                "type": "snapshot",
                "distribution": "Debian",
                "slug": null,
                "public": false,
                "regions": ["fra1"],
                "min_disk_size": 10,
                "created_at": "2024-04-23T08:00:00Z"
            }
        ]"#,
    )
    .unwrap();

    let catalog = ImageCatalog::from_json_file(&path).unwrap();

    assert_eq!(catalog.len(), 1);
    let image = catalog.get_by_id(1).unwrap();
    assert_eq!(image.name, "golden-build");
    assert_eq!(image.kind, "snapshot");
    assert_eq!(image.created_at, Utc.with_ymd_and_hms(2024, 4, 23, 8, 0, 0).unwrap());
}

#[test]
fn loading_a_missing_file_names_the_path() {
    let err = ImageCatalog::from_json_file(Path::new("no/such/images.json")).unwrap_err();

    assert!(
        err.to_string().contains("no/such/images.json"),
        "unexpected error: {:#}",
        err
    );
}

#[test]
fn scripted_session_runs_against_the_sample_catalog() {
    let mut engine = Engine::new();
    register_cloud_api(&mut engine, Arc::new(ImageCatalog::sample()));

    let names = engine
        .eval::<rhai::Array>(
            r#"
            // 1. Rename the web snapshot
            images::update(#{ id: 22662611, name: "web-01 golden" });

            // 2. Retire the old database snapshot
            images::delete(22662612);

            // 3. What is left for this account?
            images::list_user().map(|img| img.name)
        "#,
        )
        .expect("script should succeed");

    let names: Vec<String> = names
        .into_iter()
        .map(|name| name.into_string().unwrap())
        .collect();
    assert_eq!(names, ["web-01 golden"]);
}
