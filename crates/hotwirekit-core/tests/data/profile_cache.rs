use hotwirekit_core::{
    CachedProfileSource, DirectoryProfileCache, DirectoryProfileSource, ProfileCache,
    ProfileSource, ProfileSourceError,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const PLATE: &str = "plate\n1.0 0.01\n0.0 0.0\n1.0 -0.01\n";

#[test]
fn test_directory_source_finds_dat_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plate.dat"), PLATE).unwrap();
    fs::write(dir.path().join("raw"), PLATE).unwrap();

    let source = DirectoryProfileSource::new(dir.path());
    assert_eq!(&*source.resolve("plate").unwrap(), PLATE);
    assert_eq!(&*source.resolve("raw").unwrap(), PLATE);
    assert!(matches!(
        source.resolve("nothing"),
        Err(ProfileSourceError::NotFound { .. })
    ));
}

#[test]
fn test_directory_cache_persists_entries() {
    let dir = TempDir::new().unwrap();
    let cache = DirectoryProfileCache::open(dir.path().join("profiles")).unwrap();
    cache.put("naca 0012", Arc::from(PLATE)).unwrap();
    cache.put("clarky", Arc::from(PLATE)).unwrap();

    let reopened = DirectoryProfileCache::open(dir.path().join("profiles")).unwrap();
    assert_eq!(reopened.get("naca 0012").as_deref(), Some(PLATE));
    assert_eq!(reopened.keys(), vec!["clarky".to_string(), "naca 0012".to_string()]);
}

#[test]
fn test_directory_cache_keeps_similar_keys_apart() {
    let dir = TempDir::new().unwrap();
    let cache = DirectoryProfileCache::open(dir.path()).unwrap();
    cache.put("naca 2412", Arc::from("A")).unwrap();
    cache.put("naca_2412", Arc::from("B")).unwrap();
    cache.put("naca.2412", Arc::from("C")).unwrap();

    assert_eq!(cache.get("naca 2412").as_deref(), Some("A"));
    assert_eq!(cache.get("naca_2412").as_deref(), Some("B"));
    assert_eq!(cache.get("naca.2412").as_deref(), Some("C"));
    assert_eq!(
        cache.keys(),
        vec![
            "naca 2412".to_string(),
            "naca.2412".to_string(),
            "naca_2412".to_string()
        ]
    );

    // files the cache did not write are not reported as keys
    fs::write(dir.path().join("stray file.dat"), "x").unwrap();
    assert_eq!(cache.keys().len(), 3);
}

#[test]
fn test_cached_directory_source_end_to_end() {
    let profiles = TempDir::new().unwrap();
    let cache_dir = TempDir::new().unwrap();
    fs::write(profiles.path().join("plate.dat"), PLATE).unwrap();

    let cached = CachedProfileSource::new(
        DirectoryProfileSource::new(profiles.path()),
        DirectoryProfileCache::open(cache_dir.path()).unwrap(),
    );
    let profile = cached.load_profile("plate").unwrap();
    assert_eq!(profile.name(), "plate");

    // the cache now answers even if the source disappears
    fs::remove_file(profiles.path().join("plate.dat")).unwrap();
    assert!(cached.load_profile("plate").is_ok());
    assert_eq!(cached.cache().keys(), vec!["plate".to_string()]);
}

#[test]
fn test_invalid_text_reports_identifier() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.dat"), "bad\n1 0\nnot numbers\n").unwrap();
    let source = DirectoryProfileSource::new(dir.path());
    match source.load_profile("bad") {
        Err(ProfileSourceError::Parse { identifier, .. }) => assert_eq!(identifier, "bad"),
        other => panic!("unexpected result: {:?}", other.map(|p| p.name().to_string())),
    }
}
