use super::*;

fn temp_png(name: &str, width: u32, height: u32) -> PathBuf {
    let path = std::env::temp_dir().join(format!("goldmeter-{}-{name}.png", std::process::id()));
    image::RgbImage::new(width, height).save(&path).unwrap();
    path
}

#[test]
fn load_reads_header_dimensions() {
    let path = temp_png("header", 8, 5);
    let mut store = RasterStore::new();
    let raster = store.load(&path).unwrap();
    assert_eq!((raster.width, raster.height), (8.0, 5.0));
    assert_eq!(raster.origin, RasterOrigin::File(path.clone()));
    assert_eq!(store.get(raster.handle), Some(&raster));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn load_missing_file_is_decode_error() {
    let mut store = RasterStore::new();
    let path = std::env::temp_dir().join("goldmeter-definitely-missing.png");
    let err = store.load(&path).unwrap_err();
    assert!(err.to_string().contains("goldmeter-definitely-missing.png"));
    assert!(store.get(RasterHandle(1)).is_none());
}

#[test]
fn handles_are_unique_and_increasing() {
    let mut store = RasterStore::new();
    let a = store.synthetic(800.0, 600.0);
    let b = store.synthetic(640.0, 480.0);
    assert_ne!(a.handle, b.handle);
    assert!(b.handle.0 > a.handle.0);
    assert_eq!(store.get(a.handle).map(|r| &r.origin), Some(&RasterOrigin::Synthetic));
}

#[test]
fn unknown_handle_is_none() {
    let store = RasterStore::new();
    assert!(store.get(RasterHandle(42)).is_none());
}

#[test]
fn retain_only_keeps_the_current_raster() {
    let mut store = RasterStore::new();
    let old = store.synthetic(800.0, 600.0);
    let current = store.synthetic(640.0, 480.0);
    store.retain_only(Some(current.handle));
    assert!(store.get(old.handle).is_none());
    assert_eq!(store.get(current.handle), Some(&current));

    store.retain_only(None);
    assert!(store.get(current.handle).is_none());
}
