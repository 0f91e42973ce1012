//! Edge case tests for fos-sprite
//!
//! Image construction, tile slicing and drawing through the software backend.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use fos_sprite::*;
use tiny_skia::Pixmap;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Each pixel encodes its own position: r = x, g = y
fn coordinate_bitmap(width: u32, height: u32) -> Bitmap {
    let mut bmp = Bitmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            bmp.set_pixel(x, y, Color::rgb(x as u8, y as u8, 7));
        }
    }
    bmp
}

/// Write `bitmap` as a PNG fixture in the temp directory
fn write_png(name: &str, bitmap: &Bitmap) -> PathBuf {
    let path = std::env::temp_dir().join(format!("fos-sprite-{}-{}", std::process::id(), name));
    let file = File::create(&path).unwrap();

    let mut encoder = png::Encoder::new(BufWriter::new(file), bitmap.width(), bitmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&bitmap.to_rgba()).unwrap();
    writer.finish().unwrap();

    path
}

fn corners(call: &DrawCall) -> [(f64, f64); 4] {
    call.quad.corners.map(|v| (v.x, v.y))
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_region_sizes_are_reported() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(32, 24);

    for region in [
        Region::new(0, 0, 32, 24),
        Region::new(5, 3, 1, 1),
        Region::new(31, 23, 1, 1),
        Region::new(8, 0, 16, 24),
    ] {
        let image = Image::from_bitmap_region(&backend, &bmp, region, ImageFlags::SMOOTH).unwrap();
        assert_eq!((image.width(), image.height()), (region.width, region.height));
        assert_eq!(image.to_bitmap(), bmp.region(region).unwrap());
    }

    // translucent pixels survive the backend untouched
    let mut faded = bmp.clone();
    faded.set_pixel(5, 3, Color::rgba(200, 100, 50, 1));
    faded.set_pixel(6, 3, Color::rgba(123, 45, 67, 77));
    let region = Region::new(4, 2, 4, 3);
    let image = Image::from_bitmap_region(&backend, &faded, region, ImageFlags::SMOOTH).unwrap();
    assert_eq!(image.to_bitmap(), faded.region(region).unwrap());
    assert_eq!(image.to_bitmap().get_pixel(1, 1), Some(Color::rgba(200, 100, 50, 1)));
}

#[test]
fn test_full_bitmap_default() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(12, 5);
    let image = Image::from_bitmap(&backend, &bmp, ImageFlags::TILEABLE).unwrap();
    assert_eq!((image.width(), image.height()), (12, 5));
}

#[test]
fn test_region_outside_bitmap_fails() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(8, 8);
    let err = Image::from_bitmap_region(&backend, &bmp, Region::new(4, 4, 5, 4), ImageFlags::SMOOTH)
        .unwrap_err();
    assert!(matches!(err, SpriteError::RegionOutOfBounds { .. }));
}

#[test]
fn test_missing_backend_fails() {
    let err = Image::try_from(None::<Box<dyn ImageData>>).unwrap_err();
    assert!(matches!(err, SpriteError::InvalidArgument(_)));
    assert!(err.to_string().starts_with("Invalid argument"));
}

#[test]
fn test_from_file_and_region() {
    init_logging();
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(20, 10);
    let path = write_png("from-file.png", &bmp);

    let whole = Image::from_file(&backend, &path, ImageFlags::SMOOTH).unwrap();
    assert_eq!(whole.to_bitmap(), bmp);

    let region = Region::new(2, 3, 6, 4);
    let part = Image::from_file_region(&backend, &path, region, ImageFlags::SMOOTH).unwrap();
    assert_eq!(part.to_bitmap(), bmp.region(region).unwrap());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_file_propagates_io_error() {
    let backend = SoftwareBackend::default();
    let path = std::env::temp_dir().join("fos-sprite-no-such-file.png");

    let err = Image::from_file(&backend, &path, ImageFlags::SMOOTH).unwrap_err();
    assert!(matches!(err, SpriteError::Image(::image::ImageError::IoError(_))));
}

#[test]
fn test_corrupt_file_propagates_decode_error() {
    let backend = SoftwareBackend::default();
    let path = std::env::temp_dir().join(format!("fos-sprite-{}-corrupt.png", std::process::id()));
    std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a real png").unwrap();

    let err = Image::from_file(&backend, &path, ImageFlags::SMOOTH).unwrap_err();
    assert!(matches!(err, SpriteError::Image(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
#[allow(deprecated)]
fn test_deprecated_constructors_match() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(16, 16);
    let region = Region::new(4, 4, 8, 8);

    for tileable in [false, true] {
        let flags = ImageFlags::from(tileable);

        let old = Image::from_bitmap_tileable(&backend, &bmp, tileable).unwrap();
        let new = Image::from_bitmap(&backend, &bmp, flags).unwrap();
        assert_eq!(old.to_bitmap(), new.to_bitmap());

        let old = Image::from_bitmap_region_tileable(&backend, &bmp, region, tileable).unwrap();
        let new = Image::from_bitmap_region(&backend, &bmp, region, flags).unwrap();
        assert_eq!((old.width(), old.height()), (new.width(), new.height()));
        assert_eq!(old.to_bitmap(), new.to_bitmap());
    }

    let path = write_png("deprecated.png", &bmp);
    let old = Image::from_file_tileable(&backend, &path, true).unwrap();
    assert_eq!(old.to_bitmap(), bmp);
    let old = Image::from_file_region_tileable(&backend, &path, region, false).unwrap();
    assert_eq!(old.to_bitmap(), bmp.region(region).unwrap());
    let _ = std::fs::remove_file(&path);
}

// ============================================================================
// TILES
// ============================================================================

#[test]
fn test_tiles_by_pixel_size() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(35, 22);

    let tiles = load_tiles(&backend, &bmp, TileSize::Pixels(8), TileSize::Pixels(10), ImageFlags::SMOOTH)
        .unwrap();

    // floor(35 / 8) * floor(22 / 10)
    assert_eq!(tiles.len(), 4 * 2);
    for (i, tile) in tiles.iter().enumerate() {
        let (row, col) = (i as u32 / 4, i as u32 % 4);
        assert_eq!((tile.width(), tile.height()), (8, 10));
        assert_eq!(
            tile.to_bitmap().get_pixel(0, 0),
            Some(Color::rgb((col * 8) as u8, (row * 10) as u8, 7))
        );
    }
}

#[test]
fn test_tiles_by_count() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(30, 21);

    let tiles = load_tiles(&backend, &bmp, TileSize::Count(4), TileSize::Count(2), ImageFlags::SMOOTH)
        .unwrap();

    assert_eq!(tiles.len(), 4 * 2);
    assert!(tiles.iter().all(|t| (t.width(), t.height()) == (30 / 4, 21 / 2)));
    // last tile starts at column 3 * 7, row 1 * 10
    assert_eq!(
        tiles[7].to_bitmap().get_pixel(0, 0),
        Some(Color::rgb(21, 10, 7))
    );
}

#[test]
#[allow(deprecated)]
fn test_tiles_legacy_sign_convention() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(30, 21);

    let tiles = load_tiles_tileable(&backend, &bmp, -3, 7, false).unwrap();
    assert_eq!(tiles.len(), 3 * 3);
    assert!(tiles.iter().all(|t| (t.width(), t.height()) == (10, 7)));

    // counts on both axes
    let tiles = load_tiles_tileable(&backend, &bmp, -3, -2, false).unwrap();
    assert_eq!(tiles.len(), 6);
    assert!(tiles.iter().all(|t| (t.width(), t.height()) == (10, 10)));
    assert_eq!(tiles[5].to_bitmap().get_pixel(0, 0), Some(Color::rgb(20, 10, 7)));

    let err = load_tiles_tileable(&backend, &bmp, 0, 7, false).unwrap_err();
    assert!(matches!(err, SpriteError::InvalidTileSize { .. }));
}

#[test]
fn test_tiles_from_file() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(16, 16);
    let path = write_png("tiles.png", &bmp);

    let tiles = load_tiles_from_file(&backend, &path, TileSize::Pixels(4), TileSize::Count(2), ImageFlags::TILEABLE)
        .unwrap();
    assert_eq!(tiles.len(), 4 * 2);
    assert_eq!(tiles[5].to_bitmap(), bmp.region(Region::new(4, 8, 4, 8)).unwrap());

    #[allow(deprecated)]
    let legacy = load_tiles_from_file_tileable(&backend, &path, 4, -2, true).unwrap();
    assert_eq!(legacy.len(), tiles.len());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_tiles_from_missing_file() {
    let backend = SoftwareBackend::default();
    let path = std::env::temp_dir().join("fos-sprite-no-such-tiles.png");
    let err = load_tiles_from_file(&backend, &path, TileSize::Pixels(4), TileSize::Pixels(4), ImageFlags::SMOOTH)
        .unwrap_err();
    assert!(matches!(err, SpriteError::Image(_)));
}

#[test]
fn test_tiles_larger_than_bitmap() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(8, 8);
    let tiles = load_tiles(&backend, &bmp, TileSize::Pixels(9), TileSize::Pixels(4), ImageFlags::SMOOTH)
        .unwrap();
    assert!(tiles.is_empty());
}

// ============================================================================
// DRAWING
// ============================================================================

#[test]
fn test_draw_issues_exact_corners() {
    let backend = SoftwareBackend::default();
    let image = Image::from_bitmap(&backend, &coordinate_bitmap(10, 6), ImageFlags::SMOOTH).unwrap();

    image.draw(2.0, 3.0, 0.0, 1.0, 1.0, Color::WHITE, AlphaMode::Default);

    let calls = backend.queue().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(corners(&calls[0]), [(2.0, 3.0), (12.0, 3.0), (2.0, 9.0), (12.0, 9.0)]);
}

#[test]
fn test_draw_rot_matches_centered_draw() {
    let backend = SoftwareBackend::default();
    let image = Image::from_bitmap(&backend, &coordinate_bitmap(10, 6), ImageFlags::SMOOTH).unwrap();

    image.draw_rot(20.0, 20.0, 0.0, 0.0, 0.5, 0.5, 2.0, 2.0, Color::WHITE, AlphaMode::Default);
    image.draw(10.0, 14.0, 0.0, 2.0, 2.0, Color::WHITE, AlphaMode::Default);

    let calls = backend.queue().calls();
    for (a, b) in corners(&calls[0]).iter().zip(corners(&calls[1]).iter()) {
        assert!((a.0 - b.0).abs() < 1e-9);
        assert!((a.1 - b.1).abs() < 1e-9);
    }
}

#[test]
fn test_draw_rot_half_turn_swaps_corners() {
    let backend = SoftwareBackend::default();
    let image = Image::from_bitmap(&backend, &coordinate_bitmap(4, 2), ImageFlags::SMOOTH).unwrap();

    image.draw_rot(0.0, 0.0, 0.0, 180.0, 0.5, 0.5, 1.0, 1.0, Color::WHITE, AlphaMode::Default);

    let c = corners(&backend.queue().calls()[0]);
    let expected = [(2.0, 1.0), (-2.0, 1.0), (2.0, -1.0), (-2.0, -1.0)];
    for (a, b) in c.iter().zip(expected.iter()) {
        assert!((a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9, "{c:?}");
    }
}

#[test]
fn test_flush_respects_z_order() {
    init_logging();
    let backend = SoftwareBackend::default();
    let red = Image::from_bitmap(&backend, &Bitmap::filled(4, 4, Color::rgb(255, 0, 0)), ImageFlags::RETRO)
        .unwrap();
    let blue = Image::from_bitmap(&backend, &Bitmap::filled(4, 4, Color::rgb(0, 0, 255)), ImageFlags::RETRO)
        .unwrap();

    // Issued top-most first; the queue sorts by z before painting
    red.draw(0.0, 0.0, 2.0, 1.0, 1.0, Color::WHITE, AlphaMode::Default);
    blue.draw(0.0, 0.0, 1.0, 1.0, 1.0, Color::WHITE, AlphaMode::Default);

    let mut target = Pixmap::new(4, 4).unwrap();
    assert_eq!(backend.queue().flush(&mut target), 2);

    let p = target.pixel(1, 1).unwrap();
    assert!(p.red() >= 250 && p.blue() <= 5, "{p:?}");
}

#[test]
fn test_equal_z_keeps_issue_order() {
    let backend = SoftwareBackend::default();
    let red = Image::from_bitmap(&backend, &Bitmap::filled(2, 2, Color::rgb(255, 0, 0)), ImageFlags::RETRO)
        .unwrap();
    let green = Image::from_bitmap(&backend, &Bitmap::filled(2, 2, Color::rgb(0, 255, 0)), ImageFlags::RETRO)
        .unwrap();

    red.draw(0.0, 0.0, 0.0, 1.0, 1.0, Color::WHITE, AlphaMode::Default);
    green.draw(0.0, 0.0, 0.0, 1.0, 1.0, Color::WHITE, AlphaMode::Default);

    let mut target = Pixmap::new(2, 2).unwrap();
    backend.queue().flush(&mut target);

    let p = target.pixel(0, 0).unwrap();
    assert!(p.green() >= 250 && p.red() <= 5, "{p:?}");
}

#[test]
fn test_draw_mod_tints_pixels() {
    let backend = SoftwareBackend::default();
    let white = Image::from_bitmap(&backend, &Bitmap::filled(2, 2, Color::WHITE), ImageFlags::RETRO).unwrap();
    let tint = Color::rgb(0, 0, 255);

    white.draw_mod(0.0, 0.0, 0.0, 1.0, 1.0, tint, tint, tint, tint, AlphaMode::Default);

    let mut target = Pixmap::new(2, 2).unwrap();
    backend.queue().flush(&mut target);

    let p = target.pixel(1, 1).unwrap();
    assert!(p.blue() >= 250 && p.red() <= 5 && p.green() <= 5, "{p:?}");
}

#[test]
fn test_additive_mode_adds() {
    let backend = SoftwareBackend::default();
    let red = Image::from_bitmap(&backend, &Bitmap::filled(2, 2, Color::rgb(255, 0, 0)), ImageFlags::RETRO)
        .unwrap();
    let green = Image::from_bitmap(&backend, &Bitmap::filled(2, 2, Color::rgb(0, 255, 0)), ImageFlags::RETRO)
        .unwrap();

    red.draw(0.0, 0.0, 0.0, 1.0, 1.0, Color::WHITE, AlphaMode::Default);
    green.draw(0.0, 0.0, 1.0, 1.0, 1.0, Color::WHITE, AlphaMode::Additive);

    let mut target = Pixmap::new(2, 2).unwrap();
    backend.queue().flush(&mut target);

    let p = target.pixel(0, 0).unwrap();
    assert!(p.red() >= 250 && p.green() >= 250, "{p:?}");
}

#[test]
fn test_images_share_backend_queue() {
    let backend = SoftwareBackend::default();
    let bmp = coordinate_bitmap(8, 8);
    let tiles = load_tiles(&backend, &bmp, TileSize::Count(2), TileSize::Count(2), ImageFlags::SMOOTH).unwrap();

    for (i, tile) in tiles.iter().enumerate() {
        tile.draw(i as f64 * 4.0, 0.0, i as f64, 1.0, 1.0, Color::WHITE, AlphaMode::Default);
    }

    let calls = backend.queue().calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[3].z, 3.0);
    assert_eq!(corners(&calls[3])[0], (12.0, 0.0));
}
