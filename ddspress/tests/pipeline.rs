//! End-to-end pipeline tests.
//!
//! These tests drive `convert_files` against real PNG files in a scratch
//! directory and check the produced DDS containers byte-for-byte: header
//! fields, DX10 extension, and total size from the block arithmetic.

use ddspress::{convert_files, ConvertOptions, Quality, ResizeFilter, TextureFormat};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(dir: &Path, name: &str, image: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).unwrap();
    path
}

fn header_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn bc1_no_mipmaps_byte_exact() {
    let dir = TempDir::new().unwrap();
    let source = write_png(
        dir.path(),
        "red.png",
        &RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255])),
    );
    let destination = dir.path().join("red.dds");

    let options = ConvertOptions::new(TextureFormat::Bc1)
        .with_quality(Quality::new(6).unwrap())
        .without_mipmaps();
    let summary = convert_files(vec![(source, destination.clone())], &options)
        .await
        .unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.failed, 0);

    // 128 header bytes + 16 blocks x 8 bytes.
    let bytes = std::fs::read(&destination).unwrap();
    assert_eq!(bytes.len(), 256);
    assert_eq!(&bytes[0..4], b"DDS ");
    assert_eq!(header_u32(&bytes, 4), 124);
    assert_eq!(header_u32(&bytes, 12), 16); // height
    assert_eq!(header_u32(&bytes, 16), 16); // width
    assert_eq!(header_u32(&bytes, 28), 1); // mipmap count
    assert_eq!(&bytes[84..88], b"DXT1");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn bc7_with_mipmaps_byte_exact() {
    let dir = TempDir::new().unwrap();
    let source = write_png(
        dir.path(),
        "odd.png",
        &RgbaImage::from_pixel(17, 9, Rgba([10, 200, 30, 128])),
    );
    let destination = dir.path().join("odd.dds");

    let options = ConvertOptions::new(TextureFormat::Bc7).with_quality(Quality::new(0).unwrap());
    let summary = convert_files(vec![(source, destination.clone())], &options)
        .await
        .unwrap();
    assert_eq!(summary.written, 1);

    let bytes = std::fs::read(&destination).unwrap();

    // Levels: 17x9, 8x4, 4x2, 2x1, 1x1 -> 15 + 2 + 1 + 1 + 1 = 20 blocks.
    let body = 20 * 16;
    assert_eq!(bytes.len(), 128 + 20 + body);

    assert_eq!(header_u32(&bytes, 12), 9); // height (unpadded)
    assert_eq!(header_u32(&bytes, 16), 17); // width (unpadded)
    assert_eq!(header_u32(&bytes, 28), 5); // mipmap count
    assert_eq!(&bytes[84..88], b"DX10");

    // DXT10 extension right after the header.
    assert_eq!(header_u32(&bytes, 128), 98); // BC7_UNORM
    assert_eq!(header_u32(&bytes, 132), 3); // TEXTURE2D
    assert_eq!(header_u32(&bytes, 140), 1); // array size
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn mipmaps_disabled_single_level() {
    let dir = TempDir::new().unwrap();
    let source = write_png(dir.path(), "big.png", &RgbaImage::new(128, 128));
    let destination = dir.path().join("big.dds");

    let options = ConvertOptions::new(TextureFormat::Bc1).without_mipmaps();
    convert_files(vec![(source, destination.clone())], &options)
        .await
        .unwrap();

    let bytes = std::fs::read(&destination).unwrap();
    // 128x128 / 16 pixels per block = 1024 blocks x 8 bytes.
    assert_eq!(bytes.len(), 128 + 1024 * 8);
    assert_eq!(header_u32(&bytes, 28), 1);
    // No MIPMAPCOUNT flag, no COMPLEX/MIPMAP caps.
    assert_eq!(header_u32(&bytes, 8) & 0x20000, 0);
    assert_eq!(header_u32(&bytes, 108) & 0x8, 0);
    assert_eq!(header_u32(&bytes, 108) & 0x400000, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_by_one_png_is_one_padded_block() {
    let dir = TempDir::new().unwrap();
    let source = write_png(
        dir.path(),
        "dot.png",
        &RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255])),
    );
    let destination = dir.path().join("dot.dds");

    let options = ConvertOptions::new(TextureFormat::Bc1);
    convert_files(vec![(source, destination.clone())], &options)
        .await
        .unwrap();

    let bytes = std::fs::read(&destination).unwrap();
    // One mipmap level even with mipmaps enabled, one 8-byte block.
    assert_eq!(bytes.len(), 128 + 8);
    assert_eq!(header_u32(&bytes, 12), 1);
    assert_eq!(header_u32(&bytes, 16), 1);
    assert_eq!(header_u32(&bytes, 28), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn truncated_png_is_isolated() {
    let dir = TempDir::new().unwrap();
    let good = write_png(
        dir.path(),
        "good.png",
        &RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255])),
    );

    let bad = dir.path().join("bad.png");
    let full = std::fs::read(&good).unwrap();
    std::fs::write(&bad, &full[..full.len() / 2]).unwrap();

    let good_dst = dir.path().join("good.dds");
    let bad_dst = dir.path().join("bad.dds");

    let options = ConvertOptions::new(TextureFormat::Bc1);
    let summary = convert_files(
        vec![(good, good_dst.clone()), (bad, bad_dst.clone())],
        &options,
    )
    .await
    .unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(summary.failed, 1);
    assert!(good_dst.exists());
    assert!(!bad_dst.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn all_inputs_malformed_reports_each() {
    let dir = TempDir::new().unwrap();
    let mut files = Vec::new();
    for i in 0..4 {
        let source = dir.path().join(format!("junk{i}.png"));
        std::fs::write(&source, b"definitely not a png").unwrap();
        files.push((source, dir.path().join(format!("junk{i}.dds"))));
    }

    let options = ConvertOptions::new(TextureFormat::Bc1);
    let summary = convert_files(files.clone(), &options).await.unwrap();

    assert_eq!(summary.written, 0);
    assert_eq!(summary.failed, 4);
    for (_, destination) in files {
        assert!(!destination.exists());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn missing_source_is_isolated() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.png");
    let destination = dir.path().join("missing.dds");

    let options = ConvertOptions::new(TextureFormat::Bc7);
    let summary = convert_files(vec![(missing, destination.clone())], &options)
        .await
        .unwrap();

    assert_eq!(summary.written, 0);
    assert_eq!(summary.failed, 1);
    assert!(!destination.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_files_with_small_token_budget() {
    let dir = TempDir::new().unwrap();
    let mut files = Vec::new();
    for i in 0..12 {
        let image = RgbaImage::from_pixel(8 + i % 3, 8, Rgba([i as u8 * 20, 0, 0, 255]));
        let source = write_png(dir.path(), &format!("in{i}.png"), &image);
        files.push((source, dir.path().join(format!("out{i}.dds"))));
    }

    let options = ConvertOptions::new(TextureFormat::Bc1)
        .with_parallelism(4)
        .with_tokens(4)
        .with_verbose(true);
    let summary = convert_files(files.clone(), &options).await.unwrap();

    assert_eq!(summary.written, 12);
    for (_, destination) in files {
        let bytes = std::fs::read(&destination).unwrap();
        assert_eq!(&bytes[0..4], b"DDS ");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn permutation_produces_identical_outputs() {
    let dir = TempDir::new().unwrap();
    let a = write_png(
        dir.path(),
        "a.png",
        &RgbaImage::from_pixel(8, 8, Rgba([250, 10, 10, 255])),
    );
    let b = write_png(
        dir.path(),
        "b.png",
        &RgbaImage::from_pixel(12, 5, Rgba([10, 10, 250, 255])),
    );

    let options = ConvertOptions::new(TextureFormat::Bc1);

    let forward = vec![
        (a.clone(), dir.path().join("fwd_a.dds")),
        (b.clone(), dir.path().join("fwd_b.dds")),
    ];
    convert_files(forward, &options).await.unwrap();

    let reversed = vec![
        (b, dir.path().join("rev_b.dds")),
        (a, dir.path().join("rev_a.dds")),
    ];
    convert_files(reversed, &options).await.unwrap();

    assert_eq!(
        std::fs::read(dir.path().join("fwd_a.dds")).unwrap(),
        std::fs::read(dir.path().join("rev_a.dds")).unwrap()
    );
    assert_eq!(
        std::fs::read(dir.path().join("fwd_b.dds")).unwrap(),
        std::fs::read(dir.path().join("rev_b.dds")).unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn token_budget_does_not_change_output() {
    let dir = TempDir::new().unwrap();
    let source = write_png(
        dir.path(),
        "in.png",
        &RgbaImage::from_pixel(33, 17, Rgba([77, 88, 99, 255])),
    );

    let narrow = dir.path().join("narrow.dds");
    let wide = dir.path().join("wide.dds");

    let options = ConvertOptions::new(TextureFormat::Bc1).with_tokens(1);
    convert_files(vec![(source.clone(), narrow.clone())], &options)
        .await
        .unwrap();

    let options = ConvertOptions::new(TextureFormat::Bc1).with_tokens(16);
    convert_files(vec![(source, wide.clone())], &options)
        .await
        .unwrap();

    assert_eq!(
        std::fs::read(narrow).unwrap(),
        std::fs::read(wide).unwrap()
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn vflip_runs_through_pipeline() {
    let dir = TempDir::new().unwrap();
    let mut image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    for x in 0..4 {
        image.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
    }
    let source = write_png(dir.path(), "flip.png", &image);
    let destination = dir.path().join("flip.dds");

    let options = ConvertOptions::new(TextureFormat::Bc1)
        .with_vflip(true)
        .with_filter(ResizeFilter::Nearest);
    let summary = convert_files(vec![(source, destination.clone())], &options)
        .await
        .unwrap();

    assert_eq!(summary.written, 1);
    let bytes = std::fs::read(&destination).unwrap();
    // 4x4 with mipmaps: levels 4x4, 2x2, 1x1 -> 3 blocks.
    assert_eq!(bytes.len(), 128 + 3 * 8);
    assert_eq!(header_u32(&bytes, 28), 3);
}
