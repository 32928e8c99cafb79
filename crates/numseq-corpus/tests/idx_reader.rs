use std::fs::File;
use std::io::Write;
use std::path::Path;

use numseq_corpus::{load_corpus, read_images, read_labels};
use numseq_core::SeqError;
use tempfile::tempdir;

fn write_images(path: &Path, magic: u32, images: &[Vec<u8>], rows: u32, cols: u32) {
    let mut file = File::create(path).expect("create images file");
    file.write_all(&magic.to_be_bytes()).unwrap();
    file.write_all(&(images.len() as u32).to_be_bytes()).unwrap();
    file.write_all(&rows.to_be_bytes()).unwrap();
    file.write_all(&cols.to_be_bytes()).unwrap();
    for image in images {
        file.write_all(image).unwrap();
    }
}

fn write_labels(path: &Path, magic: u32, labels: &[u8]) {
    let mut file = File::create(path).expect("create labels file");
    file.write_all(&magic.to_be_bytes()).unwrap();
    file.write_all(&(labels.len() as u32).to_be_bytes()).unwrap();
    file.write_all(labels).unwrap();
}

#[test]
fn reads_and_inverts_pixel_values() {
    let dir = tempdir().expect("tempdir");
    let images_path = dir.path().join("images-ubyte");
    // One 2x3 image, row-major: 0 becomes 1.0 (background), 255 becomes 0.0.
    write_images(&images_path, 2051, &[vec![0, 255, 51, 102, 153, 204]], 2, 3);

    let glyphs = read_images(&images_path).expect("read images");
    assert_eq!(glyphs.len(), 1);
    let glyph = &glyphs[0];
    assert_eq!(glyph.shape(), (2, 3));
    assert!((glyph[(0, 0)] - 1.0).abs() < 1e-6);
    assert!(glyph[(0, 1)].abs() < 1e-6);
    assert!((glyph[(0, 2)] - 204.0 / 255.0).abs() < 1e-6);
    assert!((glyph[(1, 0)] - 153.0 / 255.0).abs() < 1e-6);
}

#[test]
fn wrong_magic_numbers_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let images_path = dir.path().join("images-ubyte");
    write_images(&images_path, 2052, &[vec![0u8; 4]], 2, 2);
    let err = read_images(&images_path).expect_err("bad image magic");
    match err {
        SeqError::Corpus(info) => {
            assert_eq!(info.code, "corpus-bad-magic");
            assert_eq!(info.context.get("found").map(String::as_str), Some("2052"));
        }
        other => panic!("expected Corpus error, got {other:?}"),
    }

    let labels_path = dir.path().join("labels-ubyte");
    write_labels(&labels_path, 2051, &[1, 2]);
    let err = read_labels(&labels_path).expect_err("bad label magic");
    assert!(matches!(err, SeqError::Corpus(_)));
}

#[test]
fn count_mismatch_is_rejected_when_loading() {
    let dir = tempdir().expect("tempdir");
    let images_path = dir.path().join("images-ubyte");
    let labels_path = dir.path().join("labels-ubyte");
    write_images(&images_path, 2051, &[vec![0u8; 4], vec![255u8; 4]], 2, 2);
    write_labels(&labels_path, 2049, &[7]);

    let err = load_corpus(&images_path, &labels_path).expect_err("count mismatch");
    match err {
        SeqError::Corpus(info) => assert_eq!(info.code, "corpus-size-mismatch"),
        other => panic!("expected Corpus error, got {other:?}"),
    }
}

#[test]
fn loads_a_well_formed_corpus() {
    let dir = tempdir().expect("tempdir");
    let images_path = dir.path().join("images-ubyte");
    let labels_path = dir.path().join("labels-ubyte");
    write_images(&images_path, 2051, &[vec![0u8; 4], vec![128u8; 4]], 2, 2);
    write_labels(&labels_path, 2049, &[3, 8]);

    let corpus = load_corpus(&images_path, &labels_path).expect("load corpus");
    assert_eq!(corpus.len(), 2);
    assert_eq!((corpus.height(), corpus.width()), (2, 2));
    assert_eq!(corpus.labels(), &[3, 8]);
}

#[test]
fn truncated_pixel_payload_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let images_path = dir.path().join("images-ubyte");
    // Header promises one 2x2 image but only two pixel bytes follow.
    let mut file = File::create(&images_path).unwrap();
    file.write_all(&2051u32.to_be_bytes()).unwrap();
    file.write_all(&1u32.to_be_bytes()).unwrap();
    file.write_all(&2u32.to_be_bytes()).unwrap();
    file.write_all(&2u32.to_be_bytes()).unwrap();
    file.write_all(&[9, 9]).unwrap();

    let err = read_images(&images_path).expect_err("truncated payload");
    match err {
        SeqError::Corpus(info) => assert_eq!(info.code, "corpus-read"),
        other => panic!("expected Corpus error, got {other:?}"),
    }
}
