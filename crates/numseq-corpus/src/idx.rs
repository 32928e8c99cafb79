//! Reader for the IDX (ubyte) container format used by MNIST-style corpora.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use nalgebra::DMatrix;
use numseq_core::{Corpus, ErrorInfo, SeqError};

/// Magic number opening an IDX image file.
const IMAGES_MAGIC: u32 = 2051;
/// Magic number opening an IDX label file.
const LABELS_MAGIC: u32 = 2049;

fn io_error(path: &Path, err: std::io::Error) -> SeqError {
    SeqError::Corpus(
        ErrorInfo::new("corpus-read", "failed to read corpus file")
            .with_context("path", path.display().to_string())
            .with_context("source", err.to_string()),
    )
}

fn read_u32_be(reader: &mut impl Read, path: &Path) -> Result<u32, SeqError> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|err| io_error(path, err))?;
    Ok(u32::from_be_bytes(buf))
}

/// Reads the glyph matrices from an IDX image file.
///
/// Raw bytes are mapped through `(255 - v) / 255` so ink lands near `0.0`
/// and background near `1.0`, matching the engine's white-background
/// convention.
pub fn read_images(path: &Path) -> Result<Vec<DMatrix<f32>>, SeqError> {
    let mut reader = BufReader::new(File::open(path).map_err(|err| io_error(path, err))?);

    let magic = read_u32_be(&mut reader, path)?;
    if magic != IMAGES_MAGIC {
        return Err(SeqError::Corpus(
            ErrorInfo::new("corpus-bad-magic", "image file magic number does not match")
                .with_context("expected", IMAGES_MAGIC.to_string())
                .with_context("found", magic.to_string())
                .with_context("path", path.display().to_string()),
        ));
    }
    let count = read_u32_be(&mut reader, path)? as usize;
    let rows = read_u32_be(&mut reader, path)? as usize;
    let cols = read_u32_be(&mut reader, path)? as usize;

    let mut pixels = vec![0u8; count * rows * cols];
    reader
        .read_exact(&mut pixels)
        .map_err(|err| io_error(path, err))?;

    let glyphs = pixels
        .chunks_exact(rows * cols)
        .map(|chunk| {
            // The file stores pixels row-major.
            DMatrix::from_fn(rows, cols, |r, c| {
                (255.0 - f32::from(chunk[r * cols + c])) / 255.0
            })
        })
        .collect();
    Ok(glyphs)
}

/// Reads the label vector from an IDX label file.
pub fn read_labels(path: &Path) -> Result<Vec<u8>, SeqError> {
    let mut reader = BufReader::new(File::open(path).map_err(|err| io_error(path, err))?);

    let magic = read_u32_be(&mut reader, path)?;
    if magic != LABELS_MAGIC {
        return Err(SeqError::Corpus(
            ErrorInfo::new("corpus-bad-magic", "label file magic number does not match")
                .with_context("expected", LABELS_MAGIC.to_string())
                .with_context("found", magic.to_string())
                .with_context("path", path.display().to_string()),
        ));
    }
    let count = read_u32_be(&mut reader, path)? as usize;
    let mut labels = vec![0u8; count];
    reader
        .read_exact(&mut labels)
        .map_err(|err| io_error(path, err))?;
    Ok(labels)
}

/// Loads a full corpus from a pair of IDX files.
///
/// Count agreement between the two files and label-range validity are
/// enforced by [`Corpus::new`].
pub fn load_corpus(images_path: &Path, labels_path: &Path) -> Result<Corpus, SeqError> {
    let glyphs = read_images(images_path)?;
    let labels = read_labels(labels_path)?;
    Corpus::new(glyphs, labels)
}
