//! Coordinate map output.
//!
//! One line per thumbnail, in collection order, five tab-separated fields:
//!
//! ```text
//! name<TAB>x0<TAB>y0<TAB>x1<TAB>y1
//! ```
//!
//! `name` is the file name of the source path and `(x1, y1)` is exclusive,
//! so the box covers the thumbnail but not the gutter after it. Names are
//! written as raw bytes on Unix; the map is as byte-transparent as the
//! filesystem.
//!
//! [`format_map_line`] is pure; [`write_map`] does the I/O.

use crate::thumbnail::ThumbnailRecord;
use crate::types::{Dimensions, Offset};
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum MapWriteError {
    #[error("Could not create map file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not write map file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} has not been placed", path.display())]
    Unplaced { path: PathBuf },
}

/// Base name of `path` as bytes, or the whole path when it has none (`..`).
fn base_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

#[cfg(unix)]
fn name_bytes(name: &OsStr) -> std::borrow::Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    std::borrow::Cow::Borrowed(name.as_bytes())
}

#[cfg(not(unix))]
fn name_bytes(name: &OsStr) -> std::borrow::Cow<'_, [u8]> {
    std::borrow::Cow::Owned(name.to_string_lossy().into_owned().into_bytes())
}

/// Format one map line (including the trailing newline) as bytes.
pub fn format_map_line(path: &Path, offset: Offset, size: Dimensions) -> Vec<u8> {
    let mut line = name_bytes(base_name(path)).into_owned();
    let coords = format!(
        "\t{}\t{}\t{}\t{}\n",
        offset.x,
        offset.y,
        u64::from(offset.x) + u64::from(size.width),
        u64::from(offset.y) + u64::from(size.height),
    );
    line.extend_from_slice(coords.as_bytes());
    line
}

/// Write the map for `records` to `destination`.
///
/// With no destination this does nothing and succeeds.
pub fn write_map<R>(
    destination: Option<&Path>,
    records: &[ThumbnailRecord<R>],
) -> Result<(), MapWriteError> {
    let Some(path) = destination else {
        return Ok(());
    };

    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let offset = record.offset().ok_or_else(|| MapWriteError::Unplaced {
            path: record.source_path.clone(),
        })?;
        lines.push(format_map_line(
            &record.source_path,
            offset,
            record.thumbnail_size,
        ));
    }

    let file = File::create(path).map_err(|source| MapWriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let write_error = |source| MapWriteError::Write {
        path: path.to_path_buf(),
        source,
    };
    for line in &lines {
        writer.write_all(line).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;

    debug!("wrote {} map entries to {}", lines.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(path: &str, x: u32, y: u32, width: u32) -> ThumbnailRecord<()> {
        ThumbnailRecord {
            source_path: PathBuf::from(path),
            original_size: Dimensions::new(width * 2, 56),
            thumbnail_size: Dimensions::new(width, 28),
            offset: Some(Offset::new(x, y)),
            raster: (),
        }
    }

    #[test]
    fn line_uses_base_name_and_exclusive_box() {
        let line = format_map_line(
            Path::new("/photos/2013/beach.jpg"),
            Offset::new(304, 32),
            Dimensions::new(300, 28),
        );
        assert_eq!(line, b"beach.jpg\t304\t32\t604\t60\n");
    }

    #[test]
    fn relative_name_without_directory() {
        let line = format_map_line(
            Path::new("a.png"),
            Offset::new(0, 0),
            Dimensions::new(5, 28),
        );
        assert_eq!(line, b"a.png\t0\t0\t5\t28\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_pass_through_untouched() {
        use std::os::unix::ffi::OsStrExt;
        let raw = OsStr::from_bytes(b"caf\xe9.jpg");

        let line = format_map_line(Path::new(raw), Offset::new(0, 0), Dimensions::new(1, 1));
        assert_eq!(line, b"caf\xe9.jpg\t0\t0\t1\t1\n");
    }

    #[test]
    fn no_destination_is_a_no_op() {
        let records = vec![placed("a.jpg", 0, 0, 10)];
        assert!(write_map(None, &records).is_ok());
    }

    #[test]
    fn writes_one_line_per_record_in_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let map = tmp.path().join("strip.map");
        // Deliberately not sorted by size or name.
        let records = vec![
            placed("zeta.jpg", 0, 0, 300),
            placed("alpha.jpg", 304, 0, 300),
            placed("mid.jpg", 0, 32, 12),
        ];

        write_map(Some(map.as_path()), &records).unwrap();

        let content = std::fs::read_to_string(&map).unwrap();
        assert_eq!(
            content,
            "zeta.jpg\t0\t0\t300\t28\n\
             alpha.jpg\t304\t0\t604\t28\n\
             mid.jpg\t0\t32\t12\t60\n"
        );
    }

    #[test]
    fn overwrites_existing_map() {
        let tmp = tempfile::TempDir::new().unwrap();
        let map = tmp.path().join("strip.map");
        std::fs::write(&map, "stale contents that are longer than the new map\n").unwrap();

        write_map(Some(map.as_path()), &[placed("a.jpg", 0, 0, 10)]).unwrap();

        assert_eq!(std::fs::read_to_string(&map).unwrap(), "a.jpg\t0\t0\t10\t28\n");
    }

    #[test]
    fn unopenable_destination_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let map = tmp.path().join("no-such-dir").join("strip.map");

        let err = write_map(Some(map.as_path()), &[placed("a.jpg", 0, 0, 10)]).unwrap_err();
        assert!(matches!(err, MapWriteError::Create { .. }));
        assert!(err.to_string().contains("strip.map"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_device_is_a_write_error() {
        let full = Path::new("/dev/full");

        let err = write_map(Some(full), &[placed("a.jpg", 0, 0, 10)]).unwrap_err();
        assert!(matches!(err, MapWriteError::Write { ref path, .. } if path == full));
        assert!(err.to_string().starts_with("Could not write map file /dev/full"));
    }

    #[test]
    fn unplaced_record_is_an_error_and_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let map = tmp.path().join("strip.map");
        let mut record = placed("a.jpg", 0, 0, 10);
        record.offset = None;

        let err = write_map(Some(map.as_path()), &[record]).unwrap_err();
        assert!(matches!(err, MapWriteError::Unplaced { .. }));
        assert!(!map.exists());
    }
}
