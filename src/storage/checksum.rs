//! CRC32 checksums for snapshot files

use std::fs;
use std::path::Path;

use super::errors::{StorageError, StorageResult};

/// Computes the CRC32 checksum of a whole file.
pub fn compute_file_checksum(path: &Path) -> StorageResult<u32> {
    let bytes = fs::read(path).map_err(|e| StorageError::io(path, e))?;
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&bytes);
    Ok(hasher.finalize())
}

/// Formats a checksum for the manifest: `crc32:xxxxxxxx`.
pub fn format_checksum(checksum: u32) -> String {
    format!("crc32:{:08x}", checksum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_fixed_width_hex() {
        assert_eq!(format_checksum(0), "crc32:00000000");
        assert_eq!(format_checksum(0xdead_beef), "crc32:deadbeef");
    }

    #[test]
    fn checksum_is_content_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.txt");
        std::fs::write(&path, b"one").unwrap();
        let first = compute_file_checksum(&path).unwrap();
        std::fs::write(&path, b"two").unwrap();
        let second = compute_file_checksum(&path).unwrap();
        assert_ne!(first, second);
    }
}
