//! Content fingerprinting for single files using BLAKE3

use crate::error::NotReadable;
use crate::snapshot::Fingerprint;
use blake3::Hasher;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read chunk size for streaming hashing.
///
/// Memory use per file is bounded by this constant regardless of file size.
const CHUNK_SIZE: usize = 8192;

/// Compute the content fingerprint of a single file.
///
/// Reads the file in fixed-size chunks and feeds each chunk into an
/// incremental BLAKE3 accumulator. Returns `NotReadable` when the file does
/// not exist at open time or any I/O error occurs mid-read; callers treat
/// this as "exclude from snapshot", not as a scan failure.
pub fn fingerprint(path: &Path) -> Result<Fingerprint, NotReadable> {
    let mut file = File::open(path).map_err(|source| NotReadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Hasher::new();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(|source| NotReadable {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(Fingerprint::from(hasher.finalize()))
}
