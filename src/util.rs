use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::warn;

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let count = file
            .read(&mut buf)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }

    let data = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;

    let mut file = File::create(path)
        .with_context(|| format!("failed to create json file: {}", path.display()))?;
    file.write_all(&data)
        .with_context(|| format!("failed to write json file: {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("failed to finalize json file: {}", path.display()))?;

    Ok(())
}

/// Reads `path`, or standard input when `path` is `-`.
pub fn read_input_bytes(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read table of contents from stdin")?;
        return Ok(buf);
    }

    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Decodes with the labelled encoding, else a BOM, else UTF-8.
///
/// Malformed sequences are replaced with U+FFFD and reported, not rejected.
pub fn decode_text(bytes: &[u8], label: Option<&str>) -> Result<String> {
    let (encoding, body) = match label {
        Some(label) => {
            let encoding = Encoding::for_label(label.trim().as_bytes())
                .with_context(|| format!("unknown text encoding: {label}"))?;
            (encoding, bytes)
        }
        None => match Encoding::for_bom(bytes) {
            Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
            None => (UTF_8, bytes),
        },
    };

    let (decoded, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        warn!(
            encoding = encoding.name(),
            "input contained invalid byte sequences; replaced with U+FFFD"
        );
    }

    Ok(decoded.into_owned())
}
