//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;

pub mod segment;

/// Operand that reads standard input.
pub const STDIN_OPERAND: &str = "-";

/// Read one input operand (a file path, or `-` for stdin), enforcing the size limit.
pub fn read_input(operand: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if operand.as_str() == STDIN_OPERAND {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(operand.as_std_path())
        .with_context(|| format!("failed to read {operand}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max as u64 {
            anyhow::bail!("input too large: {operand} is {size} bytes (limit: {max} bytes)");
        }
    }

    let bytes =
        std::fs::read(operand.as_std_path()).with_context(|| format!("failed to read {operand}"))?;
    Ok(decode(bytes))
}

/// Decode UTF-8, replacing invalid sequences with U+FFFD.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(
                valid_up_to = e.utf8_error().valid_up_to(),
                "input is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut stdin = std::io::stdin().lock();
    let mut content = Vec::new();
    match max_bytes {
        Some(max) => {
            stdin
                .take(max as u64 + 1)
                .read_to_end(&mut content)
                .context("failed to read standard input")?;
            if content.len() > max {
                anyhow::bail!("input too large: standard input exceeds {max} bytes");
            }
        }
        None => {
            stdin
                .read_to_end(&mut content)
                .context("failed to read standard input")?;
        }
    }
    Ok(decode(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_keeps_valid_utf8() {
        assert_eq!(decode("Ångström".as_bytes().to_vec()), "Ångström");
    }

    #[test]
    fn decode_replaces_invalid_sequences() {
        assert_eq!(decode(b"caf\xff ok".to_vec()), "caf\u{fffd} ok");
    }
}
