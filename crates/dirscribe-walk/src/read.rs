//! Capped, lossy file reading.

use std::io;
use std::path::Path;

use dirscribe_core::FileSystem;

/// Decoded file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent {
    /// Content with invalid UTF-8 replaced.
    pub text: String,
    /// Whether the file continued past the read cap.
    pub truncated: bool,
}

/// Read up to `max_bytes` of a file as text.
///
/// Invalid UTF-8 is replaced rather than reported. Bytes past the cap are
/// dropped silently; only `truncated` records that it happened. A character
/// the cap splits is dropped whole.
pub fn read_capped<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    max_bytes: u64,
) -> io::Result<TextContent> {
    let mut bytes = fs.read_prefix(path, max_bytes.saturating_add(1))?;
    let cap = usize::try_from(max_bytes).unwrap_or(usize::MAX);
    let truncated = bytes.len() > cap;
    if truncated {
        bytes.truncate(cap);
        trim_split_char(&mut bytes);
    }

    Ok(TextContent {
        text: String::from_utf8_lossy(&bytes).into_owned(),
        truncated,
    })
}

/// Remove an incomplete UTF-8 sequence from the end of `bytes`.
fn trim_split_char(bytes: &mut Vec<u8>) {
    // A split character leaves at most three of its bytes behind.
    let tail_start = bytes.len().saturating_sub(3);
    let Some(lead) = (tail_start..bytes.len())
        .rev()
        .find(|&i| bytes[i] & 0xC0 != 0x80)
    else {
        return;
    };

    if let Err(e) = std::str::from_utf8(&bytes[lead..]) {
        if e.error_len().is_none() {
            bytes.truncate(lead + e.valid_up_to());
        }
    }
}
