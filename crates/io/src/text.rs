// Text input decoding
//
// Flat keyword lists arrive as plain text files of unknown provenance.
// `read_text` mirrors the usual Excel-export reality: try UTF-8, fall back
// to Windows-1252. `read_text_as` is the strict variant for callers that
// know the encoding and want malformed bytes to fail loudly.

use encoding_rs::{Encoding, WINDOWS_1252};

use crate::error::ImportError;

/// Decode bytes as UTF-8, falling back to Windows-1252 (common for
/// Excel-exported text) when the stream is not valid UTF-8. Never fails.
pub fn read_text(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

/// Decode bytes with a declared encoding label (e.g. `"utf-8"`,
/// `"windows-1252"`, `"latin1"`). Fails on an unknown label or on byte
/// sequences invalid for that encoding.
pub fn read_text_as(bytes: &[u8], label: &str) -> Result<String, ImportError> {
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| ImportError::Decoding(format!("unknown encoding label '{label}'")))?;

    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|decoded| decoded.into_owned())
        .ok_or_else(|| {
            ImportError::Decoding(format!("invalid {} byte sequence", encoding.name()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_utf8() {
        assert_eq!(read_text("été | robe\n".as_bytes()), "été | robe\n");
    }

    #[test]
    fn test_read_text_windows_1252_fallback() {
        // "été" in Windows-1252: 0xE9 is é
        let bytes = [0xE9, b't', 0xE9];
        assert_eq!(read_text(&bytes), "été");
    }

    #[test]
    fn test_read_text_as_strict_rejects_bad_utf8() {
        let err = read_text_as(&[0xE9, b't', 0xE9], "utf-8").unwrap_err();
        assert!(matches!(err, ImportError::Decoding(_)));
    }

    #[test]
    fn test_read_text_as_declared_encoding() {
        let decoded = read_text_as(&[0xE9, b't', 0xE9], "windows-1252").unwrap();
        assert_eq!(decoded, "été");
    }

    #[test]
    fn test_read_text_as_unknown_label() {
        let err = read_text_as(b"abc", "klingon-8").unwrap_err();
        assert!(matches!(err, ImportError::Decoding(_)));
    }
}
