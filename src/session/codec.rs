//! Share-hash compression: raw deflate, then URL-safe base64.

use std::io::{Read, Write};

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

use super::SessionError;

/// Padded on encode, padding optional on decode.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Compress `text` into a URL-safe base64 string.
///
/// # Errors
///
/// Returns an error if the deflate stream cannot be written.
pub fn compress(text: &str) -> Result<String, SessionError> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    let bytes = encoder.finish()?;
    Ok(URL_SAFE_LENIENT.encode(bytes))
}

/// Reverse of [`compress`]. Invalid UTF-8 is replaced, not rejected.
///
/// # Errors
///
/// Returns an error if `encoded` is not base64url or not a deflate stream.
pub fn decompress(encoded: &str) -> Result<String, SessionError> {
    let bytes = URL_SAFE_LENIENT.decode(encoded.trim())?;
    let mut decoder = DeflateDecoder::new(bytes.as_slice());
    let mut raw = Vec::new();
    decoder.read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_empty() {
        assert_eq!(decompress(&compress("").unwrap()).unwrap(), "");
    }

    #[test]
    fn test_roundtrip_multiline_unicode() {
        let text = "# Notes\n\n- café\n- 日本語\n\n```\ncode\n```\n";
        assert_eq!(decompress(&compress(text).unwrap()).unwrap(), text);
    }

    #[test]
    fn test_output_is_url_safe() {
        let text: String = (0..2000).map(|i| char::from(b'!' + (i % 90) as u8)).collect();
        let encoded = compress(&text).unwrap();
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn test_decode_accepts_missing_padding() {
        let encoded = compress("hi there").unwrap();
        let unpadded = encoded.trim_end_matches('=');
        assert_eq!(decompress(unpadded).unwrap(), "hi there");
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(decompress("not base64 !!").is_err());
        // Valid base64, but not a deflate stream.
        assert!(decompress("_____w").is_err());
    }
}
