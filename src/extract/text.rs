use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Decodes plain text in its detected encoding, replacing malformed sequences.
pub fn decode(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed: &'static Encoding = detector.guess(None, true);

    // A byte-order mark overrides the guess.
    let (text, used, had_errors) = guessed.decode(bytes);
    if had_errors {
        tracing::debug!("Replaced malformed sequences while decoding as {}", used.name());
    }
    text.into_owned()
}
