use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;

/// Reads a text file whose charset is unknown. A UTF-8 BOM wins outright;
/// otherwise the detector guesses and the bytes are decoded with
/// replacement on error, so an odd legacy export still loads.
pub fn read_to_string(path: &Path) -> Result<String, String> {
    let bytes = fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;

    // BOM UTF-8 (EF BB BF)
    if let Some(stripped) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return match std::str::from_utf8(stripped) {
            Ok(s) => Ok(s.to_string()),
            Err(e) => Err(format!("{}: invalid UTF-8 after BOM: {e}", path.display())),
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&bytes, true);
    let encoding = detector.guess(None, true);

    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        eprintln!(
            "[table] {} decoded as {} with replacement characters",
            path.display(),
            encoding.name()
        );
    }

    Ok(text.into_owned())
}
