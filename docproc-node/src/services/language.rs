use tracing::debug;

pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Bounded prefix of `text` for language detection.
///
/// Inputs of at most `max_chars` characters come back unchanged. Longer inputs
/// are cut at the last whitespace at or before the cap so no word is split; if
/// there is no such whitespace the cut is made at the cap itself.
pub fn get_sample_text(text: &str, max_chars: usize) -> &str {
    let mut last_whitespace = None;

    for (index, (offset, ch)) in text.char_indices().enumerate() {
        if index == max_chars {
            if ch.is_whitespace() {
                return &text[..offset];
            }
            return match last_whitespace {
                Some(boundary) => &text[..boundary],
                None => &text[..offset],
            };
        }
        if ch.is_whitespace() {
            last_whitespace = Some(offset);
        }
    }

    text
}

/// ISO 639-3 code of the dominant language, or `"unknown"` when the sample is
/// too short or ambiguous for a reliable guess.
pub fn detect_language(sample: &str) -> String {
    match whatlang::detect(sample) {
        Some(info) if info.is_reliable() => info.lang().code().to_string(),
        Some(info) => {
            debug!(
                sample_len = sample.len(),
                guess = info.lang().code(),
                confidence = info.confidence(),
                "Language guess is not reliable"
            );
            UNKNOWN_LANGUAGE.to_string()
        }
        None => {
            debug!(sample_len = sample.len(), "Language could not be detected");
            UNKNOWN_LANGUAGE.to_string()
        }
    }
}
