//! Conversation title derivation.

/// Characters kept from the first utterance when deriving a title.
const TITLE_MAX_CHARS: usize = 50;

/// Marker appended when the utterance was truncated.
const TRUNCATION_MARKER: &str = "...";

/// Derive a conversation title from the first user utterance.
///
/// Utterances of at most 50 characters become the title verbatim; longer
/// ones are cut to a 50-character prefix followed by `...`. Counted in
/// characters, not bytes, so multi-byte text is never split mid-character.
pub fn derive_title(utterance: &str) -> String {
    let mut chars = utterance.char_indices();
    match chars.nth(TITLE_MAX_CHARS) {
        None => utterance.to_string(),
        Some((byte_idx, _)) => format!("{}{}", &utterance[..byte_idx], TRUNCATION_MARKER),
    }
}
