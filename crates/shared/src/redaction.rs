//! Secret detection for log field redaction.
//!
//! Used by the JSON encoder to blank out field values whose keys look like
//! credentials before a record reaches the log file.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// Upper-cased fragments that mark a word of a key as sensitive.
const SECRET_MARKERS: [&str; 5] = ["TOKEN", "SECRET", "PASSWORD", "CREDENTIAL", "AUTH"];

/// Words that are sensitive only when qualified, as in `api_key` or `privateKey`.
const QUALIFIED_SECRET_WORDS: [&str; 2] = ["KEY", "KEYS"];

/// Checks if a field key likely refers to a secret.
///
/// The key is split into words at `_`, `-`, `.` and `camelCase` boundaries.
/// A word containing a marker such as `TOKEN` makes the key secret; `KEY`
/// counts only as a whole word following another word, so `key`, `keyspace`
/// and `monkey` are left alone.
///
/// # Examples
///
/// ```
/// use itrlog_shared::is_secret_key;
///
/// assert!(is_secret_key("apiKey"));
/// assert!(is_secret_key("db_password"));
/// assert!(!is_secret_key("user_id"));
/// assert!(!is_secret_key("keyspace"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    key_words(key).iter().enumerate().any(|(index, word)| {
        (index > 0 && QUALIFIED_SECRET_WORDS.contains(&word.as_str()))
            || SECRET_MARKERS.iter().any(|marker| word.contains(marker))
    })
}

/// Upper-cased words of `key`.
fn key_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous: Option<char> = None;

    for (index, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous = None;
            continue;
        }

        if ch.is_ascii_uppercase() && !current.is_empty() {
            let next_is_lower = chars.get(index + 1).is_some_and(char::is_ascii_lowercase);
            let boundary = previous.is_some_and(|previous| {
                previous.is_ascii_lowercase()
                    || previous.is_ascii_digit()
                    || (previous.is_ascii_uppercase() && next_is_lower)
            });
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch.to_ascii_uppercase());
        previous = Some(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
