//! Small text helpers shared by decomposition and prompt generation.

/// Return the first keyword contained in `text`, ignoring case.
pub fn first_keyword_hit<'a>(text: &str, keywords: &[&'a str]) -> Option<&'a str> {
    let lower = text.to_lowercase();
    keywords.iter().copied().find(|k| lower.contains(k))
}

/// Split a block of action text into paragraphs on blank lines.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

/// Truncate to at most `max_chars` characters without splitting a word.
///
/// A single word longer than the limit is cut at the character boundary.
pub fn truncate_at_word(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    // If the next char continues a word, back off to the last whitespace.
    let next_is_space = text
        .chars()
        .nth(max_chars)
        .is_some_and(|c| c.is_whitespace());
    if next_is_space {
        return cut.trim_end().to_string();
    }
    match cut.rfind(char::is_whitespace) {
        Some(pos) => cut[..pos].trim_end().to_string(),
        None => cut,
    }
}

/// True if `text` introduces a character screenplay-style: `NAME, 34`.
///
/// The name is an upper-case word of at least two letters directly before a
/// comma, and the comma is followed by a number.
pub fn has_character_introduction(text: &str) -> bool {
    for (pos, c) in text.char_indices() {
        if c != ',' {
            continue;
        }
        let after = text[pos + 1..].trim_start();
        if !after.starts_with(|ch: char| ch.is_ascii_digit()) {
            continue;
        }
        let before = &text[..pos];
        let Some(word) = before.split_whitespace().last() else {
            continue;
        };
        let letters: Vec<char> = word.chars().filter(|ch| ch.is_alphabetic()).collect();
        let name_like = word
            .chars()
            .all(|ch| ch.is_alphabetic() || ch == '\'' || ch == '-' || ch == '.');
        if name_like && letters.len() >= 2 && letters.iter().all(|ch| ch.is_uppercase()) {
            return true;
        }
    }
    false
}

/// Join non-empty parts with `", "`.
pub fn join_parts<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
