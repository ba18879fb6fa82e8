//! Text preparation for speech synthesis — markdown stripping and chunking.
//!
//! Pure functions, no I/O. Model answers arrive as markdown; the speech
//! engine should only ever see prose.

use std::sync::LazyLock;

use regex::Regex;

/// Longest chunk the Google Translate TTS endpoint accepts in one request.
pub const MAX_SPEECH_CHUNK_CHARS: usize = 100;

/// Ordered rewrite rules. Fences go before inline code, bold before italic.
static MARKDOWN_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?s)```.*?```", " "),
        (r"`([^`]+)`", "$1"),
        (r"(?m)^\s*[-*_]{3,}\s*$", ""),
        (r"\*\*([^*]+)\*\*", "$1"),
        (r"__([^_]+)__", "$1"),
        (r"\*([^*\n]+)\*", "$1"),
        (r"(?m)^\s*#{1,6}\s*", ""),
        (r"!?\[([^\]]+)\]\([^)]*\)", "$1"),
        (r"(?m)^\s*(?:[-*+]|\d+[.)])\s+", ""),
        (r"(?m)^\s*>\s?", ""),
        (r"\|", " "),
        (r"\s+", " "),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Strip markdown so an answer reads naturally when spoken.
pub fn clean_text_for_speech(text: &str) -> String {
    let mut cleaned = text.to_string();
    for (re, replacement) in MARKDOWN_RULES.iter() {
        cleaned = re.replace_all(&cleaned, *replacement).into_owned();
    }
    cleaned.trim().to_string()
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Prefers sentence boundaries (`.`, `!`, `?`, `,` followed by a space) in
/// the second half of the window, then the last space, then hard-splits.
/// Whitespace-only chunks are dropped.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut remaining = text.trim();

    while remaining.chars().count() > max_chars {
        // Byte offset just past the `max_chars`-th character.
        let window_end = remaining
            .char_indices()
            .nth(max_chars)
            .map_or(remaining.len(), |(i, _)| i);
        let window = &remaining[..window_end];

        let split_at = sentence_break(window)
            .or_else(|| word_break(window))
            .unwrap_or(window_end);

        let chunk = remaining[..split_at].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }
        remaining = remaining[split_at..].trim_start();
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }
    chunks
}

fn sentence_break(window: &str) -> Option<usize> {
    let half = window.len() / 2;
    window
        .char_indices()
        .filter(|&(i, c)| {
            matches!(c, '.' | '!' | '?' | ',' | ';' | ':')
                && i >= half
                && window[i + c.len_utf8()..].starts_with(' ')
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()
}

fn word_break(window: &str) -> Option<usize> {
    window.rfind(' ').filter(|&pos| pos > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── clean_text_for_speech ───────────────────────────────────────

    #[test]
    fn every_markdown_rule_compiles() {
        assert_eq!(MARKDOWN_RULES.len(), 12);
    }

    #[test]
    fn strips_emphasis() {
        assert_eq!(
            clean_text_for_speech("Ibu kota **Indonesia** adalah *Jakarta*."),
            "Ibu kota Indonesia adalah Jakarta."
        );
    }

    #[test]
    fn strips_headings_and_bullets() {
        let cleaned = clean_text_for_speech("## Jawaban\n\n- satu\n- dua\n1. tiga");
        assert_eq!(cleaned, "Jawaban satu dua tiga");
    }

    #[test]
    fn drops_code_fences() {
        let cleaned = clean_text_for_speech("Contoh:\n```rust\nfn main() {}\n```\nselesai");
        assert_eq!(cleaned, "Contoh: selesai");
    }

    #[test]
    fn keeps_link_text() {
        assert_eq!(
            clean_text_for_speech("lihat [dokumentasi](https://example.com) ini"),
            "lihat dokumentasi ini"
        );
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(clean_text_for_speech("Halo, apa kabar?"), "Halo, apa kabar?");
    }

    #[test]
    fn empty_input() {
        assert_eq!(clean_text_for_speech(""), "");
    }

    // ── split_for_speech ────────────────────────────────────────────

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_for_speech("Halo dunia.", 100), vec!["Halo dunia."]);
    }

    #[test]
    fn prefers_sentence_boundary() {
        let text = "Kalimat pertama cukup panjang di sini. Kalimat kedua juga lumayan panjang sekali.";
        let chunks = split_for_speech(text, 50);
        assert_eq!(chunks[0], "Kalimat pertama cukup panjang di sini.");
        assert!(chunks.iter().all(|c| c.chars().count() <= 50));
    }

    #[test]
    fn falls_back_to_word_boundary() {
        let text = "kata ".repeat(40);
        let chunks = split_for_speech(&text, 30);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 30, "chunk too long: {chunk}");
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }
    }

    #[test]
    fn hard_splits_long_word() {
        let text = "a".repeat(250);
        let chunks = split_for_speech(&text, 100);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 50);
    }

    #[test]
    fn multibyte_text_never_splits_inside_a_char() {
        let text = "é".repeat(150);
        let chunks = split_for_speech(&text, 100);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
    }

    #[test]
    fn preserves_all_words() {
        let text = "Pancasila adalah dasar negara Indonesia. Ia terdiri dari lima sila yang menjadi pedoman hidup berbangsa dan bernegara.";
        let joined = split_for_speech(text, 40).join(" ");
        for word in text.split_whitespace() {
            assert!(joined.contains(word), "missing word: {word}");
        }
    }
}
