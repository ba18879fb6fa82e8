//! Intent classification — command trigger vs. open question.
//!
//! Pure functions, no I/O.

use crate::types::Intent;

/// Trigger word that marks an utterance as an "open application" command.
pub const COMMAND_TRIGGER: &str = "buka";

/// Classify normalized text.
///
/// `buka <name>` (trigger matched case-insensitively, as a whole word)
/// becomes a command for the trimmed remainder. Everything else, including a
/// bare `buka`, is a query carrying the input unchanged.
pub fn classify(text: &str) -> Intent {
    match command_target(text) {
        Some(target_name) => Intent::Command {
            target_name: target_name.to_string(),
        },
        None => Intent::Query {
            text: text.to_string(),
        },
    }
}

/// Extract the command target, if `text` starts with the trigger word
/// followed by a non-empty remainder.
fn command_target(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    let head = trimmed.get(..COMMAND_TRIGGER.len())?;
    if !head.eq_ignore_ascii_case(COMMAND_TRIGGER) {
        return None;
    }

    let rest = &trimmed[COMMAND_TRIGGER.len()..];
    // "bukalapak" is not "buka lapak"
    if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
        return None;
    }

    let target = rest.trim();
    (!target.is_empty()).then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(name: &str) -> Intent {
        Intent::Command {
            target_name: name.to_string(),
        }
    }

    fn query(text: &str) -> Intent {
        Intent::Query {
            text: text.to_string(),
        }
    }

    #[test]
    fn trigger_with_target_is_command() {
        assert_eq!(classify("buka calculator"), command("calculator"));
    }

    #[test]
    fn target_is_trimmed() {
        assert_eq!(classify("buka    notepad  "), command("notepad"));
    }

    #[test]
    fn multi_word_target() {
        assert_eq!(classify("buka visual studio code"), command("visual studio code"));
    }

    #[test]
    fn trigger_is_case_insensitive() {
        assert_eq!(classify("BUKA Calculator"), command("Calculator"));
        assert_eq!(classify("Buka paint"), command("paint"));
    }

    #[test]
    fn bare_trigger_falls_back_to_query() {
        assert_eq!(classify("buka"), query("buka"));
        assert_eq!(classify("buka   "), query("buka   "));
    }

    #[test]
    fn trigger_must_be_whole_word() {
        assert_eq!(classify("bukalapak itu apa"), query("bukalapak itu apa"));
    }

    #[test]
    fn trigger_must_be_prefix() {
        assert_eq!(
            classify("tolong buka calculator"),
            query("tolong buka calculator")
        );
    }

    #[test]
    fn queries_are_passed_through_unchanged() {
        for text in ["siapa presiden pertama indonesia?", "", "  spasi  ", "bu", "ñandú"] {
            assert_eq!(classify(text), query(text));
        }
    }

    #[test]
    fn multibyte_prefix_does_not_panic() {
        assert_eq!(classify("bük"), query("bük"));
        assert_eq!(classify("日本語のテキスト"), query("日本語のテキスト"));
    }
}
