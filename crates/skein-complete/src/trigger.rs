use skein_scene::paths::SCRIPT_EXTENSION;

/// Decide whether address completion applies at the caret.
///
/// True only for engine script files, and only when the text before the caret
/// is an in-progress address literal:
///
/// - ends with `"` — a bare address is being opened,
/// - ends with `#` inside an open address — a fragment is being typed,
/// - ends with `"`, word characters, `:` — a socket qualifier (`"main:`).
///
/// Anything else, including a closed quoted string, is false. Pure predicate,
/// no side effects.
pub fn should_trigger(extension: &str, line_prefix: &str) -> bool {
    if extension != SCRIPT_EXTENSION {
        return false;
    }
    line_prefix.ends_with('"')
        || ends_open_fragment(line_prefix)
        || ends_open_socket(line_prefix)
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_address(c: char) -> bool {
    is_word(c) || matches!(c, ':' | '/' | '.' | '-')
}

/// `"` + address characters + `#` at the end of the prefix.
fn ends_open_fragment(prefix: &str) -> bool {
    let Some(rest) = prefix.strip_suffix('#') else {
        return false;
    };
    rest.trim_end_matches(is_address).ends_with('"')
}

/// `"` + one-or-more word characters + `:` at the end of the prefix.
fn ends_open_socket(prefix: &str) -> bool {
    let Some(rest) = prefix.strip_suffix(':') else {
        return false;
    };
    let trimmed = rest.trim_end_matches(is_word);
    trimmed.len() < rest.len() && trimmed.ends_with('"')
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn open_quote_triggers() {
        assert!(should_trigger("script", "local x = go.get(\""));
    }

    #[test]
    fn open_fragment_triggers() {
        assert!(should_trigger("script", "local x = go.get(\"go#"));
        assert!(should_trigger("script", "local x = go.get(\"#"));
        assert!(should_trigger("script", "local x = go.get(\"main:/hero#"));
    }

    #[test]
    fn open_socket_triggers() {
        assert!(should_trigger("script", "local x = go.get(\"go:"));
        assert!(should_trigger("script", "msg.post(\"main:"));
    }

    #[test]
    fn closed_quote_does_not_trigger() {
        assert!(!should_trigger("script", "local x = go.get(\"go\")"));
    }

    #[test]
    fn socket_needs_at_least_one_word_char() {
        assert!(!should_trigger("script", "local x = go.get(\":"));
    }

    #[test]
    fn fragment_needs_an_open_quote() {
        assert!(!should_trigger("script", "-- a stray fragment #"));
        assert!(!should_trigger("script", "local c = a # b"));
    }

    #[test]
    fn plain_code_does_not_trigger() {
        assert!(!should_trigger("script", "local x = 1"));
        assert!(!should_trigger("script", ""));
    }

    #[test]
    fn non_script_files_never_trigger() {
        assert!(!should_trigger("lua", "local x = go.get(\""));
        assert!(!should_trigger("collection", "url: \""));
        assert!(!should_trigger("", "\""));
    }

    proptest! {
        #[test]
        fn total_over_arbitrary_prefixes(prefix in ".*") {
            // Never panics, and never fires outside script files.
            let _ = should_trigger("script", &prefix);
            prop_assert!(!should_trigger("txt", &prefix));
        }

        #[test]
        fn open_quote_always_triggers_in_scripts(code in "[a-z ().=]*") {
            let line = format!("{code}\"");
            prop_assert!(should_trigger("script", &line));
        }
    }
}
