use std::borrow::Cow;

/// Returned when nothing usable survives sanitization
pub const PLACEHOLDER_FILENAME: &str = "unnamed-file";

fn is_portable_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-')
}

/// True when `name` already uses only the portable filename character set
pub fn is_portable(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_portable_char) && !name.chars().all(|c| c == '.')
}

/// Makes a user supplied filename safe for every backend.
///
/// Non-portable input is transliterated to ASCII, every remaining character
/// outside `[A-Za-z0-9._-]` becomes a hyphen and hyphen runs collapse.
/// Leading/trailing `-._` are trimmed on both paths. The result is never
/// empty and `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(name: &str) -> String {
    let portable: Cow<'_, str> = if is_portable(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(substitute(name))
    };

    let trimmed = portable.trim_matches(|c| matches!(c, '-' | '.' | '_'));
    if trimmed.is_empty() {
        PLACEHOLDER_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

fn substitute(name: &str) -> String {
    let ascii: Cow<'_, str> = if name.is_ascii() {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(deunicode::deunicode_with_tofu(name, "-"))
    };

    let mut out = String::with_capacity(ascii.len());
    for ch in ascii.chars() {
        let ch = if is_portable_char(ch) { ch } else { '-' };
        if ch == '-' && out.ends_with('-') {
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_clean(out: &str) {
        assert!(!out.is_empty());
        assert!(out.chars().all(is_portable_char), "unexpected char in {out:?}");
    }

    #[test]
    fn test_transliterates_accents() {
        assert_eq!(sanitize("café été.png"), "cafe-ete.png");
        assert_eq!(sanitize("Ñandú.JPG"), "Nandu.JPG");
    }

    #[test]
    fn test_portable_input_untouched() {
        assert_eq!(sanitize("report-2024_v1.pdf"), "report-2024_v1.pdf");
        assert_eq!(sanitize("a--b.tar.gz"), "a--b.tar.gz");
    }

    #[test]
    fn test_edges_trimmed_on_both_paths() {
        assert_eq!(sanitize("-a-"), "a");
        assert_eq!(sanitize("-a b-"), "a-b");
        assert_eq!(sanitize(".htaccess"), "htaccess");
        assert_eq!(sanitize("_draft_.txt_"), "draft_.txt");
        assert_eq!(sanitize("-_-"), PLACEHOLDER_FILENAME);
    }

    #[test]
    fn test_ascii_with_unsafe_characters() {
        assert_eq!(sanitize("my file (1).png"), "my-file-1-.png");
        assert_eq!(sanitize("a/b\\c.txt"), "a-b-c.txt");
        assert_eq!(sanitize("  spaced  "), "spaced");
    }

    #[test]
    fn test_never_empty() {
        for input in ["", "   ", "..", ".", "???", "\u{0}"] {
            assert_eq!(sanitize(input), PLACEHOLDER_FILENAME, "{input:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "café été.png",
            "北京 地图.png",
            "Привет мир.txt",
            "emoji 😀 party.gif",
            "--weird--name--.",
            "a..b",
            "   ",
            "plain.txt",
            "ℌello ﬁle.md",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_clean(&once);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_placeholder_is_stable() {
        assert!(is_portable(PLACEHOLDER_FILENAME));
        assert_eq!(sanitize(PLACEHOLDER_FILENAME), PLACEHOLDER_FILENAME);
    }
}
