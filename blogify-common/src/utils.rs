use chrono::{DateTime, Utc};

/// Assumed reading speed, in words per minute
pub const WORDS_PER_MINUTE: usize = 200;

/// Length of the post previews in the feed and on profiles
pub const PREVIEW_LENGTH: usize = 150;

/// Length of the post previews on the dashboard
pub const DASHBOARD_PREVIEW_LENGTH: usize = 100;

/// What the editor produces when its document is empty
const EMPTY_EDITOR_DOCUMENT: &str = "<p><br></p>";

/// Removes every `<...>` sequence from `content`.
///
/// A `<` that is never closed is kept as regular text.
pub fn strip_tags(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find('<') {
        match rest[start..].find('>') {
            Some(len) => {
                text.push_str(&rest[..start]);
                rest = &rest[start + len + 1..];
            }
            None => break,
        }
    }
    text.push_str(rest);
    text
}

/// Estimates how many minutes it takes to read a post.
///
/// Words are counted by splitting the text (without markup) on the space
/// character only, so an empty post still counts as one word. The result is
/// never below one minute.
pub fn estimate_read_minutes(content: &str) -> u32 {
    let words = strip_tags(content).split(' ').count();
    let minutes = (words + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE;
    minutes.max(1) as u32
}

/// Plain text preview of some HTML content.
///
/// If the text is longer than `max_length` characters, it is cut (possibly in
/// the middle of a word) and `...` is appended.
pub fn truncate_to_plain_text(content: &str, max_length: usize) -> String {
    let text = strip_tags(content);
    match text.char_indices().nth(max_length) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}

/// Turns the comma separated tag field of the editor into a list of tags
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whether some editor content should be considered empty
pub fn is_blank_content(content: &str) -> bool {
    content.trim().is_empty() || content == EMPTY_EDITOR_DOCUMENT
}

/// Formats a date like `January 5, 2024`, or `Jan 5, 2024` when `long` is false
pub fn format_date(date: &DateTime<Utc>, long: bool) -> String {
    if long {
        date.format("%B %-d, %Y").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_strip_tags() {
        let tests = vec![
            ("<p>Hello world</p>", "Hello world"),
            ("no markup", "no markup"),
            ("<h1>Title</h1><p>Some <b>bold</b> text</p>", "TitleSome bold text"),
            ("<a href=\"x\">link</a>", "link"),
            ("1 < 2", "1 < 2"),
            ("a <br/> b", "a  b"),
            ("<p>multi\nline</p>", "multi\nline"),
            ("", ""),
        ];

        for (html, text) in tests {
            assert_eq!(strip_tags(html), text);
        }
    }

    #[test]
    fn test_read_time() {
        assert_eq!(estimate_read_minutes(""), 1);
        assert_eq!(estimate_read_minutes("short"), 1);
        assert_eq!(estimate_read_minutes(&words(200)), 1);
        assert_eq!(estimate_read_minutes(&words(201)), 2);
        assert_eq!(estimate_read_minutes(&words(400)), 2);
        assert_eq!(estimate_read_minutes(&words(401)), 3);
    }

    #[test]
    fn test_read_time_ignores_markup() {
        let html = format!("<p>{}</p><p><img src=\"a b c d\"></p>", words(200));
        assert_eq!(estimate_read_minutes(&html), 1);
    }

    #[test]
    fn test_read_time_splits_on_spaces_only() {
        // newlines don't separate words, consecutive spaces yield empty words
        let newlines = vec!["word"; 300].join("\n");
        assert_eq!(estimate_read_minutes(&newlines), 1);
        let doubled = vec!["word"; 150].join("  ");
        assert_eq!(estimate_read_minutes(&doubled), 2);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_to_plain_text("<p>Hello world</p>", 5), "Hello...");
        assert_eq!(truncate_to_plain_text("short", PREVIEW_LENGTH), "short");
        assert_eq!(truncate_to_plain_text("exactly", 7), "exactly");
        assert_eq!(truncate_to_plain_text("<b>cut me</b> please", 4), "cut ...");
        assert_eq!(truncate_to_plain_text("", 3), "");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_to_plain_text("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_to_plain_text("日本語の文章", 3), "日本語...");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags("rust, web ,, ,async"),
            vec!["rust".to_owned(), "web".to_owned(), "async".to_owned()]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn test_blank_content() {
        assert!(is_blank_content(""));
        assert!(is_blank_content("  \n"));
        assert!(is_blank_content("<p><br></p>"));
        assert!(!is_blank_content("<p>Hi</p>"));
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        assert_eq!(format_date(&date, true), "January 5, 2024");
        assert_eq!(format_date(&date, false), "Jan 5, 2024");
    }
}
