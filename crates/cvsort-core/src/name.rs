use once_cell::sync::Lazy;
use regex::Regex;

/// Returned by [`resolve_name`] when no heuristic produced a name.
pub const NOT_FOUND: &str = "Not Found";

/// Only this many leading lines are considered by the first-line heuristic.
const MAX_SCANNED_LINES: usize = 12;
/// Lines longer than this (in characters) are never treated as a name.
const MAX_NAME_LINE_CHARS: usize = 80;
const MIN_NAME_TOKENS: usize = 2;
const MAX_NAME_TOKENS: usize = 4;

/// Extract a display name from resume text.
///
/// Tries, in order, stopping at the first hit:
/// - a labeled field such as `Name: Jane A. Smith`
/// - the first plausible name line among the first 12 lines
///
/// Falls back to [`NOT_FOUND`]. Never fails; malformed or empty input simply
/// reaches the fallback.
pub fn resolve_name(text: &str) -> String {
    if text.is_empty() {
        return NOT_FOUND.to_string();
    }

    if let Some(name) = try_labeled_field(text) {
        return name;
    }

    if let Some(name) = try_first_plausible_line(text) {
        return name;
    }

    NOT_FOUND.to_string()
}

/// `name` (any case) followed by a short `:`/`-`/whitespace separator and a
/// capitalized run of name characters, at most 80 long.
fn try_labeled_field(text: &str) -> Option<String> {
    static LABELED_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i:\bname)[:\-\s]{1,6}([A-Z][A-Za-z ,.'\-]{1,79})").unwrap()
    });

    let caps = LABELED_RE.captures(text)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn try_first_plausible_line(text: &str) -> Option<String> {
    split_lines(text)
        .take(MAX_SCANNED_LINES)
        .map(str::trim)
        .find(|line| is_plausible_name_line(line))
        .map(str::to_string)
}

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL and the Unicode line and paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on every line break, with `\r\n` counting as one. A trailing break
/// does not start an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(start) = rest.find(is_line_break) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..start];
        let tail = &rest[start..];
        let break_len = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[break_len..];
        Some(line)
    })
}

/// Whether an already-trimmed line looks like a bare name.
fn is_plausible_name_line(line: &str) -> bool {
    // Decimal digits in any script; fractions and roman numerals are allowed.
    static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Nd}").unwrap());
    static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\b(?:resume|curriculum|cv|objective|summary|profile)\b").unwrap()
    });

    if line.is_empty() || line.chars().count() > MAX_NAME_LINE_CHARS {
        return false;
    }
    let tokens = line.split_whitespace().count();
    if !(MIN_NAME_TOKENS..=MAX_NAME_TOKENS).contains(&tokens) {
        return false;
    }
    if DIGIT_RE.is_match(line) {
        return false;
    }
    !HEADING_RE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_field() {
        assert_eq!(
            resolve_name("Name: Jane A. Smith\nEmail: jane@example.com"),
            "Jane A. Smith"
        );
    }

    #[test]
    fn test_labeled_field_variants() {
        assert_eq!(resolve_name("NAME - O'Brien, Pat"), "O'Brien, Pat");
        assert_eq!(resolve_name("Full name:\n  Mary-Jane Watson  \n"), "Mary-Jane Watson");
        assert_eq!(resolve_name("candidate name\tLee Chong Wei"), "Lee Chong Wei");
    }

    #[test]
    fn test_labeled_field_wins_over_first_line() {
        let text = "John Michael Doe\nSoftware Engineer\nName: Jonathan Doe\n";
        assert_eq!(resolve_name(text), "Jonathan Doe");
    }

    #[test]
    fn test_labeled_field_requires_capital() {
        // Lower-case value after the label does not count as a name.
        let text = "name: not provided by applicant\nAda Lovelace\n";
        assert_eq!(resolve_name(text), "Ada Lovelace");
    }

    #[test]
    fn test_labeled_field_needs_word_boundary() {
        // "Username" is not a name label.
        let text = "Username: Jsmith42\nJohn Smith\n";
        assert_eq!(resolve_name(text), "John Smith");
    }

    #[test]
    fn test_labeled_field_separator_limit() {
        // Nine separator characters exceed the 1..=6 window.
        let text = format!("Name:{}Bob Jones Smith Extra\n", " ".repeat(8));
        assert_eq!(resolve_name(&text), NOT_FOUND);
    }

    #[test]
    fn test_labeled_field_run_capped_at_80() {
        let long = format!("Name: A{}", "b".repeat(200));
        let name = resolve_name(&long);
        assert_eq!(name.chars().count(), 80);
        assert!(name.starts_with("Ab"));
    }

    #[test]
    fn test_first_plausible_line_third() {
        let text = "RESUME\n\nJohn Michael Doe\njohn@example.com\n";
        assert_eq!(resolve_name(text), "John Michael Doe");
    }

    #[test]
    fn test_curriculum_line_skipped() {
        let text = "Curriculum Vitae\nJohn Doe\nExperience\n";
        assert_eq!(resolve_name(text), "John Doe");
    }

    #[test]
    fn test_heading_keywords_are_whole_words() {
        // "Profiled" is not the keyword "profile".
        assert_eq!(resolve_name("Profiled Person\n"), "Profiled Person");
        assert_eq!(resolve_name("My CV\nAnna Bell\n"), "Anna Bell");
        assert_eq!(resolve_name("Professional Summary\nAnna Bell\n"), "Anna Bell");
        assert_eq!(resolve_name("Career Objective\nAnna Bell\n"), "Anna Bell");
    }

    #[test]
    fn test_token_count_bounds() {
        assert_eq!(resolve_name("Madonna\nTwo Words\n"), "Two Words");
        assert_eq!(
            resolve_name("One Two Three Four Five\nAlan Mathison Turing Jr\n"),
            "Alan Mathison Turing Jr"
        );
    }

    #[test]
    fn test_lines_with_digits_skipped() {
        let text = "Flat 4 Baker Street\n+44 20 7946 0958\nSherlock Holmes\n";
        assert_eq!(resolve_name(text), "Sherlock Holmes");
    }

    #[test]
    fn test_only_decimal_digits_reject_a_line() {
        assert_eq!(resolve_name("Louis ½ Martin\nAnna Bell\n"), "Louis ½ Martin");
        assert_eq!(resolve_name("Henry Ⅻ Tudor\n"), "Henry Ⅻ Tudor");
        assert_eq!(resolve_name("Flat ٣ Cairo\nAnna Bell\n"), "Anna Bell");
    }

    #[test]
    fn test_carriage_return_only_line_endings() {
        assert_eq!(resolve_name("RESUME\rJane Doe\rjane@x.com\r"), "Jane Doe");
    }

    #[test]
    fn test_form_feed_and_unicode_separators_break_lines() {
        assert_eq!(resolve_name("Curriculum Vitae\x0cJohn Doe\n"), "John Doe");
        assert_eq!(resolve_name("Profile\u{2028}Mei Lin\u{2029}Engineer"), "Mei Lin");
        assert_eq!(resolve_name("CV\x0bRavi Shankar\x1eSkills"), "Ravi Shankar");
    }

    #[test]
    fn test_crlf_counts_as_one_line() {
        let mut text = "x\r\n".repeat(11);
        text.push_str("Just In Time\r\n");
        assert_eq!(resolve_name(&text), "Just In Time");

        let mut text = "x\r\n".repeat(12);
        text.push_str("Late Arrival\r\n");
        assert_eq!(resolve_name(&text), NOT_FOUND);
    }

    #[test]
    fn test_split_lines_boundaries() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\n\nd\u{85}e\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d", "e"]);
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("solo").collect::<Vec<_>>(), vec!["solo"]);
    }

    #[test]
    fn test_line_is_trimmed() {
        assert_eq!(resolve_name("   Grace Hopper   \n"), "Grace Hopper");
    }

    #[test]
    fn test_overlong_line_skipped() {
        let long = format!("{} {}", "A".repeat(40), "B".repeat(41));
        let text = format!("{}\nKatherine Johnson\n", long);
        assert_eq!(resolve_name(&text), "Katherine Johnson");
    }

    #[test]
    fn test_only_first_twelve_lines() {
        let mut text = "x\n".repeat(12);
        text.push_str("Late Name\n");
        assert_eq!(resolve_name(&text), NOT_FOUND);

        let mut text = "x\n".repeat(11);
        text.push_str("Just In Time\n");
        assert_eq!(resolve_name(&text), "Just In Time");
    }

    #[test]
    fn test_empty_and_unmatched() {
        assert_eq!(resolve_name(""), NOT_FOUND);
        assert_eq!(resolve_name("   \n\n"), NOT_FOUND);
        assert_eq!(resolve_name("SKILLS\nPython\n2019-2023\n"), NOT_FOUND);
    }

    #[test]
    fn test_deterministic() {
        let text = "Curriculum Vitae\nJohn Doe\n";
        assert_eq!(resolve_name(text), resolve_name(text));
    }
}
