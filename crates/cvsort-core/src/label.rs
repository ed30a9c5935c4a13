/// Label forced onto every record whose filename signals an internship.
pub const INTERNSHIP_LABEL: &str = "Internship";

/// Substrings checked (case-insensitively) against the filename.
///
/// Plain substring containment: "internal_review.pdf" matches as well.
const INTERNSHIP_FILENAME_KEYS: &[&str] = &["intern", "internship", "trainee"];

/// Returns true if the filename indicates an internship posting.
pub fn is_internship_filename(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    INTERNSHIP_FILENAME_KEYS
        .iter()
        .any(|key| lower.contains(key))
}

/// Combine the classifier's raw label with the filename signal.
///
/// The filename wins outright: when `is_internship_filename` is set the result
/// is always [`INTERNSHIP_LABEL`], whatever the model predicted.
pub fn resolve_label(raw_label: &str, is_internship_filename: bool) -> String {
    if is_internship_filename {
        INTERNSHIP_LABEL.to_string()
    } else {
        raw_label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internship_filename_matches() {
        assert!(is_internship_filename("John_Intern_Resume.PDF"));
        assert!(is_internship_filename("summer-INTERNSHIP-2024.docx"));
        assert!(is_internship_filename("Graduate Trainee CV.txt"));
        assert!(is_internship_filename("internal.docx"));
    }

    #[test]
    fn internship_filename_non_matches() {
        assert!(!is_internship_filename("John_Doe.pdf"));
        assert!(!is_internship_filename(""));
        assert!(!is_internship_filename("inter_national.pdf"));
        assert!(!is_internship_filename("train.docx"));
    }

    #[test]
    fn resolve_label_override() {
        assert_eq!(resolve_label("Software Engineer", true), "Internship");
        assert_eq!(resolve_label("Internship", true), "Internship");
        assert_eq!(resolve_label("", true), "Internship");
    }

    #[test]
    fn resolve_label_passthrough() {
        assert_eq!(resolve_label("Software Engineer", false), "Software Engineer");
        assert_eq!(resolve_label("", false), "");
    }
}
