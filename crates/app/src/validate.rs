use std::fmt;

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 1000;
const EXTRA_TITLE_CHARS: &str = "-_.,!?()";

/// One or more request validation failures, reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    failures: Vec<&'static str>,
}

impl ValidationError {
    pub fn messages(&self) -> &[&'static str] {
        &self.failures
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.failures.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Checks an item payload before it reaches the domain layer.
///
/// The domain enforces its own invariants; this pass rejects obviously
/// malformed input early with every failure listed at once.
pub fn validate_item(title: &str, description: Option<&str>) -> Result<(), ValidationError> {
    let mut failures = Vec::new();

    if title.trim().is_empty() {
        failures.push("Title is required");
    } else {
        if title.chars().count() > MAX_TITLE_CHARS {
            failures.push("Title must not exceed 200 characters");
        }
        if !title.chars().all(is_allowed_title_char) {
            failures.push("Title contains invalid characters");
        }
    }

    if let Some(text) = description {
        if text.chars().count() > MAX_DESCRIPTION_CHARS {
            failures.push("Description must not exceed 1000 characters");
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { failures })
    }
}

fn is_allowed_title_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || EXTRA_TITLE_CHARS.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_titles() {
        validate_item("Buy milk (2 liters), please!", None).expect("valid");
        validate_item("review PR-42", Some("short note")).expect("valid");
    }

    #[test]
    fn rejects_blank_titles() {
        let err = validate_item("   ", None).unwrap_err();
        assert_eq!(err.messages(), ["Title is required"]);
    }

    #[test]
    fn rejects_oversized_titles() {
        let title = "a".repeat(201);
        let err = validate_item(&title, None).unwrap_err();
        assert_eq!(err.messages(), ["Title must not exceed 200 characters"]);
    }

    #[test]
    fn rejects_markup_characters() {
        let err = validate_item("<script>alert(1)</script>", None).unwrap_err();
        assert_eq!(err.messages(), ["Title contains invalid characters"]);
    }

    #[test]
    fn rejects_oversized_descriptions() {
        let text = "d".repeat(1001);
        let err = validate_item("fine", Some(&text)).unwrap_err();
        assert_eq!(err.messages(), ["Description must not exceed 1000 characters"]);
    }

    #[test]
    fn collects_every_failure() {
        let title = format!("<{}>", "a".repeat(201));
        let text = "d".repeat(1001);
        let err = validate_item(&title, Some(&text)).unwrap_err();
        assert_eq!(err.messages().len(), 3);
        assert_eq!(
            err.to_string(),
            "Title must not exceed 200 characters; Title contains invalid characters; \
             Description must not exceed 1000 characters"
        );
    }
}
