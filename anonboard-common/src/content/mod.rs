//! Checks applied to user-entered text before it is submitted.
//!
//! Validation is advisory: the backend re-validates every submission with the
//! same rules, so the patterns here must stay textually compatible with it.

pub mod filter;
pub mod preview;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Maximum length of a post or comment, in characters.
pub const MAX_CONTENT_LEN: usize = 5000;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        r"(https?://|www\.)\S+|[a-zA-Z0-9-]+\.(com|net|org|edu|gov|io|co|app|dev)\S*",
    )
    .case_insensitive(true)
    .build()
    .expect("Invalid url regex")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)")
        .expect("Invalid email regex")
});

static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}|[0-9]{10,}")
        .expect("Invalid phone regex")
});

static HANDLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("Invalid handle regex"));

#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    #[error("Content cannot be empty")]
    EmptyContent,
    #[error("Content exceeds maximum length of 5000 characters")]
    ContentTooLong,
    #[error("URLs and links are not allowed")]
    UrlNotAllowed,
    #[error("Email addresses are not allowed")]
    EmailNotAllowed,
    #[error("Phone numbers are not allowed")]
    PhoneNotAllowed,
    #[error("Social media handles are not allowed")]
    HandleNotAllowed,
}

/// Violations in the order the checks ran. Empty means the text may be
/// submitted.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Error, Serialize, Deserialize)]
#[serde(transparent)]
#[error("{}", join_messages(.0))]
pub struct Violations(Vec<ViolationKind>);

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct ContentDraft {
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct ReportedViolation {
    pub kind: ViolationKind,
    pub message: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<ReportedViolation>,
}

fn join_messages(kinds: &[ViolationKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ViolationKind {
    #[must_use]
    pub fn message(self) -> String {
        self.to_string()
    }
}

impl Violations {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, kind: ViolationKind) -> bool {
        self.0.contains(&kind)
    }

    #[must_use]
    pub fn kinds(&self) -> &[ViolationKind] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = ViolationKind> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.iter().map(ViolationKind::message).collect()
    }

    fn push_if(&mut self, triggered: bool, kind: ViolationKind) {
        if triggered {
            self.0.push(kind);
        }
    }
}

impl From<Violations> for Vec<ViolationKind> {
    fn from(value: Violations) -> Self {
        value.0
    }
}

impl IntoIterator for Violations {
    type Item = ViolationKind;
    type IntoIter = std::vec::IntoIter<ViolationKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl ContentDraft {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn validate(&self) -> Violations {
        validate(&self.content)
    }
}

impl From<&Violations> for ValidationReport {
    fn from(value: &Violations) -> Self {
        Self {
            valid: value.is_empty(),
            violations: value
                .iter()
                .map(|kind| ReportedViolation {
                    kind,
                    message: kind.message(),
                })
                .collect(),
        }
    }
}

/// Runs every check against `text`, without stopping at the first failure.
///
/// Blank text only ever reports [`ViolationKind::EmptyContent`]. The pattern
/// checks see the raw, untrimmed text.
#[must_use]
pub fn validate(text: &str) -> Violations {
    let mut violations = Violations::default();

    let blank = text.trim().is_empty();
    violations.push_if(blank, ViolationKind::EmptyContent);
    violations.push_if(
        !blank && text.chars().count() > MAX_CONTENT_LEN,
        ViolationKind::ContentTooLong,
    );
    push_prohibited(&mut violations, text);

    violations
}

fn push_prohibited(violations: &mut Violations, text: &str) {
    violations.push_if(URL_REGEX.is_match(text), ViolationKind::UrlNotAllowed);
    violations.push_if(EMAIL_REGEX.is_match(text), ViolationKind::EmailNotAllowed);
    violations.push_if(PHONE_REGEX.is_match(text), ViolationKind::PhoneNotAllowed);
    violations.push_if(HANDLE_REGEX.is_match(text), ViolationKind::HandleNotAllowed);
}

#[cfg(test)]
mod tests {
    use crate::content::{
        ContentDraft, MAX_CONTENT_LEN, ValidationReport, ViolationKind, Violations, validate,
    };

    fn kinds(text: &str) -> Vec<ViolationKind> {
        validate(text).into()
    }

    #[test]
    fn blank_text_is_only_empty() {
        for text in ["", " ", "\t\n  ", "\u{a0}\u{2003}"] {
            assert_eq!(kinds(text), [ViolationKind::EmptyContent], "{text:?}");
        }

        let long_blank = " ".repeat(MAX_CONTENT_LEN + 10);
        assert_eq!(kinds(&long_blank), [ViolationKind::EmptyContent]);
    }

    #[test]
    fn too_long() {
        let at_limit = "a".repeat(MAX_CONTENT_LEN);
        assert!(validate(&at_limit).is_empty());

        let over_limit = "a".repeat(MAX_CONTENT_LEN + 1);
        assert_eq!(kinds(&over_limit), [ViolationKind::ContentTooLong]);

        // Characters, not bytes.
        let multibyte = "ü".repeat(MAX_CONTENT_LEN);
        assert!(validate(&multibyte).is_empty());
    }

    #[test]
    fn url_and_email_in_order() {
        let violations = kinds("check http://example.com and a@b.com");

        assert!(!violations.contains(&ViolationKind::EmptyContent));
        assert!(!violations.contains(&ViolationKind::ContentTooLong));

        let url = violations
            .iter()
            .position(|kind| *kind == ViolationKind::UrlNotAllowed)
            .unwrap();
        let email = violations
            .iter()
            .position(|kind| *kind == ViolationKind::EmailNotAllowed)
            .unwrap();
        assert!(url < email);
    }

    #[test]
    fn urls() {
        for text in [
            "see https://example.org/page",
            "go to www.something",
            "my site is cool-site.dev",
            "VISIT EXAMPLE.COM NOW",
            "stuff.io",
        ] {
            assert!(
                validate(text).contains(ViolationKind::UrlNotAllowed),
                "{text:?}"
            );
        }

        assert!(!validate("a sentence. another one.").contains(ViolationKind::UrlNotAllowed));
    }

    #[test]
    fn emails() {
        assert!(
            validate("mail first.last+tag@mail.example.de").contains(ViolationKind::EmailNotAllowed)
        );
        assert!(!validate("mail me at a@b.c").contains(ViolationKind::EmailNotAllowed));
    }

    #[test]
    fn phone_numbers() {
        for text in [
            "call me at 555-123-4567",
            "call (555) 123 4567",
            "+1 555.123.4567",
            "5551234567",
            "order 123456789012345",
        ] {
            assert!(
                validate(text).contains(ViolationKind::PhoneNotAllowed),
                "{text:?}"
            );
        }

        assert!(!validate("I am 25 and have 3 cats").contains(ViolationKind::PhoneNotAllowed));
    }

    #[test]
    fn handles() {
        assert_eq!(kinds("follow @someone"), [ViolationKind::HandleNotAllowed]);
        assert!(kinds("meet @ noon").is_empty());
    }

    #[test]
    fn clean_text() {
        assert!(validate("just a normal sentence.").is_empty());
        assert!(ContentDraft::new("Had a great day today!").validate().is_empty());
    }

    #[test]
    fn every_check_runs() {
        let text = format!("{} www.x.com me@mail.com 5551234567", "a".repeat(MAX_CONTENT_LEN));

        assert_eq!(
            kinds(&text),
            [
                ViolationKind::ContentTooLong,
                ViolationKind::UrlNotAllowed,
                ViolationKind::EmailNotAllowed,
                ViolationKind::PhoneNotAllowed,
                ViolationKind::HandleNotAllowed,
            ]
        );
    }

    #[test]
    fn messages_and_report() {
        let violations = validate("follow @someone at 5551234567");

        assert_eq!(
            violations.to_string(),
            "Phone numbers are not allowed, Social media handles are not allowed"
        );

        let report = ValidationReport::from(&violations);
        assert!(!report.valid);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].kind, ViolationKind::PhoneNotAllowed);
        assert_eq!(report.violations[0].message, "Phone numbers are not allowed");

        assert!(ValidationReport::from(&Violations::default()).valid);
    }

    #[test]
    fn serialized_kinds() {
        assert_eq!(
            serde_json::to_string(&validate("")).unwrap(),
            r#"["empty_content"]"#
        );
        assert_eq!(
            serde_json::to_string(&ViolationKind::HandleNotAllowed).unwrap(),
            r#""handle_not_allowed""#
        );
    }
}
