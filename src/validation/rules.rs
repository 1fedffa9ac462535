use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::errors::{Violation, ViolationKind};
use crate::entities::Stations;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email regex is valid")
});

/// Whether `value` is a syntactically valid email address.
///
/// The local part may not start with a dot and no part may contain `..`.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_REGEX.is_match(value)
}

/// Inputs shared by every rule during one validation pass.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub today: NaiveDate,
    pub stations: &'a Stations,
}

type Check = Box<dyn Fn(&str, &RuleContext<'_>) -> bool + Send + Sync>;

struct Rule {
    kind: ViolationKind,
    message: String,
    check: Check,
}

/// Ordered rules for one string field. The first failing rule decides the
/// field's message; later rules are not evaluated.
#[derive(Default)]
pub struct FieldRules {
    rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.refine(ViolationKind::Required, message, |value, _| !value.is_empty())
    }

    pub fn min_len(self, min: usize, message: impl Into<String>) -> Self {
        self.refine(ViolationKind::Length, message, move |value, _| {
            value.chars().count() >= min
        })
    }

    /// The whole value must match `regex`; anchor it accordingly.
    pub fn matches(self, regex: Regex, message: impl Into<String>) -> Self {
        self.refine(ViolationKind::Format, message, move |value, _| regex.is_match(value))
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.refine(ViolationKind::Format, message, |value, _| is_valid_email(value))
    }

    pub fn refine<F>(mut self, kind: ViolationKind, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str, &RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            kind,
            message: message.into(),
            check: Box::new(check),
        });
        self
    }

    pub fn check(&self, value: &str, ctx: &RuleContext<'_>) -> Option<Violation> {
        self.rules
            .iter()
            .find(|rule| !(rule.check)(value, ctx))
            .map(|rule| Violation::new(rule.kind, rule.message.clone()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(stations: &Stations) -> RuleContext<'_> {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            stations,
        }
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let stations = Stations::default();
        let rules = FieldRules::new()
            .required("required")
            .min_len(3, "too short");

        assert_eq!(
            rules.check("", &ctx(&stations)),
            Some(Violation::new(ViolationKind::Required, "required"))
        );
        assert_eq!(
            rules.check("ab", &ctx(&stations)),
            Some(Violation::new(ViolationKind::Length, "too short"))
        );
        assert_eq!(rules.check("abc", &ctx(&stations)), None);
    }

    #[test]
    fn test_min_len_counts_characters() {
        let stations = Stations::default();
        let rules = FieldRules::new().min_len(3, "too short");
        assert_eq!(rules.check("äöü", &ctx(&stations)), None);
    }

    #[test]
    fn test_refine_sees_context() {
        let stations = Stations::default();
        let rules = FieldRules::new().refine(ViolationKind::Format, "unknown", |v, ctx| {
            ctx.stations.contains(v)
        });

        assert_eq!(rules.check("Phuket Station", &ctx(&stations)), None);
        assert!(rules.check("Atlantis", &ctx(&stations)).is_some());
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("john@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.th"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("john.example.com"));
        assert!(!is_valid_email(".john@example.com"));
        assert!(!is_valid_email("john..doe@example.com"));
        assert!(!is_valid_email("john@example.c"));
        assert!(!is_valid_email("john doe@example.com"));
    }
}
