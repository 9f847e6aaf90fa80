//! Declarative request-body validation.
//!
//! A route declares an ordered [`RuleSet`]; the validation middleware
//! evaluates it against the JSON body before the handler runs. Evaluation
//! never stops at the first failure: every violated rule is reported.
//!
//! # Example
//!
//! ```
//! use accounts_api::api::validation::{Rule, RuleSet};
//! use serde_json::json;
//!
//! let rules = RuleSet::new()
//!     .rule(Rule::NonEmpty("name"), "Name is required")
//!     .rule(Rule::Optional(Box::new(Rule::IsEmail("email"))), "Please include a valid email");
//!
//! assert!(rules.evaluate(&json!({ "name": "Ada" })).is_ok());
//! assert_eq!(rules.evaluate(&json!({ "email": "nope" })).unwrap_err().len(), 2);
//! ```

use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use validator::ValidateEmail;

/// A single field predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The key is present, whatever its value.
    Exists(&'static str),
    /// Present, not `null`, and not blank.
    NonEmpty(&'static str),
    /// A string in e-mail format.
    IsEmail(&'static str),
    /// A string of at least `n` characters.
    MinLength(&'static str, u64),
    /// Skips the wrapped rule when its field is absent.
    Optional(Box<Rule>),
}

impl Rule {
    /// Name of the body field this rule inspects.
    pub fn field(&self) -> &'static str {
        match self {
            Rule::Exists(field)
            | Rule::NonEmpty(field)
            | Rule::IsEmail(field)
            | Rule::MinLength(field, _) => field,
            Rule::Optional(inner) => inner.field(),
        }
    }

    /// Returns `true` if `body` satisfies the rule.
    pub fn check(&self, body: &Value) -> bool {
        let value = body.get(self.field());

        match self {
            Rule::Exists(_) => value.is_some(),
            Rule::NonEmpty(_) => value.is_some_and(is_non_empty),
            Rule::IsEmail(_) => value
                .and_then(Value::as_str)
                .is_some_and(|s| s.validate_email()),
            Rule::MinLength(_, min) => value
                .and_then(Value::as_str)
                .is_some_and(|s| s.chars().count() as u64 >= *min),
            Rule::Optional(inner) => value.is_none() || inner.check(body),
        }
    }
}

fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// A rule paired with the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub rule: Rule,
    pub message: Cow<'static, str>,
}

/// A failed rule, as reported to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: Cow<'static, str>,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Ordered list of rules attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule.
    pub fn rule(mut self, rule: Rule, message: impl Into<Cow<'static, str>>) -> Self {
        self.rules.push(FieldRule {
            rule,
            message: message.into(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }

    /// Names of the fields inspected, in declaration order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.rule.field()).collect()
    }

    /// Evaluates every rule against `body`.
    ///
    /// A body that is not a JSON object is evaluated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns all violations in declaration order if any rule fails.
    pub fn evaluate(&self, body: &Value) -> Result<(), Vec<Violation>> {
        let empty = Value::Object(serde_json::Map::new());
        let body = if body.is_object() { body } else { &empty };

        let violations: Vec<Violation> = self
            .rules
            .iter()
            .filter(|r| !r.rule.check(body))
            .map(|r| Violation::new(r.rule.field(), r.message.clone()))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
