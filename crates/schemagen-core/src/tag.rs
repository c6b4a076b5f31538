//! Field annotation parsing.
//!
//! An annotation is a comma-separated string. The first segment is an
//! optional name override (`-` excludes the field); the rest are bare flags
//! such as `omitempty` or `key:value` constraints such as `minLength:1`.

use crate::error::ConstraintError;

/// Flag marking a field as optional.
pub const OMIT_EMPTY: &str = "omitempty";

/// Override name that excludes a field.
pub const SKIP: &str = "-";

/// Everything after the name segment of an annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagOptions<'a>(&'a str);

/// A recognized constraint from an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    MinLength(u64),
    MaxLength(u64),
}

/// Split an annotation into its name override and options tail.
pub fn parse_tag(tag: &str) -> (&str, TagOptions<'_>) {
    match tag.split_once(',') {
        Some((name, opts)) => (name, TagOptions(opts)),
        None => (tag, TagOptions("")),
    }
}

impl<'a> TagOptions<'a> {
    pub const fn new(opts: &'a str) -> Self {
        Self(opts)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `option` is one of the comma-separated segments.
    pub fn contains(&self, option: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|segment| segment == option)
    }

    /// Parse every non-empty segment as a constraint.
    ///
    /// Bare flags come back as `UnsupportedKey` like any other unknown key;
    /// callers decide whether that matters.
    pub fn constraints(&self) -> impl Iterator<Item = Result<Constraint, ConstraintError>> + 'a {
        self.0
            .split(',')
            .filter(|segment| !segment.is_empty())
            .map(parse_constraint)
    }
}

fn parse_constraint(segment: &str) -> Result<Constraint, ConstraintError> {
    let (key, value) = segment.split_once(':').unwrap_or((segment, ""));
    let parse = |value: &str| {
        value
            .parse::<u64>()
            .map_err(|e| ConstraintError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                reason: e.to_string(),
            })
    };

    match key {
        "minLength" => parse(value).map(Constraint::MinLength),
        "maxLength" => parse(value).map(Constraint::MaxLength),
        _ => Err(ConstraintError::UnsupportedKey(key.to_string())),
    }
}
