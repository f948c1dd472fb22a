//! Name predicates for palette search.
//!
//! A matcher is written as a plain string:
//! - `human004` matches exactly
//! - `gradient3*` matches a prefix
//! - `*__blue` matches a suffix
//! - `*silver*` matches a substring
//! - `*` alone matches every name
//! - `/__blue_green$/` is a regular expression

use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Predicate over palette names.
#[derive(Debug, Clone)]
pub enum PaletteMatcher {
    Exact(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
    Regex(Regex),
}

impl PaletteMatcher {
    /// Build a regular-expression matcher.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Ok(PaletteMatcher::Regex(Regex::new(pattern)?))
    }

    pub fn is_match(&self, name: &str) -> bool {
        match self {
            PaletteMatcher::Exact(s) => name == s,
            PaletteMatcher::Prefix(s) => name.starts_with(s.as_str()),
            PaletteMatcher::Suffix(s) => name.ends_with(s.as_str()),
            PaletteMatcher::Contains(s) => name.contains(s.as_str()),
            PaletteMatcher::Regex(re) => re.is_match(name),
        }
    }
}

impl FromStr for PaletteMatcher {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() >= 2 && s.starts_with('/') && s.ends_with('/') {
            return Self::regex(&s[1..s.len() - 1]);
        }
        if s == "*" {
            return Ok(PaletteMatcher::Prefix(String::new()));
        }
        let matcher = match (s.strip_prefix('*'), s.strip_suffix('*')) {
            (Some(rest), Some(_)) => PaletteMatcher::Contains(rest[..rest.len() - 1].to_string()),
            (Some(rest), None) => PaletteMatcher::Suffix(rest.to_string()),
            (None, Some(rest)) => PaletteMatcher::Prefix(rest.to_string()),
            _ => PaletteMatcher::Exact(s.to_string()),
        };
        Ok(matcher)
    }
}

impl fmt::Display for PaletteMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteMatcher::Exact(s) => write!(f, "'{}'", s),
            PaletteMatcher::Prefix(s) => write!(f, "'{}*'", s),
            PaletteMatcher::Suffix(s) => write!(f, "'*{}'", s),
            PaletteMatcher::Contains(s) => write!(f, "'*{}*'", s),
            PaletteMatcher::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}
