// SPDX-FileCopyrightText: 2026 Jitm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path patterns and the context matcher.
//!
//! A pattern is an ordered list of segments separated by `:`, for example
//! `wp:upload:admin_notices`. A segment is either a concrete value or a
//! wildcard (`*` or empty) that matches any value. Matching is exact-arity
//! and segment-by-segment equality; there is no substring or regex matching.

use std::fmt;

use thiserror::Error;

use crate::context::Context;

/// Separator between pattern segments.
pub const SEGMENT_DELIMITER: char = ':';

/// Token that marks a segment as matching any value.
pub const WILDCARD: &str = "*";

/// Reasons a path pattern fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("segment {position} `{segment}` contains whitespace")]
    Whitespace { position: usize, segment: String },

    #[error("segment {position} `{segment}` contains invalid character `{character}`")]
    InvalidCharacter {
        position: usize,
        segment: String,
        character: char,
    },

    #[error("segment {position} `{segment}` mixes `*` with other characters")]
    PartialWildcard { position: usize, segment: String },
}

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches any concrete value.
    Any,
    /// Matches exactly this value.
    Exact(String),
}

impl Segment {
    fn matches(&self, value: &str) -> bool {
        match self {
            Segment::Any => true,
            Segment::Exact(expected) => expected == value,
        }
    }
}

/// A parsed `area:screen:event` pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string.
    ///
    /// Legacy patterns wrapped in slashes (`/wp:upload:admin_notices/`) are
    /// accepted; the outer slashes are dropped.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let trimmed = raw.trim();
        let body = trimmed
            .strip_prefix('/')
            .and_then(|s| s.strip_suffix('/'))
            .unwrap_or(trimmed);

        if body.is_empty() {
            return Err(PatternError::Empty);
        }

        let segments = body
            .split(SEGMENT_DELIMITER)
            .enumerate()
            .map(|(position, segment)| parse_segment(position, segment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: body.to_string(),
            segments,
        })
    }

    /// The pattern text, without legacy wrapping slashes.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn arity(&self) -> usize {
        self.segments.len()
    }

    /// Whether this pattern matches the context's location.
    ///
    /// A pattern with a different number of segments than the context never
    /// matches.
    pub fn matches(&self, context: &Context) -> bool {
        let values = context.segments();
        values.len() == self.segments.len()
            && self
                .segments
                .iter()
                .zip(values)
                .all(|(segment, value)| segment.matches(value))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Free-function form of [`PathPattern::matches`].
pub fn matches(pattern: &PathPattern, context: &Context) -> bool {
    pattern.matches(context)
}

fn parse_segment(position: usize, segment: &str) -> Result<Segment, PatternError> {
    if segment.is_empty() || segment == WILDCARD {
        return Ok(Segment::Any);
    }
    if segment.chars().any(char::is_whitespace) {
        return Err(PatternError::Whitespace {
            position,
            segment: segment.to_string(),
        });
    }
    if segment.contains('*') {
        return Err(PatternError::PartialWildcard {
            position,
            segment: segment.to_string(),
        });
    }
    if let Some(character) = segment
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(PatternError::InvalidCharacter {
            position,
            segment: segment.to_string(),
            character,
        });
    }
    Ok(Segment::Exact(segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(area: &str, screen: &str, event: &str) -> Context {
        Context::new(area, screen).with_event(event)
    }

    #[test]
    fn exact_pattern_matches_same_location() {
        let pattern = PathPattern::parse("wp:upload:admin_notices").unwrap();
        assert!(pattern.matches(&ctx("wp", "upload", "admin_notices")));
        assert!(!pattern.matches(&ctx("wp", "widgets", "admin_notices")));
        assert!(!pattern.matches(&ctx("wp", "upload", "in_admin_footer")));
    }

    #[test]
    fn legacy_slash_wrapped_pattern_parses() {
        let pattern = PathPattern::parse("/wp:edit-post:admin_notices/").unwrap();
        assert_eq!(pattern.arity(), 3);
        assert_eq!(pattern.as_str(), "wp:edit-post:admin_notices");
        assert!(pattern.matches(&ctx("wp", "edit-post", "admin_notices")));
    }

    #[test]
    fn star_and_empty_segments_are_wildcards() {
        let star = PathPattern::parse("wp:*:admin_notices").unwrap();
        let empty = PathPattern::parse("wp::admin_notices").unwrap();
        for pattern in [&star, &empty] {
            assert_eq!(pattern.segments()[1], Segment::Any);
            assert!(pattern.matches(&ctx("wp", "upload", "admin_notices")));
            assert!(pattern.matches(&ctx("wp", "plugins", "admin_notices")));
            assert!(!pattern.matches(&ctx("woo", "plugins", "admin_notices")));
        }
    }

    #[test]
    fn arity_mismatch_never_matches() {
        let three = PathPattern::parse("wp:upload:admin_notices").unwrap();
        let two = PathPattern::parse("wp:upload").unwrap();
        let two_segment_ctx = Context::new("wp", "upload");
        let three_segment_ctx = ctx("wp", "upload", "admin_notices");

        assert!(!three.matches(&two_segment_ctx));
        assert!(!two.matches(&three_segment_ctx));
        assert!(two.matches(&two_segment_ctx));
    }

    #[test]
    fn all_wildcard_pattern_still_checks_arity() {
        let pattern = PathPattern::parse("*:*:*").unwrap();
        assert!(pattern.matches(&ctx("a", "b", "c")));
        assert!(!pattern.matches(&Context::new("a", "b")));
    }

    #[test]
    fn no_substring_matching() {
        let pattern = PathPattern::parse("wp:upload:admin").unwrap();
        assert!(!pattern.matches(&ctx("wp", "upload", "admin_notices")));
        let pattern = PathPattern::parse("wp:up:admin_notices").unwrap();
        assert!(!pattern.matches(&ctx("wp", "upload", "admin_notices")));
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert_eq!(PathPattern::parse(""), Err(PatternError::Empty));
        assert_eq!(PathPattern::parse("  "), Err(PatternError::Empty));
        assert_eq!(PathPattern::parse("//"), Err(PatternError::Empty));
        assert!(matches!(
            PathPattern::parse("wp:up load:x"),
            Err(PatternError::Whitespace { position: 1, .. })
        ));
        assert!(matches!(
            PathPattern::parse("wp:upl*:x"),
            Err(PatternError::PartialWildcard { position: 1, .. })
        ));
        assert!(matches!(
            PathPattern::parse("wp:upload:admin_notices|x"),
            Err(PatternError::InvalidCharacter { character: '|', .. })
        ));
        assert!(matches!(
            PathPattern::parse("wp:(upload):x"),
            Err(PatternError::InvalidCharacter { character: '(', .. })
        ));
    }

    #[test]
    fn free_function_delegates() {
        let pattern = PathPattern::parse("wp:upload:admin_notices").unwrap();
        assert!(matches(&pattern, &ctx("wp", "upload", "admin_notices")));
    }

    fn segment_value() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,8}"
    }

    proptest! {
        #[test]
        fn concrete_pattern_matches_its_own_context(
            area in segment_value(),
            screen in segment_value(),
            event in segment_value(),
        ) {
            let pattern = PathPattern::parse(&format!("{area}:{screen}:{event}")).unwrap();
            prop_assert!(pattern.matches(&ctx(&area, &screen, &event)));
            // Dropping the event changes arity, so it can never match.
            prop_assert!(!pattern.matches(&Context::new(area.as_str(), screen.as_str())));
        }

        #[test]
        fn matching_is_deterministic(
            raw in "[a-z*]{0,4}(:[a-z*]{0,4}){0,3}",
            area in segment_value(),
            screen in segment_value(),
            event in segment_value(),
        ) {
            if let Ok(pattern) = PathPattern::parse(&raw) {
                let context = ctx(&area, &screen, &event);
                prop_assert_eq!(pattern.matches(&context), pattern.matches(&context));
                if pattern.arity() != 3 {
                    prop_assert!(!pattern.matches(&context));
                }
            }
        }
    }
}
