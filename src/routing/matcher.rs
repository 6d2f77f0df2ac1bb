//! Segment matching.
//!
//! # Responsibilities
//! - Match a location's segments against an ordered list of matchers
//! - Capture wildcard and integer values for the page constructor
//! - Decide whether two patterns could accept the same location
//!
//! # Design Decisions
//! - Literal matching is exact and case-sensitive
//! - Integers must be positive and plain decimal (no sign)
//! - A wildcard accepts any non-empty segment
//! - Matching is a pure function; no regex

/// Matcher for one location segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Literal(&'static str),
    /// Positive decimal integer.
    Integer,
    /// Any non-empty segment.
    Wildcard,
}

/// Value bound by a non-literal matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture<'a> {
    Text(&'a str),
    Int(i64),
}

impl<'a> Capture<'a> {
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Capture::Text(s) => Some(*s),
            Capture::Int(_) => None,
        }
    }

    pub fn int(&self) -> Option<i64> {
        match self {
            Capture::Int(n) => Some(*n),
            Capture::Text(_) => None,
        }
    }
}

fn parse_positive(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<i64>().ok().filter(|n| *n > 0)
}

impl Matcher {
    /// Whether some single segment is accepted by both matchers.
    fn overlaps(&self, other: &Matcher) -> bool {
        match (self, other) {
            (Matcher::Literal(a), Matcher::Literal(b)) => a == b,
            (Matcher::Literal(lit), Matcher::Integer) | (Matcher::Integer, Matcher::Literal(lit)) => {
                parse_positive(lit).is_some()
            }
            (Matcher::Literal(lit), Matcher::Wildcard) | (Matcher::Wildcard, Matcher::Literal(lit)) => {
                !lit.is_empty()
            }
            _ => true,
        }
    }
}

/// Match segments against a pattern, returning the captures in order.
///
/// The pattern must have exactly as many matchers as there are segments.
pub fn match_segments<'a>(pattern: &[Matcher], segments: &[&'a str]) -> Option<Vec<Capture<'a>>> {
    if pattern.len() != segments.len() {
        return None;
    }

    let mut captures = Vec::new();
    for (matcher, segment) in pattern.iter().zip(segments) {
        match matcher {
            Matcher::Literal(lit) => {
                if lit != segment {
                    return None;
                }
            }
            Matcher::Integer => captures.push(Capture::Int(parse_positive(segment)?)),
            Matcher::Wildcard => {
                if segment.is_empty() {
                    return None;
                }
                captures.push(Capture::Text(*segment));
            }
        }
    }
    Some(captures)
}

/// Whether some location would be accepted by both patterns.
pub fn ambiguous(a: &[Matcher], b: &[Matcher]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.overlaps(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Matcher::*;

    #[test]
    fn test_literal_match() {
        assert_eq!(match_segments(&[Literal("queue")], &["queue"]), Some(vec![]));
        assert_eq!(match_segments(&[Literal("queue")], &["Queue"]), None);
        assert_eq!(match_segments(&[Literal("queue")], &["queue", "x"]), None);
    }

    #[test]
    fn test_wildcard_and_integer() {
        let pattern = [Literal("domains"), Wildcard, Literal("dmarc"), Integer];
        assert_eq!(
            match_segments(&pattern, &["domains", "example.org", "dmarc", "12"]),
            Some(vec![Capture::Text("example.org"), Capture::Int(12)])
        );
        assert_eq!(match_segments(&pattern, &["domains", "", "dmarc", "12"]), None);
        assert_eq!(match_segments(&pattern, &["domains", "x", "dmarc", "0"]), None);
        assert_eq!(match_segments(&pattern, &["domains", "x", "dmarc", "-3"]), None);
        assert_eq!(match_segments(&pattern, &["domains", "x", "dmarc", "+3"]), None);
        assert_eq!(match_segments(&pattern, &["domains", "x", "dmarc", "1e3"]), None);
    }

    #[test]
    fn test_ambiguity() {
        assert!(ambiguous(&[Literal("accounts"), Wildcard], &[Literal("accounts"), Literal("new")]));
        assert!(ambiguous(&[Wildcard, Integer], &[Wildcard, Wildcard]));
        assert!(!ambiguous(&[Literal("accounts"), Wildcard], &[Literal("domains"), Wildcard]));
        assert!(!ambiguous(&[Literal("x"), Integer], &[Literal("x"), Literal("all")]));
        assert!(!ambiguous(&[Wildcard], &[Wildcard, Wildcard]));
    }
}
