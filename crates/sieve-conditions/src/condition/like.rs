use crate::error::PatternError;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// LikePattern
///
/// Whole-string, case-sensitive glob where `*` matches zero or more
/// characters and `\` escapes the next character (including `*` and `\`
/// themselves). The parsed form keeps the literal segments in order plus
/// flags for a leading/trailing wildcard; a wildcard sits between every two
/// consecutive segments.
///
/// A trailing bare `\` is rejected at construction. Evaluation is total.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LikePattern {
    source: String,
    segments: Vec<String>,
    leading_wildcard: bool,
    trailing_wildcard: bool,
}

impl LikePattern {
    pub fn new(source: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let (segments, leading_wildcard, trailing_wildcard) = parse(&source)?;

        Ok(Self {
            source,
            segments,
            leading_wildcard,
            trailing_wildcard,
        })
    }

    /// The original pattern text, escapes included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The unescaped text when the pattern contains no wildcard.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        if self.leading_wildcard || self.trailing_wildcard || self.segments.len() > 1 {
            return None;
        }

        Some(self.segments.first().map_or("", String::as_str))
    }

    /// Longest literal run at the start, `None` if the pattern begins with
    /// a wildcard. For a literal pattern this is the whole text.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        if self.leading_wildcard {
            return None;
        }

        Some(self.segments.first().map_or("", String::as_str))
    }

    /// Whole-string match of `input` against the pattern.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        if let Some(literal) = self.literal() {
            return input == literal;
        }

        let mut rest = input;
        let mut segments = self.segments.as_slice();

        if !self.leading_wildcard
            && let Some((first, tail)) = segments.split_first()
        {
            let Some(stripped) = rest.strip_prefix(first.as_str()) else {
                return false;
            };
            rest = stripped;
            segments = tail;
        }

        if !self.trailing_wildcard
            && let Some((last, head)) = segments.split_last()
        {
            let Some(stripped) = rest.strip_suffix(last.as_str()) else {
                return false;
            };
            rest = stripped;
            segments = head;
        }

        for segment in segments {
            let Some(found) = rest.find(segment.as_str()) else {
                return false;
            };
            rest = &rest[found + segment.len()..];
        }

        true
    }

    /// Whether some string matches both patterns.
    ///
    /// Sufficient alignment check over the anchored head and tail segments.
    /// When neither side is literal, the interior wildcards absorb whatever
    /// the other pattern requires, so compatible anchors imply a witness.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        if let Some(literal) = self.literal() {
            return other.matches(literal);
        }
        if let Some(literal) = other.literal() {
            return self.matches(literal);
        }

        let head_ok = self.leading_wildcard
            || other.leading_wildcard
            || prefix_compatible(self.first_segment(), other.first_segment());
        let tail_ok = self.trailing_wildcard
            || other.trailing_wildcard
            || suffix_compatible(self.last_segment(), other.last_segment());

        head_ok && tail_ok
    }

    /// Whether every string matched by `self` is matched by `other`.
    ///
    /// Sound and incomplete: anchored ends must align literally and each of
    /// `other`'s interior segments must embed, in order, into `self`'s fixed
    /// segments. A match that would need one of `self`'s wildcards to supply
    /// part of an `other` segment is not recognized.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        if let Some(other_literal) = other.literal() {
            return self.literal() == Some(other_literal);
        }
        if let Some(literal) = self.literal() {
            return other.matches(literal);
        }

        // both sides have wildcards
        let mut available: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        let mut required = other.segments.as_slice();

        if !other.leading_wildcard {
            if self.leading_wildcard {
                return false;
            }
            let Some((head, rest)) = required.split_first() else {
                return false;
            };
            let Some(first) = available.first_mut() else {
                return false;
            };
            let Some(stripped) = first.strip_prefix(head.as_str()) else {
                return false;
            };
            *first = stripped;
            required = rest;
        }

        if !other.trailing_wildcard {
            if self.trailing_wildcard {
                return false;
            }
            let Some((tail, rest)) = required.split_last() else {
                return false;
            };
            let Some(last) = available.last_mut() else {
                return false;
            };
            let Some(stripped) = last.strip_suffix(tail.as_str()) else {
                return false;
            };
            *last = stripped;
            required = rest;
        }

        // embed the interior segments in order
        let mut index = 0;
        let mut offset = 0;
        'next: for segment in required {
            while index < available.len() {
                if let Some(found) = available[index][offset..].find(segment.as_str()) {
                    offset += found + segment.len();
                    continue 'next;
                }
                index += 1;
                offset = 0;
            }
            return false;
        }

        true
    }

    fn first_segment(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    fn last_segment(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }
}

fn parse(source: &str) -> Result<(Vec<String>, bool, bool), PatternError> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut leading_wildcard = false;
    let mut star_pending = false;

    let mut chars = source.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '*' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                if segments.is_empty() {
                    leading_wildcard = true;
                }
                star_pending = true;
            }
            '\\' => {
                let Some(escaped) = chars.next() else {
                    return Err(PatternError::UnterminatedEscape {
                        pattern: source.to_string(),
                    });
                };
                current.push(escaped);
                star_pending = false;
            }
            other => {
                current.push(other);
                star_pending = false;
            }
        }
    }

    let trailing_wildcard = star_pending && current.is_empty();
    if !current.is_empty() {
        segments.push(current);
    }

    Ok((segments, leading_wildcard, trailing_wildcard))
}

fn prefix_compatible(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

fn suffix_compatible(a: &str, b: &str) -> bool {
    a.ends_with(b) || b.ends_with(a)
}

impl TryFrom<String> for LikePattern {
    type Error = PatternError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Self::new(source)
    }
}

impl From<LikePattern> for String {
    fn from(pattern: LikePattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(source: &str) -> LikePattern {
        LikePattern::new(source).unwrap()
    }

    #[test]
    fn literal_patterns_match_exactly() {
        assert!(pat("test").matches("test"));
        assert!(!pat("test").matches("Test"));
        assert!(!pat("test").matches("test "));
        assert!(pat("").matches(""));
        assert!(!pat("").matches("x"));
    }

    #[test]
    fn wildcards_match_zero_or_more() {
        let p = pat("t*t");
        assert!(p.matches("tt"));
        assert!(p.matches("test"));
        assert!(p.matches("t t"));
        assert!(!p.matches("t"));
        assert!(!p.matches("test!"));

        assert!(pat("*").matches(""));
        assert!(pat("*").matches("anything"));
        assert!(pat("bo*").matches("boat"));
        assert!(!pat("bo*").matches("abode"));
        assert!(pat("*oa*").matches("boat"));
        assert!(!pat("*oa*").matches("bolt"));
    }

    #[test]
    fn interior_segments_match_in_order() {
        let p = pat("a*b*c");
        assert!(p.matches("abc"));
        assert!(p.matches("axbxc"));
        assert!(!p.matches("acb"));
        assert!(!p.matches("cba"));
    }

    #[test]
    fn escapes_are_literal() {
        let p = pat("a\\*b");
        assert!(p.matches("a*b"));
        assert!(!p.matches("axb"));
        assert!(pat("t\\\\t").matches("t\\t"));
        assert!(pat("\\*").matches("*"));
    }

    #[test]
    fn unterminated_escape_is_rejected() {
        assert_eq!(
            LikePattern::new("oops\\"),
            Err(PatternError::UnterminatedEscape {
                pattern: "oops\\".to_string()
            })
        );
    }

    #[test]
    fn literal_and_prefix_extraction() {
        assert_eq!(pat("test").literal(), Some("test"));
        assert_eq!(pat("").literal(), Some(""));
        assert_eq!(pat("\\*").literal(), Some("*"));
        assert_eq!(pat("te*st").literal(), None);
        assert_eq!(pat("test*").literal(), None);

        assert_eq!(pat("bo*").prefix(), Some("bo"));
        assert_eq!(pat("bo*t").prefix(), Some("bo"));
        assert_eq!(pat("test").prefix(), Some("test"));
        assert_eq!(pat("*oat").prefix(), None);
        assert_eq!(pat("*").prefix(), None);
    }

    #[test]
    fn overlap_alignment() {
        assert!(pat("a*").overlaps(&pat("*z")));
        assert!(pat("a*").overlaps(&pat("ab*")));
        assert!(pat("ab*").overlaps(&pat("a*")));
        assert!(!pat("a*").overlaps(&pat("b*")));
        assert!(!pat("*a").overlaps(&pat("*b")));
        assert!(pat("*").overlaps(&pat("anything*really")));
        assert!(pat("a*z").overlaps(&pat("ab*yz")));

        // literal on either side degrades to a plain match
        assert!(pat("boat").overlaps(&pat("*oa*")));
        assert!(!pat("bolt").overlaps(&pat("*oa*")));
        assert!(pat("*oa*").overlaps(&pat("boat")));
    }

    #[test]
    fn pattern_subset_alignment() {
        assert!(pat("ab*").is_subset_of(&pat("a*")));
        assert!(!pat("a*").is_subset_of(&pat("ab*")));
        assert!(pat("*yz").is_subset_of(&pat("*z")));
        assert!(!pat("*b").is_subset_of(&pat("a*")));
        assert!(pat("boa*").is_subset_of(&pat("*oa*")));
        assert!(pat("a*b*c*d*e").is_subset_of(&pat("*b*d*")));
        assert!(!pat("ab*c").is_subset_of(&pat("a*bc")));
        assert!(pat("test").is_subset_of(&pat("t*t")));
        assert!(!pat("t*t").is_subset_of(&pat("test")));
        assert!(pat("bo*t").is_subset_of(&pat("bo*t")));
    }
}
