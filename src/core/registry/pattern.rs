//! core::registry::pattern
//!
//! URL-like path patterns: `settings/account`, `day/:date`,
//! `statistics/period/:period?`, `*`.
//!
//! # Matching
//!
//! A pattern matches a whole path, segment by segment. Static segments must be
//! equal, `:name` captures one segment, `:name?` captures one segment when the
//! path has more segments than the remaining required pattern segments, and a
//! trailing `*` swallows the rest.

use std::cmp::Ordering;
use std::fmt;

use super::RegistryError;
use crate::core::types::Params;

/// One segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Static(String),
    /// Named placeholder.
    Param { name: String, optional: bool },
    /// Matches any remaining segments (must be last).
    Wildcard,
}

impl Segment {
    /// Rank used by specificity ordering: lower is more specific.
    fn rank(&self) -> u8 {
        match self {
            Segment::Static(_) => 0,
            Segment::Param {
                optional: false, ..
            } => 1,
            Segment::Param { optional: true, .. } => 2,
            Segment::Wildcard => 3,
        }
    }

    fn is_required(&self) -> bool {
        matches!(
            self,
            Segment::Static(_)
                | Segment::Param {
                    optional: false,
                    ..
                }
        )
    }
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern string.
    ///
    /// Leading, trailing and repeated `/` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidPattern` for an unnamed placeholder or a
    /// wildcard that is not the last segment.
    pub fn parse(source: &str) -> Result<Self, RegistryError> {
        let parts: Vec<&str> = source.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if i + 1 != parts.len() {
                    return Err(RegistryError::InvalidPattern {
                        pattern: source.to_string(),
                        reason: "'*' must be the last segment".into(),
                    });
                }
                Segment::Wildcard
            } else if let Some(name) = part.strip_prefix(':') {
                let (name, optional) = match name.strip_suffix('?') {
                    Some(stripped) => (stripped, true),
                    None => (name, false),
                };
                if name.is_empty() {
                    return Err(RegistryError::InvalidPattern {
                        pattern: source.to_string(),
                        reason: "placeholder needs a name".into(),
                    });
                }
                Segment::Param {
                    name: name.to_string(),
                    optional,
                }
            } else {
                Segment::Static((*part).to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            source: parts.join("/"),
            segments,
        })
    }

    /// The normalized pattern text (no leading or trailing `/`).
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all placeholders, in order.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_wildcard(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Wildcard))
    }

    /// Match already split path segments, returning captured params.
    ///
    /// Captured values are percent-decoded.
    pub fn matches(&self, path: &[&str]) -> Option<Params> {
        let mut params = Params::new();
        let mut p = 0;

        for (s, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Wildcard => return Some(params),
                Segment::Static(text) => {
                    if path.get(p) != Some(&text.as_str()) {
                        return None;
                    }
                    p += 1;
                }
                Segment::Param {
                    name,
                    optional: false,
                } => {
                    let value = path.get(p)?;
                    params.insert(name.clone(), decode(value));
                    p += 1;
                }
                Segment::Param {
                    name,
                    optional: true,
                } => {
                    let required_left = self.segments[s + 1..]
                        .iter()
                        .filter(|seg| seg.is_required())
                        .count();
                    if path.len().saturating_sub(p) > required_left {
                        params.insert(name.clone(), decode(path[p]));
                        p += 1;
                    }
                }
            }
        }

        (p == path.len()).then_some(params)
    }

    /// Order two patterns by specificity: more specific first.
    ///
    /// Compared segment by segment, static beats a placeholder, a required
    /// placeholder beats an optional one and anything beats a wildcard. When
    /// one pattern is a prefix of the other, the longer one wins.
    pub fn cmp_specificity(&self, other: &PathPattern) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            match (self.segments.get(i), other.segments.get(i)) {
                (Some(a), Some(b)) => match a.rank().cmp(&b.rank()) {
                    Ordering::Equal => continue,
                    unequal => return unequal,
                },
                (None, Some(b)) if *b == Segment::Wildcard => return Ordering::Less,
                (Some(a), None) if *a == Segment::Wildcard => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Greater,
                (Some(_), None) => return Ordering::Less,
                (None, None) => break,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.source)
    }
}

fn decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> PathPattern {
        PathPattern::parse(s).unwrap()
    }

    fn split(path: &str) -> Vec<&str> {
        path.split('/').filter(|s| !s.is_empty()).collect()
    }

    mod parse {
        use super::*;

        #[test]
        fn normalizes_slashes() {
            assert_eq!(pattern("/settings//account/").as_str(), "settings/account");
            assert_eq!(pattern("").as_str(), "");
        }

        #[test]
        fn recognizes_segments() {
            let p = pattern("drinking-session/:sessionId/live");
            assert_eq!(p.param_names(), vec!["sessionId"]);
            assert_eq!(
                p.segments()[1],
                Segment::Param {
                    name: "sessionId".into(),
                    optional: false
                }
            );
        }

        #[test]
        fn rejects_unnamed_placeholder() {
            assert!(PathPattern::parse("day/:").is_err());
            assert!(PathPattern::parse("day/:?").is_err());
        }

        #[test]
        fn rejects_inner_wildcard() {
            assert!(PathPattern::parse("a/*/b").is_err());
            assert!(pattern("*").has_wildcard());
        }
    }

    mod matching {
        use super::*;

        #[test]
        fn static_match_is_exact() {
            let p = pattern("settings/account");
            assert!(p.matches(&split("settings/account")).is_some());
            assert!(p.matches(&split("settings")).is_none());
            assert!(p.matches(&split("settings/account/x")).is_none());
        }

        #[test]
        fn captures_and_decodes_params() {
            let p = pattern("profile/:userID/friends");
            let params = p.matches(&split("profile/a%20b/friends")).unwrap();
            assert_eq!(params["userID"], "a b");
        }

        #[test]
        fn optional_param() {
            let p = pattern("statistics/period/:period?");
            assert!(p.matches(&split("statistics/period")).unwrap().is_empty());
            assert_eq!(
                p.matches(&split("statistics/period/week")).unwrap()["period"],
                "week"
            );
        }

        #[test]
        fn empty_pattern_matches_root_only() {
            let p = pattern("");
            assert!(p.matches(&[]).is_some());
            assert!(p.matches(&["home"]).is_none());
        }

        #[test]
        fn wildcard_matches_anything() {
            let p = pattern("*");
            assert!(p.matches(&[]).is_some());
            assert!(p.matches(&split("a/b/c")).is_some());
        }
    }

    mod specificity {
        use super::*;

        #[test]
        fn static_beats_param() {
            assert_eq!(
                pattern("day/today").cmp_specificity(&pattern("day/:date")),
                Ordering::Less
            );
        }

        #[test]
        fn longer_beats_prefix() {
            assert_eq!(
                pattern("settings/account").cmp_specificity(&pattern("settings")),
                Ordering::Less
            );
        }

        #[test]
        fn wildcard_is_last() {
            assert_eq!(pattern("*").cmp_specificity(&pattern("")), Ordering::Greater);
            assert_eq!(
                pattern("a/*").cmp_specificity(&pattern("a")),
                Ordering::Greater
            );
        }

        #[test]
        fn identical_shapes_tie() {
            assert_eq!(
                pattern("day/:date").cmp_specificity(&pattern("week/:start")),
                Ordering::Equal
            );
        }
    }
}
