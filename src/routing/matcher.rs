//! Route pattern parsing and path matching.
//!
//! # Responsibilities
//! - Parse route patterns (`/admin/`, `/health`, `/users/{id:int}/`)
//! - Match request paths segment by segment (prefix or exact)
//! - Capture path parameters and the unmatched remainder
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex: literal segments compared directly, `int` parameters by digit scan
//! - A pattern ending in `/` is directory-style: as a prefix it only matches
//!   paths that continue past the slash (`/admin/` matches `/admin/login`
//!   and `/admin/`, never `/admin` or `/administrator`)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::routing::RoutingError;

/// How a pattern is compared against a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Matches the pattern and anything below it (delegated sub-application).
    #[default]
    Prefix,
    /// Matches the whole path only (terminal route).
    Exact,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Prefix => f.pad("prefix"),
            MatchKind::Exact => f.pad("exact"),
        }
    }
}

/// Converter applied to a `{name}` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Any non-empty segment.
    Str,
    /// ASCII digits only.
    Int,
}

impl ParamKind {
    fn accepts(self, segment: &str) -> bool {
        match self {
            ParamKind::Str => !segment.is_empty(),
            ParamKind::Int => !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ParamKind::Str => "str",
            ParamKind::Int => "int",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param { name: String, kind: ParamKind },
}

impl Segment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            Segment::Literal(lit) => lit == segment,
            Segment::Param { kind, .. } => kind.accepts(segment),
        }
    }
}

/// Parameters captured from `{name}` segments, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Look up a captured parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Result of matching a path against a single pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub params: PathParams,
    /// The part of the path below the pattern, re-rooted at `/`.
    pub remainder: String,
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    kind: MatchKind,
    segments: Vec<Segment>,
    directory: bool,
}

impl RoutePattern {
    /// Parse a pattern such as `/admin/` or `/users/{id:int}`.
    pub fn parse(raw: &str, kind: MatchKind) -> Result<Self, RoutingError> {
        let invalid = |reason: &str| RoutingError::InvalidPattern {
            pattern: raw.to_string(),
            reason: reason.to_string(),
        };

        let body = raw
            .strip_prefix('/')
            .ok_or_else(|| invalid("pattern must start with '/'"))?;

        if body.is_empty() {
            return Ok(Self {
                raw: raw.to_string(),
                kind,
                segments: Vec::new(),
                directory: true,
            });
        }

        let directory = body.ends_with('/');
        let body = body.strip_suffix('/').unwrap_or(body);

        let mut segments = Vec::new();
        let mut seen_params: Vec<&str> = Vec::new();
        for part in body.split('/') {
            if part.is_empty() {
                return Err(invalid("empty path segment"));
            }

            if let Some(inner) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                let (name, param_kind) = match inner.split_once(':') {
                    None => (inner, ParamKind::Str),
                    Some((name, "str")) => (name, ParamKind::Str),
                    Some((name, "int")) => (name, ParamKind::Int),
                    Some((_, other)) => {
                        return Err(invalid(&format!("unknown parameter converter '{}'", other)));
                    }
                };
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(invalid("parameter names must be non-empty [A-Za-z0-9_]"));
                }
                if seen_params.contains(&name) {
                    return Err(invalid(&format!("parameter '{}' appears twice", name)));
                }
                seen_params.push(name);
                segments.push(Segment::Param {
                    name: name.to_string(),
                    kind: param_kind,
                });
            } else if part.contains('{') || part.contains('}') {
                return Err(invalid("braces are only allowed around a whole segment"));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            kind,
            segments,
            directory,
        })
    }

    pub fn prefix(raw: &str) -> Result<Self, RoutingError> {
        Self::parse(raw, MatchKind::Prefix)
    }

    pub fn exact(raw: &str) -> Result<Self, RoutingError> {
        Self::parse(raw, MatchKind::Exact)
    }

    /// Nest `sub` below this pattern, keeping the sub-pattern's match kind.
    ///
    /// A root `sub` leaves this pattern's path as written, so `/status`
    /// stays a plain prefix instead of becoming directory-style `/status/`.
    pub fn join(&self, sub: &RoutePattern) -> Result<Self, RoutingError> {
        if sub.segments.is_empty() {
            return Ok(Self {
                kind: sub.kind,
                ..self.clone()
            });
        }
        let joined = format!("{}{}", self.raw.trim_end_matches('/'), sub.raw);
        Self::parse(&joined, sub.kind)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Identity used for duplicate detection. Ignores match kind and
    /// parameter names, so `/u/{a}` and `/u/{b}` collide.
    pub(crate) fn canonical(&self) -> String {
        let mut key = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            key.push('/');
            match segment {
                Segment::Literal(lit) => key.push_str(lit),
                Segment::Param { kind, .. } => {
                    key.push('{');
                    key.push_str(kind.as_str());
                    key.push('}');
                }
            }
        }
        if self.directory {
            key.push('/');
        }
        key
    }

    /// Match a request path (which must begin with `/`).
    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let body = path.strip_prefix('/')?;
        let parts: Vec<&str> = body.split('/').collect();
        let n = self.segments.len();

        if parts.len() < n {
            return None;
        }

        let mut params = Vec::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            if !segment.matches(part) {
                return None;
            }
            if let Segment::Param { name, .. } = segment {
                params.push((name.clone(), (*part).to_string()));
            }
        }

        let rest = &parts[n..];
        let matched = match (self.kind, self.directory) {
            (MatchKind::Exact, true) => rest.len() == 1 && rest[0].is_empty(),
            (MatchKind::Exact, false) => rest.is_empty(),
            (MatchKind::Prefix, true) => !rest.is_empty(),
            (MatchKind::Prefix, false) => true,
        };
        if !matched {
            return None;
        }

        Some(PathMatch {
            params: PathParams(params),
            remainder: format!("/{}", rest.join("/")),
        })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_prefix() {
        let admin = RoutePattern::prefix("/admin/").unwrap();

        assert_eq!(admin.matches("/admin/login").unwrap().remainder, "/login");
        assert_eq!(admin.matches("/admin/").unwrap().remainder, "/");
        assert_eq!(admin.matches("/admin/a/b").unwrap().remainder, "/a/b");
        assert!(admin.matches("/admin").is_none());
        assert!(admin.matches("/administrator").is_none());
        assert!(admin.matches("/").is_none());
    }

    #[test]
    fn test_root_prefix_matches_everything() {
        let root = RoutePattern::prefix("/").unwrap();

        for path in ["/", "/health", "/nonexistent/path", "/admin", "/a/b/c/"] {
            let m = root.matches(path).unwrap();
            assert_eq!(m.remainder, path);
        }
    }

    #[test]
    fn test_exact_match() {
        let health = RoutePattern::exact("/health").unwrap();
        assert!(health.matches("/health").is_some());
        assert!(health.matches("/health/").is_none());
        assert!(health.matches("/health/live").is_none());

        let root = RoutePattern::exact("/").unwrap();
        assert!(root.matches("/").is_some());
        assert!(root.matches("/x").is_none());

        let dir = RoutePattern::exact("/status/").unwrap();
        assert!(dir.matches("/status/").is_some());
        assert!(dir.matches("/status").is_none());
    }

    #[test]
    fn test_plain_prefix_without_slash() {
        let api = RoutePattern::prefix("/api").unwrap();
        assert!(api.matches("/api").is_some());
        assert_eq!(api.matches("/api/v1").unwrap().remainder, "/v1");
        assert!(api.matches("/apix").is_none());
    }

    #[test]
    fn test_params() {
        let pattern = RoutePattern::exact("/users/{id:int}/posts/{slug}").unwrap();
        let m = pattern.matches("/users/42/posts/hello").unwrap();
        assert_eq!(m.params.get("id"), Some("42"));
        assert_eq!(m.params.get("slug"), Some("hello"));
        assert_eq!(m.params.len(), 2);

        assert!(pattern.matches("/users/abc/posts/hello").is_none());
        assert!(pattern.matches("/users//posts/hello").is_none());
    }

    #[test]
    fn test_invalid_patterns() {
        for raw in ["admin/", "//x", "/a/{}", "/a/{id:uuid}", "/a/b{c}", "/{x}/{x}", "/{a-b}"] {
            let err = RoutePattern::prefix(raw).unwrap_err();
            assert!(matches!(err, RoutingError::InvalidPattern { .. }), "{raw}");
        }
    }

    #[test]
    fn test_canonical_ignores_names_and_kind() {
        let a = RoutePattern::prefix("/u/{a}").unwrap();
        let b = RoutePattern::exact("/u/{b}").unwrap();
        let c = RoutePattern::exact("/u/{b:int}").unwrap();
        assert_eq!(a.canonical(), b.canonical());
        assert_ne!(a.canonical(), c.canonical());
        assert_eq!(RoutePattern::prefix("/").unwrap().canonical(), "/");
    }

    #[test]
    fn test_join() {
        let admin = RoutePattern::prefix("/admin/").unwrap();
        let login = RoutePattern::exact("/login").unwrap();
        let joined = admin.join(&login).unwrap();
        assert_eq!(joined.as_str(), "/admin/login");
        assert_eq!(joined.kind(), MatchKind::Exact);

        let root = RoutePattern::prefix("/").unwrap();
        let sub_root = RoutePattern::prefix("/").unwrap();
        assert_eq!(root.join(&sub_root).unwrap().as_str(), "/");
        assert_eq!(admin.join(&sub_root).unwrap().as_str(), "/admin/");

        let status = RoutePattern::prefix("/status").unwrap();
        let joined = status.join(&sub_root).unwrap();
        assert_eq!(joined.as_str(), "/status");
        assert_eq!(joined.matches("/status").unwrap().remainder, "/");
        assert_eq!(joined.matches("/status/deep").unwrap().remainder, "/deep");
        assert!(joined.matches("/statusx").is_none());

        let exact_root = RoutePattern::exact("/").unwrap();
        let joined = status.join(&exact_root).unwrap();
        assert_eq!(joined.kind(), MatchKind::Exact);
        assert!(joined.matches("/status").is_some());
        assert!(joined.matches("/status/deep").is_none());
    }
}
