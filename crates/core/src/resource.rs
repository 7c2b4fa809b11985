//! Resource identity
//!
//! A resource is identified by its kind, its API group and its name.
//! References are written as `kind[.group]/name`, with the kind lower-cased
//! and the group omitted when empty (e.g. `pod/foo`, `deployment.apps/web`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A kind qualified by its API group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GroupKind {
    /// API group (empty for the core group)
    pub group: String,
    /// Type category, e.g. "Pod"
    pub kind: String,
}

impl GroupKind {
    /// Create a new GroupKind
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }

    /// Whether both group and kind match, ignoring the case of the kind
    pub fn matches(&self, other: &GroupKind) -> bool {
        self.group == other.group && self.kind.eq_ignore_ascii_case(&other.kind)
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind.to_lowercase())
        } else {
            write!(f, "{}.{}", self.kind.to_lowercase(), self.group)
        }
    }
}

/// A fully-qualified reference to a single resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Kind and group of the resource
    #[serde(flatten)]
    pub group_kind: GroupKind,
    /// Unique name within the group and kind
    pub name: String,
}

impl ResourceRef {
    /// Create a new ResourceRef
    pub fn new(
        kind: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group_kind: GroupKind::new(group, kind),
            name: name.into(),
        }
    }

    /// Kind of the resource, as written in its manifest
    pub fn kind(&self) -> &str {
        &self.group_kind.kind
    }

    /// API group of the resource
    pub fn group(&self) -> &str {
        &self.group_kind.group
    }

    /// Whether this reference points at the same resource as `other`
    pub fn matches(&self, other: &ResourceRef) -> bool {
        self.name == other.name && self.group_kind.matches(&other.group_kind)
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.group_kind, self.name)
    }
}

/// Parse a reference of the form `kind[.group]/name`
///
/// The kind is everything before the first `.`; the remainder up to the
/// `/` is the group.
pub fn parse_resource_ref(reference: &str) -> Result<ResourceRef> {
    let (type_part, name) = reference.split_once('/').ok_or_else(|| {
        Error::Decode(format!(
            "Invalid resource reference: '{reference}'. Expected: kind[.group]/name"
        ))
    })?;

    if name.is_empty() || name.contains('/') {
        return Err(Error::Decode(format!(
            "Invalid resource name in '{reference}'"
        )));
    }

    let (kind, group) = type_part.split_once('.').unwrap_or((type_part, ""));
    if kind.is_empty() {
        return Err(Error::Decode(format!(
            "Resource kind cannot be empty in '{reference}'"
        )));
    }

    Ok(ResourceRef::new(kind, group, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_core_group() {
        let r = ResourceRef::new("Pod", "", "foo");
        assert_eq!(r.to_string(), "pod/foo");
    }

    #[test]
    fn test_display_with_group() {
        let r = ResourceRef::new("Deployment", "apps", "web");
        assert_eq!(r.to_string(), "deployment.apps/web");
    }

    #[test]
    fn test_parse_core_group() {
        let r = parse_resource_ref("pod/foo").unwrap();
        assert_eq!(r.kind(), "pod");
        assert_eq!(r.group(), "");
        assert_eq!(r.name, "foo");
    }

    #[test]
    fn test_parse_dotted_group() {
        let r = parse_resource_ref("ingress.networking.k8s.io/edge").unwrap();
        assert_eq!(r.kind(), "ingress");
        assert_eq!(r.group(), "networking.k8s.io");
        assert_eq!(r.name, "edge");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_resource_ref("pod").is_err());
        assert!(parse_resource_ref("pod/").is_err());
        assert!(parse_resource_ref("/foo").is_err());
        assert!(parse_resource_ref("pod/a/b").is_err());
    }

    #[test]
    fn test_matches_ignores_kind_case() {
        let stored = ResourceRef::new("Pod", "", "foo");
        let requested = parse_resource_ref("pod/foo").unwrap();
        assert!(stored.matches(&requested));
        assert!(!stored.matches(&ResourceRef::new("Pod", "", "bar")));
        assert!(!stored.matches(&ResourceRef::new("Pod", "apps", "foo")));
    }
}
