//! ObjectTyper trait definition
//!
//! Resolving an arbitrary object to its kind, group and name is a capability
//! injected into printers and the store, so callers can substitute their own
//! decoding (or a test double) without the printers knowing about it.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::resource::ResourceRef;

/// Trait for resolving an object to its identity
#[cfg_attr(test, mockall::automock)]
pub trait ObjectTyper: Send + Sync {
    /// Resolve the kind, group and name of `obj`
    ///
    /// Returns `Error::Decode` when the object cannot be interpreted.
    fn resolve(&self, obj: &Value) -> Result<ResourceRef>;
}

/// Typer for schemaless JSON manifests
///
/// Reads `apiVersion` (`group/version`, or a bare `version` for the core
/// group), `kind` and `metadata.name`. A missing `kind` resolves to an empty
/// kind so printers can report it against the resource name.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnstructuredTyper;

impl ObjectTyper for UnstructuredTyper {
    fn resolve(&self, obj: &Value) -> Result<ResourceRef> {
        let map = obj
            .as_object()
            .ok_or_else(|| Error::Decode("object is not a JSON map".into()))?;

        let api_version = map
            .get("apiVersion")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Decode("missing or invalid apiVersion".into()))?;
        let group = match api_version.split_once('/') {
            Some((group, _version)) => group,
            None => "",
        };

        let kind = match map.get("kind") {
            None | Some(Value::Null) => "",
            Some(Value::String(kind)) => kind.as_str(),
            Some(_) => return Err(Error::Decode("kind must be a string".into())),
        };

        let name = map
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Decode("missing or invalid metadata.name".into()))?;

        Ok(ResourceRef::new(kind, group, name))
    }
}

/// Items of a list object, if `obj` is one
///
/// A list is a map whose `kind` ends in `List` and that carries an `items`
/// array.
pub fn list_items(obj: &Value) -> Option<&[Value]> {
    let kind = obj.get("kind").and_then(Value::as_str)?;
    if !kind.ends_with("List") {
        return None;
    }
    obj.get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_core_group() {
        let obj = json!({"apiVersion": "v1", "kind": "Pod", "metadata": {"name": "foo"}});
        let r = UnstructuredTyper.resolve(&obj).unwrap();
        assert_eq!(r, ResourceRef::new("Pod", "", "foo"));
    }

    #[test]
    fn test_resolve_named_group() {
        let obj = json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web"}
        });
        let r = UnstructuredTyper.resolve(&obj).unwrap();
        assert_eq!(r.group(), "apps");
        assert_eq!(r.kind(), "Deployment");
    }

    #[test]
    fn test_resolve_missing_kind_is_empty() {
        let obj = json!({"apiVersion": "v1", "metadata": {"name": "foo"}});
        let r = UnstructuredTyper.resolve(&obj).unwrap();
        assert_eq!(r.kind(), "");
    }

    #[test]
    fn test_resolve_errors() {
        let typer = UnstructuredTyper;
        assert!(matches!(typer.resolve(&json!([])), Err(Error::Decode(_))));
        assert!(matches!(
            typer.resolve(&json!({"kind": "Pod", "metadata": {"name": "foo"}})),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            typer.resolve(&json!({"apiVersion": "v1", "kind": "Pod"})),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            typer.resolve(&json!({"apiVersion": "v1", "kind": 3, "metadata": {"name": "foo"}})),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_list_items() {
        let list = json!({"apiVersion": "v1", "kind": "PodList", "items": [{}, {}]});
        assert_eq!(list_items(&list).map(<[Value]>::len), Some(2));

        let pod = json!({"apiVersion": "v1", "kind": "Pod", "items": []});
        assert!(list_items(&pod).is_none());
    }

    #[test]
    fn test_mock_typer() {
        let mut typer = MockObjectTyper::new();
        typer
            .expect_resolve()
            .returning(|_| Ok(ResourceRef::new("Secret", "", "token")));
        let r = typer.resolve(&Value::Null).unwrap();
        assert_eq!(r.to_string(), "secret/token");
    }
}
