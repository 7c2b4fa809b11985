//! Manifest loading
//!
//! A manifest file holds one or more JSON values: single objects, arrays of
//! objects, or `*List` objects. All of them are flattened into a sequence of
//! individual objects.

use std::io::Read;

use anyhow::{Context, Result, bail};
use rp_core::list_items;
use serde_json::{Deserializer, Value};

/// Read the objects in `path`, or stdin when `path` is `-`
pub fn read_objects(path: &str) -> Result<Vec<Value>> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read manifest from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest '{path}'"))?
    };

    let objects = parse_objects(&content).with_context(|| format!("Invalid manifest '{path}'"))?;
    tracing::debug!(path, count = objects.len(), "loaded manifest");
    Ok(objects)
}

/// Parse a stream of JSON values into individual objects
pub fn parse_objects(content: &str) -> Result<Vec<Value>> {
    let mut objects = Vec::new();
    for value in Deserializer::from_str(content).into_iter::<Value>() {
        flatten_into(value?, &mut objects)?;
    }

    if objects.is_empty() {
        bail!("no objects found");
    }
    Ok(objects)
}

fn flatten_into(value: Value, objects: &mut Vec<Value>) -> Result<()> {
    if let Some(items) = list_items(&value) {
        for item in items.to_vec() {
            flatten_into(item, objects)?;
        }
        return Ok(());
    }

    match value {
        Value::Array(values) => {
            for value in values {
                flatten_into(value, objects)?;
            }
        }
        Value::Object(_) => objects.push(value),
        other => bail!("expected a JSON object, found: {other}"),
    }
    Ok(())
}
