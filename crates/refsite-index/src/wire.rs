//! Navigation index wire format
//!
//! The generator emits every node as `[label, target_or_null, children_or_null]`,
//! where the third slot is a list of nodes, `null`, or the name of a separately
//! shipped member list. Files are wrapped as `var <name> = [ ... ];` scripts.

use crate::diagnostics::{IndexError, IndexResult};
use crate::node::{Children, EntityNode};
use crate::path::display_segments;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    /// Regex for the `var name = ...;` script wrapper
    static ref SCRIPT_REGEX: Regex = Regex::new(
        r"(?s)^\s*var\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(.*?)\s*;?\s*$"
    ).unwrap();
}

/// Untyped node as it appears on the wire
#[derive(Debug, Deserialize)]
struct RawNode(String, Option<String>, Option<RawChildren>);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawChildren {
    Inline(Vec<RawNode>),
    Deferred(String),
}

/// Parse a JSON nested-list index into validated nodes
pub(crate) fn parse_nodes(raw: &str) -> IndexResult<Vec<EntityNode>> {
    let raw_nodes: Vec<RawNode> = serde_json::from_str(raw)
        .map_err(|e| IndexError::malformed("<input>", e.to_string()))?;
    convert_all(raw_nodes, &mut Vec::new())
}

/// Convert an already-parsed JSON value into validated nodes
pub(crate) fn nodes_from_value(value: serde_json::Value) -> IndexResult<Vec<EntityNode>> {
    let raw_nodes: Vec<RawNode> = serde_json::from_value(value)
        .map_err(|e| IndexError::malformed("<input>", e.to_string()))?;
    convert_all(raw_nodes, &mut Vec::new())
}

/// Split a `var name = [...];` script into its variable name and JSON body
pub(crate) fn split_script(src: &str) -> IndexResult<(&str, &str)> {
    let captures = SCRIPT_REGEX.captures(src).ok_or_else(|| {
        IndexError::malformed("<input>", "expected `var <name> = [ ... ];` script")
    })?;
    let name = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
    Ok((name, body))
}

/// Wrap serialised nodes back into a script
pub(crate) fn wrap_script(name: &str, json: &str) -> String {
    format!("var {} =\n{};\n", name, json)
}

fn convert_all(raw_nodes: Vec<RawNode>, ancestors: &mut Vec<String>) -> IndexResult<Vec<EntityNode>> {
    raw_nodes
        .into_iter()
        .map(|raw| convert(raw, ancestors))
        .collect()
}

fn convert(raw: RawNode, ancestors: &mut Vec<String>) -> IndexResult<EntityNode> {
    let RawNode(label, target, children) = raw;

    let children = match children {
        None => None,
        Some(RawChildren::Deferred(reference)) => Some(Children::Deferred(reference)),
        Some(RawChildren::Inline(nodes)) => {
            ancestors.push(label.clone());
            let converted = convert_all(nodes, ancestors);
            ancestors.pop();
            Some(Children::Inline(converted?))
        }
    };

    match (target, children) {
        (Some(target), None) => Ok(EntityNode::Page { label, target }),
        (None, Some(children)) => Ok(EntityNode::Group { label, children }),
        (Some(target), Some(children)) => Ok(EntityNode::PageWithChildren {
            label,
            target,
            children,
        }),
        (None, None) => {
            let mut path = ancestors.clone();
            path.push(label);
            Err(IndexError::malformed(
                display_segments(&path),
                "node has neither a target nor children",
            ))
        }
    }
}
