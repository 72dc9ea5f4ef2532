//! Navigation artifacts
//!
//! Renders loaded forests into the static pieces a reference site serves
//! alongside its pages: nested-list navigation trees, breadcrumb trails and
//! a flat JSON search index.
//!
//! Element ids are derived from the full entity path, never from the label
//! alone, because labels repeat across the forest, and they keep every
//! character of each label so that near-identical specializations stay apart.

use html_escape::{encode_double_quoted_attribute, encode_text};
use refsite_index::{EntityNode, EntityPath, Forest, IndexResult, NavScript};
use serde::Serialize;

/// Separator between encoded path segments in element ids
const SEGMENT_SEPARATOR: char = '-';

/// Encode a label for use inside an element id
///
/// ASCII letters and digits pass through, `_` doubles, and every other
/// byte becomes `_XX` (uppercase hex), in the manner of the generator's own
/// file names. The encoding is reversible and never produces `-`.
pub fn encode_label(label: &str) -> String {
    let mut encoded = String::with_capacity(label.len());
    for byte in label.bytes() {
        match byte {
            b'_' => encoded.push_str("__"),
            b if b.is_ascii_alphanumeric() => encoded.push(b as char),
            b => encoded.push_str(&format!("_{:02X}", b)),
        }
    }
    encoded
}

/// Element id for the node at `path`
///
/// Distinct paths always give distinct ids.
pub fn path_slug<S: AsRef<str>>(path: &[S]) -> String {
    let mut id = String::from("nav");
    for segment in path {
        id.push(SEGMENT_SEPARATOR);
        id.push_str(&encode_label(segment.as_ref()));
    }
    id
}

/// Render a forest as nested `<ul>` lists
///
/// Pages become links, groups become plain spans, and deferred member lists
/// are exposed as a `data-members` attribute for the client to fetch.
pub fn render_tree_html(forest: &Forest, index_name: &str) -> String {
    let mut html = format!(
        "<ul class=\"navtree\" data-index=\"{}\">\n",
        encode_double_quoted_attribute(index_name)
    );
    let mut path = Vec::new();
    render_nodes(&mut html, forest.roots(), &mut path);
    html.push_str("</ul>\n");
    html
}

fn render_nodes<'a>(html: &mut String, nodes: &'a [EntityNode], path: &mut Vec<&'a str>) {
    for node in nodes {
        path.push(node.label());

        html.push_str(&format!(
            "<li id=\"{}\" class=\"{}\"",
            path_slug(path.as_slice()),
            node.kind().css_class()
        ));
        if let Some(members) = node.deferred_children() {
            html.push_str(&format!(
                " data-members=\"{}\"",
                encode_double_quoted_attribute(members)
            ));
        }
        html.push('>');
        html.push_str(&entity_link(node.label(), node.target()));

        let children = node.children();
        if children.is_empty() {
            html.push_str("</li>\n");
        } else {
            html.push_str("\n<ul>\n");
            render_nodes(html, children, path);
            html.push_str("</ul>\n</li>\n");
        }

        path.pop();
    }
}

fn entity_link(label: &str, target: Option<&str>) -> String {
    match target {
        Some(target) => format!(
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(target),
            encode_text(label)
        ),
        None => format!("<span class=\"group\">{}</span>", encode_text(label)),
    }
}

/// Render the breadcrumb trail for the node at `path`
pub fn render_breadcrumbs_html<S: AsRef<str>>(forest: &Forest, path: &[S]) -> IndexResult<String> {
    let crumbs = forest.breadcrumbs(path)?;
    let mut html = String::from("<nav class=\"breadcrumbs\"><ol>");
    for crumb in &crumbs {
        html.push_str("<li>");
        html.push_str(&entity_link(crumb.label, crumb.target));
        html.push_str("</li>");
    }
    html.push_str("</ol></nav>");
    Ok(html)
}

/// One entity in the client-side search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    /// Navigation script the entity came from
    pub index: String,
    /// Display label
    pub label: String,
    /// Full path, one label per level
    pub path: EntityPath,
    /// Detail page, absent for groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Entity kind display name
    pub kind: &'static str,
}

/// Flatten a forest into search entries, in pre-order
pub fn search_entries(index_name: &str, forest: &Forest) -> Vec<SearchEntry> {
    forest
        .walk()
        .map(|hit| SearchEntry {
            index: index_name.to_string(),
            label: hit.node.label().to_string(),
            target: hit.node.target().map(str::to_string),
            kind: hit.node.kind().display_name(),
            path: hit.path,
        })
        .collect()
}

/// Serialize the search index for every loaded script
pub fn search_index_json(scripts: &[NavScript]) -> serde_json::Result<String> {
    let entries: Vec<SearchEntry> = scripts
        .iter()
        .flat_map(|script| search_entries(&script.name, &script.forest))
        .collect();
    serde_json::to_string_pretty(&entries)
}
