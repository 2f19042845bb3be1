//! Thin helpers over html5ever's RcDom
//!
//! The codec and the validator only need a handful of tree operations: parse, find elements by
//! tag, read attributes and text, build nodes and serialize them back. They live here so the
//! rest of the crate never touches `NodeData` directly.

use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute,
    LocalName, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::error::{DataError, Result};

/// Parse markup into a DOM. html5ever never fails; malformed input is repaired.
pub fn parse(markup: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(markup)
}

/// Create an HTML element with attributes
pub fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

pub fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Whether `node` is an element named `tag`.
pub fn is_element(node: &Handle, tag: &str) -> bool {
    match node.data {
        NodeData::Element { ref name, .. } => &*name.local == tag,
        _ => false,
    }
}

/// Attributes of an element in document order, empty for any other node.
pub fn attributes(node: &Handle) -> Vec<(String, String)> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), String::from(&*attr.value)))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    attributes(node)
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// Whether the element's whitespace-separated `class` list contains `class`.
pub fn has_class(node: &Handle, class: &str) -> bool {
    attribute(node, "class")
        .map(|classes| classes.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// First descendant element named `tag`, depth first, excluding `root` itself.
pub fn find_first(root: &Handle, tag: &str) -> Option<Handle> {
    for child in root.children.borrow().iter() {
        if is_element(child, tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_first(child, tag) {
            return Some(found);
        }
    }
    None
}

/// All descendant elements named `tag` in document order, excluding `root` itself.
pub fn find_all(root: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    collect(root, tag, &mut found);
    found
}

fn collect(node: &Handle, tag: &str, found: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        if is_element(child, tag) {
            found.push(child.clone());
        }
        collect(child, tag, found);
    }
}

/// Concatenated text of every descendant text node.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    push_text(node, &mut text);
    text
}

fn push_text(node: &Handle, text: &mut String) {
    for child in node.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => text.push_str(&contents.borrow()),
            _ => push_text(child, text),
        }
    }
}

/// Inner markup of `node`: text children verbatim (entities already resolved by the parser),
/// element children serialized back to markup.
pub fn inner_markup(node: &Handle) -> Result<String> {
    let mut markup = String::new();
    for child in node.children.borrow().iter() {
        match child.data {
            NodeData::Text { ref contents } => markup.push_str(&contents.borrow()),
            NodeData::Element { .. } => markup.push_str(&serialize_node(child)?),
            _ => {}
        }
    }
    Ok(markup)
}

/// Serialize `node` including its own tag.
pub fn serialize_node(node: &Handle) -> Result<String> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| DataError::Serialization(format!("HTML serialization failed: {}", e)))?;

    String::from_utf8(output)
        .map_err(|e| DataError::Serialization(format!("UTF-8 conversion failed: {}", e)))
}
