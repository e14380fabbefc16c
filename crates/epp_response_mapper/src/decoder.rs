//! Normalizes raw gateway payloads into an owned tree.
//!
//! Callers hand over either a base64 blob (notifications, redirect callbacks)
//! or plain XML/JSON (synchronous API responses) without saying which, so the
//! encoding is detected here.

use std::borrow::Cow;

use base64::Engine;
use common_utils::{consts::BASE64_ENGINE, errors::CustomResult};
use epp_models::{DecodeReason, ResponseMapperError, WireFormat};
use error_stack::{report, ResultExt};
use serde_json::{Map, Value};

use crate::{consts, logger};

/// A payload after encoding normalization, valid for one classification
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPayload {
    raw: String,
    body: DecodedBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecodedBody {
    Xml(XmlNode),
    Json(Map<String, Value>),
}

impl DecodedPayload {
    /// Payload text after base64 reversal
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn body(&self) -> &DecodedBody {
        &self.body
    }

    pub fn format(&self) -> WireFormat {
        match self.body {
            DecodedBody::Xml(_) => WireFormat::Xml,
            DecodedBody::Json(_) => WireFormat::Json,
        }
    }

    /// Generic tree view used for flattening and pass-through extraction
    pub fn to_value(&self) -> Value {
        match &self.body {
            DecodedBody::Xml(root) => root.to_value(),
            DecodedBody::Json(map) => Value::Object(map.clone()),
        }
    }
}

/// Owned copy of one XML element
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Self>,
}

impl XmlNode {
    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let text = node
            .children()
            .filter(roxmltree::Node::is_text)
            .filter_map(|child| child.text())
            .collect::<String>();

        Self {
            name: node.tag_name().name().to_owned(),
            attributes: node
                .attributes()
                .map(|attribute| (attribute.name().to_owned(), attribute.value().to_owned()))
                .collect(),
            text: text.trim().to_owned(),
            children: node
                .children()
                .filter(roxmltree::Node::is_element)
                .map(Self::from_node)
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed text directly inside this element
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// JSON view of the element.
    ///
    /// A bare element becomes its text. Otherwise attributes and child
    /// elements become keys, repeated child names become arrays and any text
    /// is kept under [`consts::XML_TEXT_KEY`].
    pub fn to_value(&self) -> Value {
        if self.attributes.is_empty() && self.children.is_empty() {
            return Value::String(self.text.clone());
        }

        let mut map = Map::new();
        for (key, value) in &self.attributes {
            map.insert(key.clone(), Value::String(value.clone()));
        }
        for child in &self.children {
            let value = child.to_value();
            match map.get_mut(&child.name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }
        if !self.text.is_empty() {
            map.insert(consts::XML_TEXT_KEY.to_owned(), Value::String(self.text.clone()));
        }
        Value::Object(map)
    }
}

/// Returns the decoded bytes when `raw` is canonical base64, `raw` itself otherwise.
///
/// Plain XML or JSON never survives a strict decode and re-encode unchanged,
/// which is what tells the two apart.
pub fn reverse_base64(raw: &[u8]) -> Cow<'_, [u8]> {
    match BASE64_ENGINE.decode(raw) {
        Ok(decoded) if BASE64_ENGINE.encode(&decoded).as_bytes() == raw => Cow::Owned(decoded),
        _ => Cow::Borrowed(raw),
    }
}

#[tracing::instrument(skip_all, fields(format = %format))]
pub fn decode(raw: &[u8], format: WireFormat) -> CustomResult<DecodedPayload, ResponseMapperError> {
    let payload = reverse_base64(raw);
    if matches!(payload, Cow::Owned(_)) {
        logger::debug!("gateway payload was base64 encoded");
    }

    let raw = String::from_utf8(payload.into_owned())
        .change_context(ResponseMapperError::DecodeFailed(DecodeReason::InvalidUtf8))?;

    let body = match format {
        WireFormat::Xml => DecodedBody::Xml(parse_xml(&raw)?),
        WireFormat::Json => DecodedBody::Json(parse_json(&raw)?),
    };

    Ok(DecodedPayload { raw, body })
}

fn parse_xml(text: &str) -> CustomResult<XmlNode, ResponseMapperError> {
    // roxmltree refuses documents without a root element and DTDs by default
    let document = roxmltree::Document::parse(text)
        .change_context(ResponseMapperError::DecodeFailed(DecodeReason::NotValidXml))
        .attach_printable("Response is not a valid xml string")?;

    Ok(XmlNode::from_node(document.root_element()))
}

fn parse_json(text: &str) -> CustomResult<Map<String, Value>, ResponseMapperError> {
    let value = serde_json::from_str::<Value>(text)
        .change_context(ResponseMapperError::DecodeFailed(DecodeReason::InvalidJson))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(report!(ResponseMapperError::DecodeFailed(
            DecodeReason::NotJsonObject
        )))
        .attach_printable_lazy(|| format!("Top level json value is {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
