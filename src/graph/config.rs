//! Graph and connection options
//!
//! Options can be built in code or read from an untyped record (JSON or YAML).
//! Untyped records are validated key by key: a non-object record is
//! `InvalidOptions`, an unrecognised direction is `UnknownMode`, and a
//! non-boolean flag is `TypeMismatch`. Keys the engine does not know are kept
//! as attributes.

use super::error::{GraphError, GraphResult};
use super::property::{property_map_from_json, PropertyMap, PropertyValue};
use super::types::Direction;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

const GRAPH_OPTION_KEYS: &[&str] = &[
    "direction",
    "multigraph",
    "selfloops",
    "allow_selfloops",
    "override",
    "allow_override",
];

/// Mode settings of a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Direction mode
    pub direction: Direction,
    /// Allow parallel edges between the same pair of nodes
    pub multigraph: bool,
    /// Allow edges whose endpoints are the same node
    #[serde(alias = "selfloops")]
    pub allow_selfloops: bool,
    /// Re-adding an existing id replaces the stored node instead of failing
    #[serde(alias = "override")]
    pub allow_override: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Undirected,
            multigraph: false,
            allow_selfloops: false,
            allow_override: false,
        }
    }
}

impl GraphConfig {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = multigraph;
        self
    }

    pub fn with_selfloops(mut self, allow: bool) -> Self {
        self.allow_selfloops = allow;
        self
    }

    pub fn with_override(mut self, allow: bool) -> Self {
        self.allow_override = allow;
        self
    }

    /// Validate an untyped option record, discarding unknown keys
    pub fn from_value(value: &Value) -> GraphResult<Self> {
        GraphOptions::from_value(value).map(|options| options.config)
    }
}

/// Graph options read from an untyped record: the mode settings plus any
/// extra keys, which become graph attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphOptions {
    pub config: GraphConfig,
    pub attributes: PropertyMap,
}

impl GraphOptions {
    pub fn from_value(value: &Value) -> GraphResult<Self> {
        let object = expect_object(value, "graph")?;
        let mut config = GraphConfig::default();

        if let Some(direction) = object.get("direction").filter(|v| !v.is_null()) {
            config.direction = parse_direction(direction)?;
        }
        if let Some(multigraph) = read_bool(object, "multigraph")? {
            config.multigraph = multigraph;
        }
        if let Some(selfloops) = read_bool(object, "selfloops")? {
            config.allow_selfloops = selfloops;
        }
        if let Some(selfloops) = read_bool(object, "allow_selfloops")? {
            config.allow_selfloops = selfloops;
        }
        if let Some(allow) = read_bool(object, "override")? {
            config.allow_override = allow;
        }
        if let Some(allow) = read_bool(object, "allow_override")? {
            config.allow_override = allow;
        }

        Ok(GraphOptions {
            config,
            attributes: property_map_from_json(object, GRAPH_OPTION_KEYS),
        })
    }

    pub fn from_json_str(text: &str) -> GraphResult<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| GraphError::InvalidOptions {
            context: "graph",
            reason: format!("malformed JSON: {}", e),
        })?;
        Self::from_value(&value)
    }

    pub fn from_yaml_str(text: &str) -> GraphResult<Self> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| GraphError::InvalidOptions {
            context: "graph",
            reason: format!("malformed YAML: {}", e),
        })?;
        Self::from_value(&value)
    }

    /// Load options from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GraphError::InvalidOptions {
            context: "graph",
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }
}

/// Per-edge options for [`Graph::connect_with`](super::Graph::connect_with)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectOptions {
    /// Requested direction. Only honoured in mixed mode, defaults to undirected.
    pub directed: Option<bool>,
    /// Attributes stored on the edge
    pub attributes: PropertyMap,
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed() -> Self {
        Self::new().with_directed(true)
    }

    pub fn undirected() -> Self {
        Self::new().with_directed(false)
    }

    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = Some(directed);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_attributes(mut self, attributes: PropertyMap) -> Self {
        self.attributes = attributes;
        self
    }

    /// Validate an untyped option record; every key but `directed` becomes an edge attribute
    pub fn from_value(value: &Value) -> GraphResult<Self> {
        let object = expect_object(value, "connect")?;
        Ok(ConnectOptions {
            directed: read_bool(object, "directed")?,
            attributes: property_map_from_json(object, &["directed"]),
        })
    }
}

pub(crate) fn expect_object<'a>(
    value: &'a Value,
    context: &'static str,
) -> GraphResult<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| GraphError::InvalidOptions {
        context,
        reason: format!("expected an object, got {}", json_type_name(value)),
    })
}

fn parse_direction(value: &Value) -> GraphResult<Direction> {
    match value {
        Value::String(s) => s.parse(),
        Value::Number(n) => match n.as_u64() {
            Some(code) => Direction::from_code(code),
            None => Err(GraphError::UnknownMode(n.to_string())),
        },
        other => Err(GraphError::UnknownMode(other.to_string())),
    }
}

/// Absent and `null` keys read as `None`
fn read_bool(object: &Map<String, Value>, key: &str) -> GraphResult<Option<bool>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(GraphError::TypeMismatch {
            option: key.to_string(),
            found: json_type_name(other).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
