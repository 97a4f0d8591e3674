//! Shallow parsing of TypeScript type text.
//!
//! Only object literals are given structure, one level deep. Everything else
//! (arrays, unions, tuples, generics, literals, function types) stays an opaque
//! string, even when it contains `{...}` somewhere inside.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeNode {
    /// Any type text that is not an object literal, kept verbatim.
    Primitive {
        /// The trimmed type text.
        value: String,
    },
    /// An object literal with its top-level properties.
    Object(ObjectType),
}

impl TypeNode {
    /// Whether this node is an object literal.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Get the object properties, if this node is an object literal.
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(obj) => Some(obj),
            Self::Primitive { .. } => None,
        }
    }
}

/// One property of an object literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEntry {
    /// Property name, without the optional marker.
    pub name: String,
    /// Whether the property was declared with `?`.
    pub optional: bool,
    /// Raw, unparsed value type text.
    pub value_type: String,
}

impl PropertyEntry {
    /// Render as `name?: value`.
    pub fn display(&self) -> String {
        format!("{}{}: {}", self.name, self.optional_marker(), self.value_type)
    }

    /// `"?"` for optional properties, empty otherwise.
    pub fn optional_marker(&self) -> &'static str {
        if self.optional { "?" } else { "" }
    }
}

/// Properties of an object literal, in source order.
///
/// Names are unique: a later duplicate overwrites the earlier entry but keeps
/// its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectType {
    properties: Vec<PropertyEntry>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl ObjectType {
    /// Create an empty object type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, overwriting any existing one with the same name.
    pub fn insert(&mut self, entry: PropertyEntry) {
        match self.index.get(&entry.name) {
            Some(&i) => self.properties[i] = entry,
            None => {
                self.index.insert(entry.name.clone(), self.properties.len());
                self.properties.push(entry);
            }
        }
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&PropertyEntry> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    /// Whether a property with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate properties in source order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.properties.iter()
    }

    /// Iterate property names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the object has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Parse type text into a [`TypeNode`].
///
/// Text starting with `{` (after trimming) is parsed as an object literal;
/// anything else is returned as a primitive.
///
/// # Example
///
/// ```
/// use ts_error_analyzer::types::{parse_type, TypeNode};
///
/// let node = parse_type("{ a: string; b?: number }");
/// let obj = node.as_object().unwrap();
/// assert_eq!(obj.get("b").unwrap().optional, true);
///
/// assert!(matches!(parse_type("string[]"), TypeNode::Primitive { .. }));
/// ```
pub fn parse_type(text: &str) -> TypeNode {
    let text = text.trim();
    if text.starts_with('{') {
        TypeNode::Object(parse_object(text))
    } else {
        TypeNode::Primitive {
            value: text.to_owned(),
        }
    }
}

/// Parse an object literal body.
///
/// Unbalanced brackets are tolerated: the depth counter may go negative or
/// stay positive, and whatever was accumulated is committed at the end.
pub(crate) fn parse_object(text: &str) -> ObjectType {
    let mut inner = text.trim();
    inner = inner.strip_prefix('{').unwrap_or(inner);
    inner = inner.strip_suffix('}').unwrap_or(inner);

    let mut object = ObjectType::new();
    let mut depth: i32 = 0;
    let mut current = String::new();
    let mut name = String::new();
    let mut optional = false;
    let mut in_name = true;

    for c in inner.chars() {
        match c {
            '{' | '[' | '(' | '<' => depth += 1,
            '}' | ']' | ')' | '>' => depth -= 1,
            _ => {}
        }

        if depth == 0 && c == ':' && in_name {
            let raw = current.trim();
            optional = raw.ends_with('?');
            name = raw.replacen('?', "", 1);
            current.clear();
            in_name = false;
        } else if depth == 0 && c == ';' {
            if !name.is_empty() {
                object.insert(PropertyEntry {
                    name: std::mem::take(&mut name),
                    optional,
                    value_type: current.trim().to_owned(),
                });
            }
            current.clear();
            name.clear();
            optional = false;
            in_name = true;
        } else {
            current.push(c);
        }
    }

    // Last property has no trailing `;`
    let value = current.trim();
    if !name.is_empty() && !value.is_empty() {
        object.insert(PropertyEntry {
            name,
            optional,
            value_type: value.to_owned(),
        });
    }

    object
}
