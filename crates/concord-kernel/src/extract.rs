//! Schema-guided extraction of leaf values from a decoded document.
//!
//! The walk dispatches on the runtime shape of each node:
//!
//! - absent / null → `NO_FILE` at the root, `WRONG_KEYS` below it
//! - empty         → `FILE_EMPTY` at the root, `FIELD_EMPTY` below it
//! - sequence      → every element, same level
//! - mapping       → schema keys of the current level, one level deeper
//! - scalar        → the value itself
//!
//! Extraction is lazy: [`Extractor`] keeps an explicit work stack and yields
//! items in depth-first, declared-key order.

use crate::item::{ExtractedItem, ScalarValue, StructuralErrorKind};
use crate::schema::LevelSchema;
use serde_json::Value;

/// A decoded document. `None` means the loader found nothing usable.
pub type Document = Option<Value>;

#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    node: Option<&'a Value>,
    level: usize,
    is_root: bool,
}

/// Lazy item stream over one document.
#[derive(Debug, Clone)]
pub struct Extractor<'a> {
    schema: &'a LevelSchema,
    stack: Vec<Frame<'a>>,
}

/// Flattens `document` into extracted items according to `schema`.
pub fn extract<'a>(document: Option<&'a Value>, schema: &'a LevelSchema) -> Extractor<'a> {
    Extractor {
        schema,
        stack: vec![Frame {
            node: document,
            level: 1,
            is_root: true,
        }],
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

impl<'a> Iterator for Extractor<'a> {
    type Item = ExtractedItem;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let node = match frame.node {
                None | Some(Value::Null) if frame.is_root => {
                    return Some(StructuralErrorKind::NoFile.into());
                }
                None | Some(Value::Null) => {
                    return Some(StructuralErrorKind::WrongKeys.into());
                }
                Some(node) => node,
            };

            if is_empty(node) {
                let kind = if frame.is_root {
                    StructuralErrorKind::FileEmpty
                } else {
                    StructuralErrorKind::FieldEmpty
                };
                return Some(kind.into());
            }

            match node {
                Value::Array(items) => {
                    self.stack.extend(items.iter().rev().map(|item| Frame {
                        node: Some(item),
                        level: frame.level,
                        is_root: false,
                    }));
                }
                Value::Object(map) => {
                    let Some(keys) = self.schema.keys_at(frame.level) else {
                        return Some(StructuralErrorKind::MissingNestedKey.into());
                    };
                    self.stack.extend(keys.iter().rev().map(|key| Frame {
                        node: map.get(key),
                        level: frame.level + 1,
                        is_root: false,
                    }));
                }
                scalar => {
                    if let Some(value) = ScalarValue::from_json(scalar) {
                        return Some(ExtractedItem::Value(value));
                    }
                }
            }
        }
        None
    }
}
