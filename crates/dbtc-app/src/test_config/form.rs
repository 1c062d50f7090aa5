//! Config form generated from a test type's `required_configs`
//!
//! Each descriptor becomes one row. `dict` descriptors become a header row
//! followed by their nested fields, and values are written back under the
//! parent key.

use dbtc_api::RelationCatalog;
use dbtc_core::prelude::*;
use dbtc_core::{ConfigField, ConfigKind};
use serde_json::{Map, Number, Value};

use crate::text_input::{TextEdit, TextInput};

/// Editor state of one config row
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(TextInput),
    Number(TextInput),
    /// Unset, True or False
    Boolean(Option<bool>),
    /// Items already added plus the item being typed
    List {
        items: Vec<String>,
        input: TextInput,
    },
    /// Index into [`RelationCatalog::entries`]
    Relation(Option<usize>),
    /// Header of a `dict` field
    Group,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRow {
    /// Key path from the top of the config object
    pub path: Vec<String>,
    pub name: String,
    pub description: String,
    pub depth: usize,
    pub value: FieldValue,
}

impl ConfigRow {
    pub fn is_focusable(&self) -> bool {
        !matches!(self.value, FieldValue::Group)
    }

    /// Rows that take typed characters
    pub fn accepts_text(&self) -> bool {
        matches!(
            self.value,
            FieldValue::Text(_) | FieldValue::Number(_) | FieldValue::List { .. }
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self.value, FieldValue::List { .. })
    }

    pub fn apply(&mut self, edit: &TextEdit) {
        match &mut self.value {
            FieldValue::Text(input) => input.apply(edit),
            FieldValue::Number(input) => {
                let allowed = match edit {
                    TextEdit::Insert(c) => {
                        c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
                    }
                    _ => true,
                };
                if allowed {
                    input.apply(edit);
                }
            }
            FieldValue::List { items, input } => match edit {
                // Backspace on an empty buffer removes the last item
                TextEdit::Backspace if input.value().is_empty() => {
                    items.pop();
                }
                _ => input.apply(edit),
            },
            FieldValue::Boolean(_) | FieldValue::Relation(_) | FieldValue::Group => {}
        }
    }

    /// Commit the typed list item. Returns false when there was nothing to add.
    pub fn push_item(&mut self) -> bool {
        if let FieldValue::List { items, input } = &mut self.value {
            let item = input.trimmed().to_string();
            if !item.is_empty() {
                items.push(item);
                input.clear();
                return true;
            }
        }
        false
    }

    pub fn remove_item(&mut self, index: usize) {
        if let FieldValue::List { items, .. } = &mut self.value {
            if index < items.len() {
                items.remove(index);
            }
        }
    }

    /// Step a choice row through its options; `option_count` is the number of
    /// relations available to relation rows.
    pub fn cycle(&mut self, forward: bool, option_count: usize) {
        match &mut self.value {
            FieldValue::Boolean(value) => {
                *value = match (*value, forward) {
                    (None, true) => Some(true),
                    (Some(true), true) => Some(false),
                    (Some(false), true) => None,
                    (None, false) => Some(false),
                    (Some(false), false) => Some(true),
                    (Some(true), false) => None,
                };
            }
            FieldValue::Relation(selected) => {
                *selected = cycle_option(*selected, option_count, forward);
            }
            _ => {}
        }
    }

    fn json_value(&self, relations: Option<&RelationCatalog>) -> Result<Option<Value>> {
        let value = match &self.value {
            FieldValue::Text(input) => {
                let text = input.value();
                (!text.is_empty()).then(|| Value::String(text.to_string()))
            }
            FieldValue::Number(input) => {
                if input.is_blank() {
                    None
                } else {
                    Some(parse_number(input.trimmed()).ok_or_else(|| {
                        Error::validation(format!("{} must be a number", self.name))
                    })?)
                }
            }
            FieldValue::Boolean(value) => value.map(Value::Bool),
            FieldValue::List { items, input } => {
                let mut all: Vec<Value> = items.iter().cloned().map(Value::String).collect();
                if !input.is_blank() {
                    all.push(Value::String(input.trimmed().to_string()));
                }
                (!all.is_empty()).then_some(Value::Array(all))
            }
            FieldValue::Relation(selected) => selected
                .and_then(|index| relations.and_then(|r| r.entries().nth(index)))
                .map(|entry| Value::String(entry.value.clone())),
            FieldValue::Group => None,
        };
        Ok(value)
    }
}

/// `None -> 0 -> .. -> count-1 -> None` (or reversed)
pub fn cycle_option(current: Option<usize>, count: usize, forward: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match (current, forward) {
        (None, true) => Some(0),
        (Some(i), true) if i + 1 < count => Some(i + 1),
        (Some(_), true) => None,
        (None, false) => Some(count - 1),
        (Some(0), false) => None,
        (Some(i), false) => Some(i - 1),
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Value::Number(int.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// All rows of the form for one test type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigForm {
    rows: Vec<ConfigRow>,
}

impl ConfigForm {
    pub fn from_fields(fields: &[ConfigField]) -> Self {
        let mut rows = Vec::new();
        for field in fields {
            push_rows(&mut rows, field, &[], 0);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[ConfigRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&ConfigRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut ConfigRow> {
        self.rows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build the `config` object. Only fields with a value are included.
    pub fn build(&self, relations: Option<&RelationCatalog>) -> Result<Map<String, Value>> {
        let mut config = Map::new();
        for row in &self.rows {
            if let Some(value) = row.json_value(relations)? {
                insert_at_path(&mut config, &row.path, value);
            }
        }
        Ok(config)
    }
}

fn push_rows(rows: &mut Vec<ConfigRow>, field: &ConfigField, parent: &[String], depth: usize) {
    let mut path = parent.to_vec();
    path.push(field.name.clone());

    let value = match &field.kind {
        ConfigKind::String => FieldValue::Text(TextInput::default()),
        ConfigKind::Number => FieldValue::Number(TextInput::default()),
        ConfigKind::Boolean => FieldValue::Boolean(None),
        ConfigKind::Array => FieldValue::List {
            items: Vec::new(),
            input: TextInput::default(),
        },
        ConfigKind::ModelOrSource => FieldValue::Relation(None),
        ConfigKind::Dict => FieldValue::Group,
        ConfigKind::Unknown(kind) => {
            debug!("Skipping config field '{}' of unsupported type '{}'", field.name, kind);
            return;
        }
    };

    let is_group = matches!(value, FieldValue::Group);
    rows.push(ConfigRow {
        path: path.clone(),
        name: field.name.clone(),
        description: field.description.clone(),
        depth,
        value,
    });

    if is_group {
        for nested in &field.required_configs {
            push_rows(rows, nested, &path, depth + 1);
        }
    }
}

fn insert_at_path(config: &mut Map<String, Value>, path: &[String], value: Value) {
    match path {
        [] => {}
        [key] => {
            config.insert(key.clone(), value);
        }
        [key, rest @ ..] => {
            let entry = config
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_at_path(child, rest, value);
            }
        }
    }
}
