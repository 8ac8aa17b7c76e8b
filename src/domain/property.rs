//! Database schema and property values for tabular export.

use std::collections::BTreeMap;

use crate::domain::RichText;

/// One column of a database schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseColumn {
    pub name: String,
    /// The property type tag as the wire format spells it.
    pub kind: String,
}

/// A database's identity and ordered column schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub id: String,
    pub title: String,
    pub columns: Vec<DatabaseColumn>,
}

/// One database row: property name to value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseRow {
    pub properties: BTreeMap<String, PropertyValue>,
}

/// The result of a formula property.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    Text(String),
    Number(Option<f64>),
    Boolean(bool),
    Date(String),
    Empty,
}

/// A single database cell, by property type.
///
/// Values this tool cannot project to a cell string carry their type tag in
/// [`PropertyValue::Other`] and render as a bracketed placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichText>),
    Text(Vec<RichText>),
    Number(Option<f64>),
    Select(Option<String>),
    MultiSelect(Vec<String>),
    Date { start: String, end: Option<String> },
    People(Vec<String>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Status(Option<String>),
    Formula(FormulaValue),
    /// Relations are opaque; only the count is kept.
    Relation(usize),
    RollupNumber(Option<f64>),
    RollupArray(usize),
    CreatedTime(String),
    CreatedBy(String),
    LastEditedTime(String),
    LastEditedBy(String),
    Files(Vec<String>),
    Other(String),
}
