//! Database-to-table rendering.

use crate::api::{ApiError, Source};
use crate::domain::{Database, FormulaValue, PropertyValue};

/// Renders a database as a titled Markdown table.
pub fn render_database(source: &dyn Source, database_id: &str) -> Result<String, ApiError> {
    let database = source.get_database(database_id)?;
    let table = database_table(source, database_id, &database)?;
    Ok(format!("# {}\n\n{table}\n", database.title))
}

/// Schema columns as the header, one line per row, `|` escaped in cells.
fn database_table(
    source: &dyn Source,
    database_id: &str,
    database: &Database,
) -> Result<String, ApiError> {
    if database.columns.is_empty() {
        return Ok("_Empty database_".to_string());
    }

    let rows = source.query_database(database_id)?;

    let mut lines = Vec::new();
    let names: Vec<&str> = database.columns.iter().map(|c| c.name.as_str()).collect();
    lines.push(format!("| {} |", names.join(" | ")));
    lines.push(format!(
        "|{}|",
        vec!["---"; database.columns.len()].join("|")
    ));

    for row in &rows {
        let cells: Vec<String> = database
            .columns
            .iter()
            .map(|column| {
                row.properties
                    .get(&column.name)
                    .map(display_value)
                    .unwrap_or_default()
                    .replace('|', "\\|")
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    Ok(lines.join("\n"))
}

/// Projects one property value to its table-cell string.
pub fn display_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Title(spans) => spans
            .first()
            .map(|span| span.plain_text.clone())
            .unwrap_or_default(),
        PropertyValue::Text(spans) => spans
            .iter()
            .map(|span| span.plain_text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        PropertyValue::Number(number) => number.map(format_number).unwrap_or_default(),
        PropertyValue::Select(name) | PropertyValue::Status(name) => {
            name.clone().unwrap_or_default()
        }
        PropertyValue::MultiSelect(names) => names.join(", "),
        PropertyValue::Date { start, end } => match end {
            Some(end) => format!("{start} → {end}"),
            None => start.clone(),
        },
        PropertyValue::People(names) => names.join(", "),
        PropertyValue::Checkbox(checked) => {
            if *checked {
                "✓".to_string()
            } else {
                String::new()
            }
        }
        PropertyValue::Url(value)
        | PropertyValue::Email(value)
        | PropertyValue::PhoneNumber(value) => value.clone().unwrap_or_default(),
        PropertyValue::Formula(formula) => match formula {
            FormulaValue::Text(text) => text.clone(),
            FormulaValue::Number(number) => number.map(format_number).unwrap_or_default(),
            FormulaValue::Boolean(true) => "Yes".to_string(),
            FormulaValue::Boolean(false) => "No".to_string(),
            FormulaValue::Date(start) => start.clone(),
            FormulaValue::Empty => String::new(),
        },
        PropertyValue::Relation(count) | PropertyValue::RollupArray(count) => {
            format!("{count} item(s)")
        }
        PropertyValue::RollupNumber(number) => number.map(format_number).unwrap_or_default(),
        PropertyValue::CreatedTime(value)
        | PropertyValue::CreatedBy(value)
        | PropertyValue::LastEditedTime(value)
        | PropertyValue::LastEditedBy(value) => value.clone(),
        PropertyValue::Files(names) => names.join(", "),
        PropertyValue::Other(kind) => format!("[{kind}]"),
    }
}

/// Whole numbers print without a trailing `.0`.
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}
