//! Lenient projection of wire JSON into domain types.
//!
//! Remote payloads are loosely shaped, so every accessor degrades to an
//! empty or default value instead of failing. A malformed field can never
//! abort conversion of a page; the only catch-all is the explicit
//! `Unknown` block variant.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{
    Annotations, Block, BlockKind, Database, DatabaseColumn, DatabaseRow, FormulaValue,
    HeadingLevel, MentionKind, ObjectKind, Page, ParentKind, PropertyValue, RichText, SpanKind,
};

fn str_field(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}

fn opt_str(value: &Value, key: &str) -> Option<String> {
    value[key]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn timestamp(value: &Value, key: &str) -> Option<DateTime<Utc>> {
    value[key]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Projects a page or database object to its metadata record.
pub(crate) fn parse_page(value: &Value) -> Page {
    let object = match value["object"].as_str() {
        Some("database") => ObjectKind::Database,
        _ => ObjectKind::Page,
    };

    let title = match object {
        ObjectKind::Page => page_title(value),
        ObjectKind::Database => title_array(&value["title"], "Untitled"),
    };

    Page {
        id: str_field(value, "id"),
        title,
        object,
        parent: parse_parent(&value["parent"]),
        created_time: timestamp(value, "created_time"),
        last_edited_time: timestamp(value, "last_edited_time"),
    }
}

fn parse_parent(value: &Value) -> ParentKind {
    match value["type"].as_str() {
        Some("workspace") => ParentKind::Workspace,
        Some("page_id") => ParentKind::Page(str_field(value, "page_id")),
        Some("database_id") => ParentKind::Database(str_field(value, "database_id")),
        Some("block_id") => ParentKind::Block(str_field(value, "block_id")),
        _ => ParentKind::Other,
    }
}

/// Page titles live in whichever property has type "title".
fn page_title(value: &Value) -> String {
    if let Some(properties) = value["properties"].as_object() {
        for property in properties.values() {
            if property["type"].as_str() == Some("title") {
                return title_array(&property["title"], "Untitled");
            }
        }
    }
    "Untitled".to_string()
}

/// First plain_text of a title span array, or the fallback.
fn title_array(value: &Value, fallback: &str) -> String {
    value
        .as_array()
        .and_then(|spans| spans.first())
        .and_then(|span| span["plain_text"].as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Projects one rich-text span.
pub(crate) fn parse_rich_text(value: &Value) -> RichText {
    let plain_text = str_field(value, "plain_text");

    let annotations = Annotations {
        bold: value["annotations"]["bold"].as_bool().unwrap_or(false),
        italic: value["annotations"]["italic"].as_bool().unwrap_or(false),
        strikethrough: value["annotations"]["strikethrough"]
            .as_bool()
            .unwrap_or(false),
        code: value["annotations"]["code"].as_bool().unwrap_or(false),
    };

    let kind = match value["type"].as_str().unwrap_or("text") {
        "text" => SpanKind::Text {
            content: str_field(&value["text"], "content"),
            link: value["text"]["link"]["url"]
                .as_str()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        },
        "mention" => SpanKind::Mention {
            kind: match value["mention"]["type"].as_str() {
                Some("user") => MentionKind::User,
                Some("page") => MentionKind::Page,
                Some("database") => MentionKind::Database,
                Some("date") => MentionKind::Date,
                _ => MentionKind::Other,
            },
        },
        "equation" => SpanKind::Equation {
            expression: str_field(&value["equation"], "expression"),
        },
        // unrecognized span kinds degrade to their plain text
        _ => SpanKind::Text {
            content: plain_text.clone(),
            link: None,
        },
    };

    RichText {
        kind,
        plain_text,
        href: opt_str(value, "href"),
        annotations,
    }
}

pub(crate) fn parse_rich_text_array(value: &Value) -> Vec<RichText> {
    value
        .as_array()
        .map(|spans| spans.iter().map(parse_rich_text).collect())
        .unwrap_or_default()
}

/// The URL of an externally-linked or API-hosted asset, if any.
fn asset_url(payload: &Value) -> Option<String> {
    match payload["type"].as_str() {
        Some("external") => opt_str(&payload["external"], "url"),
        Some("file") => opt_str(&payload["file"], "url"),
        _ => None,
    }
}

/// Projects one block object into the closed block enum.
pub(crate) fn parse_block(value: &Value) -> Block {
    let id = value["id"].as_str().unwrap_or("unknown").to_string();
    let type_name = value["type"].as_str().unwrap_or_default();
    let payload = &value[type_name];

    let kind = match type_name {
        "paragraph" => BlockKind::Paragraph {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
        },
        "heading_1" | "heading_2" | "heading_3" => BlockKind::Heading {
            level: match type_name {
                "heading_1" => HeadingLevel::H1,
                "heading_2" => HeadingLevel::H2,
                _ => HeadingLevel::H3,
            },
            rich_text: parse_rich_text_array(&payload["rich_text"]),
        },
        "bulleted_list_item" => BlockKind::BulletedListItem {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
        },
        "numbered_list_item" => BlockKind::NumberedListItem {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
        },
        "to_do" => BlockKind::ToDo {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
            checked: payload["checked"].as_bool().unwrap_or(false),
        },
        "toggle" => BlockKind::Toggle {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
        },
        "code" => BlockKind::Code {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
            language: str_field(payload, "language"),
        },
        "quote" => BlockKind::Quote {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
        },
        "callout" => BlockKind::Callout {
            rich_text: parse_rich_text_array(&payload["rich_text"]),
            icon: match payload["icon"]["type"].as_str() {
                Some("emoji") => opt_str(&payload["icon"], "emoji"),
                _ => None,
            },
        },
        "divider" => BlockKind::Divider,
        "equation" => BlockKind::Equation {
            expression: str_field(payload, "expression"),
        },
        "image" => BlockKind::Image {
            url: asset_url(payload),
            caption: parse_rich_text_array(&payload["caption"]),
        },
        "file" => BlockKind::File {
            url: asset_url(payload),
            caption: parse_rich_text_array(&payload["caption"]),
        },
        "bookmark" => BlockKind::Bookmark {
            url: opt_str(payload, "url"),
            caption: parse_rich_text_array(&payload["caption"]),
        },
        "child_page" => BlockKind::ChildPage {
            title: nonempty_or(str_field(payload, "title"), "Untitled"),
        },
        "child_database" => BlockKind::ChildDatabase {
            title: nonempty_or(str_field(payload, "title"), "Untitled Database"),
        },
        "table" => BlockKind::Table {
            has_column_header: payload["has_column_header"].as_bool().unwrap_or(false),
            has_row_header: payload["has_row_header"].as_bool().unwrap_or(false),
        },
        "table_row" => BlockKind::TableRow {
            cells: payload["cells"]
                .as_array()
                .map(|cells| cells.iter().map(parse_rich_text_array).collect())
                .unwrap_or_default(),
        },
        "unsupported" => BlockKind::Unsupported,
        "" => BlockKind::Unknown {
            type_name: "unknown".to_string(),
        },
        other => BlockKind::Unknown {
            type_name: other.to_string(),
        },
    };

    Block { id, kind }
}

fn nonempty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Projects a database object to its title and column schema.
pub(crate) fn parse_database(value: &Value) -> Database {
    let columns = value["properties"]
        .as_object()
        .map(|properties| {
            properties
                .iter()
                .map(|(name, property)| DatabaseColumn {
                    name: name.clone(),
                    kind: str_field(property, "type"),
                })
                .collect()
        })
        .unwrap_or_default();

    Database {
        id: str_field(value, "id"),
        title: title_array(&value["title"], "Untitled Database"),
        columns,
    }
}

/// Projects one database row (a page object with properties).
pub(crate) fn parse_database_row(value: &Value) -> DatabaseRow {
    let properties = value["properties"]
        .as_object()
        .map(|properties| {
            properties
                .iter()
                .map(|(name, property)| (name.clone(), parse_property_value(property)))
                .collect()
        })
        .unwrap_or_default();

    DatabaseRow { properties }
}

fn name_list(value: &Value, name_key: &str) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item[name_key].as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Projects one property payload to its typed cell value.
pub(crate) fn parse_property_value(value: &Value) -> PropertyValue {
    match value["type"].as_str().unwrap_or_default() {
        "title" => PropertyValue::Title(parse_rich_text_array(&value["title"])),
        "rich_text" => PropertyValue::Text(parse_rich_text_array(&value["rich_text"])),
        "number" => PropertyValue::Number(value["number"].as_f64()),
        "select" => PropertyValue::Select(opt_str(&value["select"], "name")),
        "multi_select" => PropertyValue::MultiSelect(name_list(&value["multi_select"], "name")),
        "date" => PropertyValue::Date {
            start: str_field(&value["date"], "start"),
            end: opt_str(&value["date"], "end"),
        },
        "people" => PropertyValue::People(name_list(&value["people"], "name")),
        "checkbox" => PropertyValue::Checkbox(value["checkbox"].as_bool().unwrap_or(false)),
        "url" => PropertyValue::Url(opt_str(value, "url")),
        "email" => PropertyValue::Email(opt_str(value, "email")),
        "phone_number" => PropertyValue::PhoneNumber(opt_str(value, "phone_number")),
        "status" => PropertyValue::Status(opt_str(&value["status"], "name")),
        "formula" => PropertyValue::Formula(parse_formula(&value["formula"])),
        "relation" => PropertyValue::Relation(
            value["relation"].as_array().map(Vec::len).unwrap_or(0),
        ),
        "rollup" => match value["rollup"]["type"].as_str() {
            Some("number") => PropertyValue::RollupNumber(value["rollup"]["number"].as_f64()),
            Some("array") => PropertyValue::RollupArray(
                value["rollup"]["array"].as_array().map(Vec::len).unwrap_or(0),
            ),
            _ => PropertyValue::RollupNumber(None),
        },
        "created_time" => PropertyValue::CreatedTime(str_field(value, "created_time")),
        "created_by" => PropertyValue::CreatedBy(str_field(&value["created_by"], "name")),
        "last_edited_time" => PropertyValue::LastEditedTime(str_field(value, "last_edited_time")),
        "last_edited_by" => {
            PropertyValue::LastEditedBy(str_field(&value["last_edited_by"], "name"))
        }
        "files" => PropertyValue::Files(
            value["files"]
                .as_array()
                .map(|files| {
                    files
                        .iter()
                        .map(|file| {
                            file["name"]
                                .as_str()
                                .filter(|s| !s.is_empty())
                                .unwrap_or("file")
                                .to_string()
                        })
                        .collect()
                })
                .unwrap_or_default(),
        ),
        other => PropertyValue::Other(other.to_string()),
    }
}

fn parse_formula(value: &Value) -> FormulaValue {
    match value["type"].as_str() {
        Some("string") => FormulaValue::Text(str_field(value, "string")),
        Some("number") => FormulaValue::Number(value["number"].as_f64()),
        Some("boolean") => FormulaValue::Boolean(value["boolean"].as_bool().unwrap_or(false)),
        Some("date") => FormulaValue::Date(str_field(&value["date"], "start")),
        _ => FormulaValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ===========================================
    // Rich text
    // ===========================================

    #[test]
    fn parses_text_span_with_annotations() {
        let span = parse_rich_text(&json!({
            "type": "text",
            "text": {"content": "bold", "link": null},
            "annotations": {"bold": true, "italic": false, "strikethrough": false, "code": false},
            "plain_text": "bold",
            "href": null
        }));
        assert_eq!(
            span.kind,
            SpanKind::Text {
                content: "bold".into(),
                link: None
            }
        );
        assert!(span.annotations.bold);
        assert!(!span.annotations.italic);
        assert_eq!(span.href, None);
    }

    #[test]
    fn parses_text_span_link_and_href() {
        let span = parse_rich_text(&json!({
            "type": "text",
            "text": {"content": "docs", "link": {"url": "https://a.dev"}},
            "href": "https://b.dev",
            "plain_text": "docs"
        }));
        assert_eq!(
            span.kind,
            SpanKind::Text {
                content: "docs".into(),
                link: Some("https://a.dev".into())
            }
        );
        assert_eq!(span.href.as_deref(), Some("https://b.dev"));
    }

    #[test]
    fn parses_mention_kinds() {
        let span = parse_rich_text(&json!({
            "type": "mention",
            "mention": {"type": "user"},
            "plain_text": "alice"
        }));
        assert_eq!(span.kind, SpanKind::Mention { kind: MentionKind::User });
        assert_eq!(span.plain_text, "alice");

        let span = parse_rich_text(&json!({
            "type": "mention",
            "mention": {"type": "link_preview"},
            "plain_text": "x"
        }));
        assert_eq!(span.kind, SpanKind::Mention { kind: MentionKind::Other });
    }

    #[test]
    fn unknown_span_kind_degrades_to_plain_text() {
        let span = parse_rich_text(&json!({
            "type": "template_variable",
            "plain_text": "raw"
        }));
        assert_eq!(
            span.kind,
            SpanKind::Text {
                content: "raw".into(),
                link: None
            }
        );
    }

    #[test]
    fn missing_fields_degrade_to_defaults() {
        let span = parse_rich_text(&json!({}));
        assert_eq!(span.plain_text, "");
        assert_eq!(span.annotations, Annotations::default());
        assert_eq!(
            span.kind,
            SpanKind::Text {
                content: "".into(),
                link: None
            }
        );
    }

    // ===========================================
    // Blocks
    // ===========================================

    #[test]
    fn parses_paragraph_block() {
        let block = parse_block(&json!({
            "id": "blk_1",
            "type": "paragraph",
            "paragraph": {"rich_text": [{"type": "text", "text": {"content": "hi"}, "plain_text": "hi"}]}
        }));
        assert_eq!(block.id, "blk_1");
        match block.kind {
            BlockKind::Paragraph { rich_text } => assert_eq!(rich_text.len(), 1),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn parses_heading_levels() {
        for (tag, level) in [
            ("heading_1", HeadingLevel::H1),
            ("heading_2", HeadingLevel::H2),
            ("heading_3", HeadingLevel::H3),
        ] {
            let block = parse_block(&json!({"id": "b", "type": tag, tag: {"rich_text": []}}));
            match block.kind {
                BlockKind::Heading { level: parsed, .. } => assert_eq!(parsed, level),
                other => panic!("unexpected kind: {other:?}"),
            }
        }
    }

    #[test]
    fn parses_image_url_variants() {
        let external = parse_block(&json!({
            "id": "b", "type": "image",
            "image": {"type": "external", "external": {"url": "https://x/a.png"}, "caption": []}
        }));
        match external.kind {
            BlockKind::Image { url, .. } => assert_eq!(url.as_deref(), Some("https://x/a.png")),
            other => panic!("unexpected kind: {other:?}"),
        }

        let hosted = parse_block(&json!({
            "id": "b", "type": "image",
            "image": {"type": "file", "file": {"url": "https://s3/b.png"}}
        }));
        match hosted.kind {
            BlockKind::Image { url, .. } => assert_eq!(url.as_deref(), Some("https://s3/b.png")),
            other => panic!("unexpected kind: {other:?}"),
        }

        let missing = parse_block(&json!({"id": "b", "type": "image", "image": {}}));
        match missing.kind {
            BlockKind::Image { url, .. } => assert_eq!(url, None),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn parses_table_and_rows() {
        let table = parse_block(&json!({
            "id": "t", "type": "table",
            "table": {"has_column_header": true, "has_row_header": false}
        }));
        assert_eq!(
            table.kind,
            BlockKind::Table {
                has_column_header: true,
                has_row_header: false
            }
        );

        let row = parse_block(&json!({
            "id": "r", "type": "table_row",
            "table_row": {"cells": [
                [{"type": "text", "text": {"content": "a"}, "plain_text": "a"}],
                []
            ]}
        }));
        match row.kind {
            BlockKind::TableRow { cells } => {
                assert_eq!(cells.len(), 2);
                assert_eq!(cells[0].len(), 1);
                assert!(cells[1].is_empty());
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn unknown_block_type_is_explicit() {
        let block = parse_block(&json!({"id": "b", "type": "synced_block", "synced_block": {}}));
        assert_eq!(
            block.kind,
            BlockKind::Unknown {
                type_name: "synced_block".into()
            }
        );
        assert_eq!(block.type_name(), "synced_block");
    }

    #[test]
    fn block_without_id_uses_placeholder() {
        let block = parse_block(&json!({"type": "divider", "divider": {}}));
        assert_eq!(block.id, "unknown");
        assert_eq!(block.kind, BlockKind::Divider);
    }

    // ===========================================
    // Pages
    // ===========================================

    #[test]
    fn extracts_page_title_from_title_property() {
        let page = parse_page(&json!({
            "id": "p1",
            "object": "page",
            "parent": {"type": "workspace", "workspace": true},
            "properties": {
                "Name": {"type": "title", "title": [{"plain_text": "My Page"}]},
                "Tags": {"type": "multi_select"}
            }
        }));
        assert_eq!(page.title, "My Page");
        assert_eq!(page.object, ObjectKind::Page);
        assert_eq!(page.parent, ParentKind::Workspace);
    }

    #[test]
    fn untitled_page_gets_default_title() {
        let page = parse_page(&json!({"id": "p1", "object": "page", "properties": {}}));
        assert_eq!(page.title, "Untitled");
    }

    #[test]
    fn database_title_lives_at_top_level() {
        let page = parse_page(&json!({
            "id": "d1",
            "object": "database",
            "title": [{"plain_text": "Tasks"}],
            "parent": {"type": "page_id", "page_id": "p0"}
        }));
        assert_eq!(page.title, "Tasks");
        assert_eq!(page.object, ObjectKind::Database);
        assert_eq!(page.parent, ParentKind::Page("p0".into()));
    }

    #[test]
    fn parses_timestamps() {
        let page = parse_page(&json!({
            "id": "p1",
            "object": "page",
            "created_time": "2024-03-01T10:00:00.000Z",
            "last_edited_time": "not a date"
        }));
        assert!(page.created_time.is_some());
        assert!(page.last_edited_time.is_none());
    }

    // ===========================================
    // Databases and properties
    // ===========================================

    #[test]
    fn parses_database_schema() {
        let database = parse_database(&json!({
            "id": "d1",
            "title": [{"plain_text": "Projects"}],
            "properties": {
                "Name": {"type": "title"},
                "Done": {"type": "checkbox"}
            }
        }));
        assert_eq!(database.title, "Projects");
        assert_eq!(database.columns.len(), 2);
        assert!(database.columns.iter().any(|c| c.name == "Done" && c.kind == "checkbox"));
    }

    #[test]
    fn parses_property_values() {
        assert_eq!(
            parse_property_value(&json!({"type": "number", "number": 4.5})),
            PropertyValue::Number(Some(4.5))
        );
        assert_eq!(
            parse_property_value(&json!({"type": "select", "select": {"name": "High"}})),
            PropertyValue::Select(Some("High".into()))
        );
        assert_eq!(
            parse_property_value(&json!({"type": "select", "select": null})),
            PropertyValue::Select(None)
        );
        assert_eq!(
            parse_property_value(&json!({
                "type": "date",
                "date": {"start": "2024-01-01", "end": "2024-02-01"}
            })),
            PropertyValue::Date {
                start: "2024-01-01".into(),
                end: Some("2024-02-01".into())
            }
        );
        assert_eq!(
            parse_property_value(&json!({"type": "checkbox", "checkbox": true})),
            PropertyValue::Checkbox(true)
        );
        assert_eq!(
            parse_property_value(&json!({"type": "relation", "relation": [{}, {}]})),
            PropertyValue::Relation(2)
        );
        assert_eq!(
            parse_property_value(&json!({
                "type": "formula",
                "formula": {"type": "boolean", "boolean": true}
            })),
            PropertyValue::Formula(FormulaValue::Boolean(true))
        );
        assert_eq!(
            parse_property_value(&json!({"type": "verification"})),
            PropertyValue::Other("verification".into())
        );
    }

    #[test]
    fn parses_database_row() {
        let row = parse_database_row(&json!({
            "properties": {
                "Name": {"type": "title", "title": [{"type": "text", "text": {"content": "A"}, "plain_text": "A"}]},
                "Done": {"type": "checkbox", "checkbox": false}
            }
        }));
        assert_eq!(row.properties.len(), 2);
        assert_eq!(
            row.properties.get("Done"),
            Some(&PropertyValue::Checkbox(false))
        );
    }
}
