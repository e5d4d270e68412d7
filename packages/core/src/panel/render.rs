// Рендеринг списка записей
//
// Markup is produced by an external template primitive. This adapter only
// escapes the records and hands them over; the engine escapes nothing itself.

use serde::Serialize;
use std::fmt::Write as _;

use crate::error::Result;
use crate::storage::models::{BackendKind, StorageRecord};

/// Tab container; `.vc-log` is the stable list container
pub const TABBOX_TEMPLATE: &str = r#"<div class="vc-storage-tabbox">
  <div class="vc-log"></div>
</div>"#;

/// Record table with per-row edit/delete buttons
pub const LIST_TEMPLATE: &str = r#"<div class="vc-table">
  <dl class="vc-table-row">
    <dd class="vc-table-col">Name</dd>
    <dd class="vc-table-col vc-table-col-2">Value</dd>
    <dd class="vc-table-col">Action</dd>
  </dl>
  {{for (var i = 0; i < list.length; i++)}}
  <dl class="vc-table-row">
    <dd class="vc-table-col">{{list[i].name}}</dd>
    <dd class="vc-table-col vc-table-col-2">{{list[i].value}}</dd>
    <dd class="vc-table-col">
      <a class="vc-table-col-button change" data-type="{{currentType}}" data-name="{{list[i].name}}" data-value="{{list[i].value}}">Edit</a>
      <a class="vc-table-col-button delete" data-type="{{currentType}}" data-name="{{list[i].name}}">Delete</a>
    </dd>
  </dl>
  {{/for}}
</div>"#;

/// Data handed to the template primitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub list: Vec<StorageRecord>,
    pub current_type: BackendKind,
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// External `render(template, data)` + `escape(string)` primitives
pub trait TemplateEngine {
    fn render(&self, template: &str, data: &ListView) -> Result<String>;

    fn escape(&self, text: &str) -> String {
        escape_html(text)
    }
}

/// Renders [`LIST_TEMPLATE`]'s markup without a template interpreter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplateEngine;

impl TemplateEngine for BuiltinTemplateEngine {
    fn render(&self, _template: &str, data: &ListView) -> Result<String> {
        let kind = data.current_type.type_id();
        let mut markup = String::from(
            "<div class=\"vc-table\"><dl class=\"vc-table-row\">\
             <dd class=\"vc-table-col\">Name</dd>\
             <dd class=\"vc-table-col vc-table-col-2\">Value</dd>\
             <dd class=\"vc-table-col\">Action</dd></dl>",
        );
        for record in &data.list {
            write!(
                markup,
                "<dl class=\"vc-table-row\">\
                 <dd class=\"vc-table-col\">{name}</dd>\
                 <dd class=\"vc-table-col vc-table-col-2\">{value}</dd>\
                 <dd class=\"vc-table-col\">\
                 <a class=\"vc-table-col-button change\" data-type=\"{kind}\" data-name=\"{name}\" data-value=\"{value}\">Edit</a> \
                 <a class=\"vc-table-col-button delete\" data-type=\"{kind}\" data-name=\"{name}\">Delete</a>\
                 </dd></dl>",
                name = record.name,
                value = record.value,
                kind = kind,
            )
            .ok();
        }
        markup.push_str("</div>");
        Ok(markup)
    }
}

pub struct ListRenderer {
    engine: Box<dyn TemplateEngine>,
}

impl ListRenderer {
    pub fn new(engine: Box<dyn TemplateEngine>) -> Self {
        Self { engine }
    }

    /// An empty list renders as an empty container.
    pub fn render_records(&self, kind: BackendKind, records: Vec<StorageRecord>) -> Result<String> {
        if records.is_empty() {
            return Ok(String::new());
        }

        let list = records
            .into_iter()
            .map(|record| StorageRecord {
                name: self.engine.escape(&record.name),
                value: self.engine.escape(&record.value),
            })
            .collect();

        self.engine.render(
            LIST_TEMPLATE,
            &ListView {
                list,
                current_type: kind,
            },
        )
    }
}

impl Default for ListRenderer {
    fn default() -> Self {
        Self::new(Box::new(BuiltinTemplateEngine))
    }
}
