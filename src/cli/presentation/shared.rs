//! Shared presentation: row tables and JSON arrays.

use crate::error::PagesError;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::Serialize;

pub fn render_table<const N: usize>(headers: [&str; N], rows: Vec<[&str; N]>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.to_vec());
    }
    table.to_string()
}

pub fn render_json<T: Serialize>(rows: &[T]) -> Result<String, PagesError> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| PagesError::Config(format!("Failed to serialize output: {}", e)))
}
