//! Tabular export

use crate::models::Album;
use crate::Result;

/// Columns used when none are requested
pub const DEFAULT_FIELDS: &[&str] = &["id", "artist", "album", "release_date", "status.stage", "final_score"];

/// Render albums as CSV with one column per requested field.
///
/// Values come from [`Album::field_value`]; absent and unknown fields are
/// written as empty cells.
pub fn render_csv(albums: &[&Album], fields: &[String]) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(fields)?;

    for album in albums {
        let row: Vec<String> = fields
            .iter()
            .map(|field| album.field_value(field).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

/// Parse a `--fields` value, falling back to [`DEFAULT_FIELDS`]
pub fn parse_fields(fields: Option<&str>) -> Vec<String> {
    match fields {
        Some(list) if !list.trim().is_empty() => crate::models::album::split_list(list),
        _ => DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
    }
}
