//! CSV export

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

use crate::model::Row;

/// Join cell values with `,` and rows with `\n`.
///
/// Values containing commas, quotes or newlines are quoted. A row with no
/// content is an empty line. There is no trailing newline.
pub fn generate_csv_export(rows: &[Row]) -> Result<String> {
    let mut builder = WriterBuilder::new();
    builder.flexible(true).terminator(Terminator::Any(b'\n'));
    let mut wtr = builder.from_writer(Vec::new());

    for (idx, row) in rows.iter().enumerate() {
        // The csv writer quotes a lone empty field as `""`
        if row.len() <= 1 && row.iter().all(|cell| cell.to_string().is_empty()) {
            let mut buf = wtr.into_inner().context("Failed to flush CSV writer")?;
            buf.push(b'\n');
            wtr = builder.from_writer(buf);
            continue;
        }

        wtr.write_record(row.iter().map(|cell| cell.to_string()))
            .with_context(|| format!("Failed to write CSV row {}", idx + 1))?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    let mut content = String::from_utf8(bytes).context("CSV output is not valid UTF-8")?;

    if content.ends_with('\n') {
        content.pop();
    }

    Ok(content)
}
