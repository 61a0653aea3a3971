use std::path::Path;

use rust_xlsxwriter::Workbook;

use crate::model::table::Table;
use crate::services::encoding;

/// Loads the input CSV into a `Table`, detecting the character encoding
/// first and guaranteeing the required columns afterwards.
pub fn read_csv(path: &Path) -> Result<Table, String> {
    let text = encoding::read_to_string(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| format!("{}: {e}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("{}: {e}", path.display()))?;
        if record.len() > columns.len() {
            eprintln!(
                "[table] {}: row {} has {} cell(s) beyond the header; dropping them",
                path.display(),
                i + 1,
                record.len() - columns.len()
            );
        }
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    let mut table = Table::new(columns, rows);
    table.ensure_required_columns();
    Ok(table)
}

pub fn write_csv(path: &Path, table: &Table) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| format!("{}: {e}", path.display()))?;

    writer
        .write_record(&table.columns)
        .map_err(|e| e.to_string())?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}

/// Secondary spreadsheet output; cell values are identical to the CSV.
pub fn write_xlsx(path: &Path, table: &Table) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Movies").map_err(|e| e.to_string())?;

    for (c, name) in table.columns.iter().enumerate() {
        sheet
            .write_string(0, c as u16, name)
            .map_err(|e| e.to_string())?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet
                .write_string(r as u32 + 1, c as u16, cell)
                .map_err(|e| e.to_string())?;
        }
    }

    workbook.save(path).map_err(|e| e.to_string())
}
