//! CSV export of the raw and cleaned tables.

use std::io::{Read, Write};

use crate::error::Result;
use crate::models::{Category, CleanTable, Column, RawTable};
use crate::session::{TableKind, TableView};

pub fn write_raw_csv<W: Write>(table: &RawTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if table.is_empty() {
        wtr.write_record(Column::TEXT.iter().map(|c| c.header()))?;
    }
    for listing in table.iter() {
        wtr.serialize(listing)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Surviving columns as text, then `PriceValue` as a number (empty when undefined).
pub fn write_clean_csv<W: Write>(table: &CleanTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns.iter().map(|c| c.header()))?;

    for row in &table.rows {
        let price_value = row.price_value.map(|v| v.to_string()).unwrap_or_default();
        let record = row
            .cells
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(price_value.as_str()));
        wtr.write_record(record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(view: TableView<'_>, writer: W) -> Result<()> {
    match view {
        TableView::Raw(table) => write_raw_csv(table, writer),
        TableView::Clean(table) => write_clean_csv(table, writer),
    }
}

pub fn to_csv_string(view: TableView<'_>) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// `coinafrique_<segment>_<brutes|nettoyees>.csv`
pub fn export_file_name(category: Category, kind: TableKind) -> String {
    format!("coinafrique_{}_{}.csv", category.segment(), kind.label())
}

/// Header row and records of a CSV export.
pub fn read_csv_table<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    let rows = rdr
        .records()
        .map(|record| Ok(record?.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>>>()?;
    Ok((headers, rows))
}
