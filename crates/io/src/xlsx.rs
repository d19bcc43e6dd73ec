// Excel workbook import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import converts every sheet into a sparse grid of typed cell values.
// Export writes one result table into a single-sheet workbook, entirely in
// memory — the caller decides where the bytes go.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use log::debug;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use kwsum_engine::grid::{CellValue, Grid};
use kwsum_engine::table::ResultTable;

use crate::error::{ExportError, ImportError};

/// Read a workbook byte stream into one grid per sheet, in workbook order.
///
/// Cell mapping: strings are trimmed (whitespace-only becomes a missing
/// cell), numbers stay numbers, error cells are skipped. A sheet with no
/// content still yields a grid — the pipeline's skip rules deal with it.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<Grid>, ImportError> {
    let mut workbook: Sheets<_> = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ImportError::MalformedWorkbook(e.to_string()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(ImportError::MalformedWorkbook(
            "workbook contains no sheets".to_string(),
        ));
    }

    let mut grids: Vec<Grid> = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ImportError::SheetRead {
                sheet: sheet_name.clone(),
                message: e.to_string(),
            })?;

        let mut grid = Grid::new(sheet_name);

        // Range start offset (data may not begin at A1)
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        for (row_idx, row) in range.rows().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let value = match cell {
                    Data::Empty | Data::Error(_) => continue,
                    Data::String(s) => {
                        let trimmed = s.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        CellValue::Text(trimmed.to_string())
                    }
                    Data::Float(n) => CellValue::Number(*n),
                    Data::Int(n) => CellValue::Number(*n as f64),
                    Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
                    Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
                    Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
                };
                grid.set(
                    start_row as usize + row_idx,
                    start_col as usize + col_idx,
                    value,
                );
            }
        }

        debug!("imported sheet '{}': {} cells", sheet_name, grid.cell_count());
        grids.push(grid);
    }

    Ok(grids)
}

/// Write a result table into a single-sheet xlsx, returned as bytes.
///
/// Header presence and the sheet name come from the table's declared shape;
/// record order is written exactly as produced.
pub fn write_table(table: &ResultTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook.add_worksheet().set_name(&table.sheet_name)?;

    let mut row_idx: u32 = 0;

    if let Some(headers) = &table.headers {
        let header_format = Format::new().set_bold();
        for (col_idx, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(row_idx, col_idx as u16, header, &header_format)?;
        }
        row_idx += 1;
    }

    for record in &table.rows {
        for (col_idx, cell) in record.iter().enumerate() {
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row_idx, col_idx as u16, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_idx, col_idx as u16, *n)?;
                }
            }
        }
        row_idx += 1;
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(
        "exported '{}': {} records, {} bytes",
        table.sheet_name,
        table.rows.len(),
        bytes.len()
    );
    Ok(bytes)
}
