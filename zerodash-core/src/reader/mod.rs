//! Excel/ODS file reader using calamine

use calamine::{Data, ExcelDateTime, Range, Reader, Sheets, open_workbook_auto};
use chrono::NaiveTime;
use std::path::Path;

use crate::error::{DataLoadError, LoadResult};

pub mod workbook;

pub use workbook::{Cell, CellValue, Sheet, Workbook};

/// Read every sheet of a workbook into memory.
///
/// The underlying file handle lives only for the duration of this call. A sheet that
/// calamine cannot decode is kept with its `parse_error` set, so callers that never
/// touch it are unaffected.
pub fn read_workbook<P: AsRef<Path>>(path: P) -> LoadResult<Workbook> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut excel: Sheets<_> = open_workbook_auto(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let sheet = match excel.worksheet_range(sheet_name) {
            Ok(range) => parse_sheet(sheet_name, &range),
            Err(e) => {
                log::warn!("could not read sheet '{}': {}", sheet_name, e);
                Sheet {
                    parse_error: Some(e.to_string()),
                    ..Sheet::new(sheet_name.as_str())
                }
            }
        };
        log::debug!("read sheet '{}' ({} cells)", sheet.name, sheet.cells.len());
        sheets.push(sheet);
    }

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
    })
}

fn parse_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);

    // calamine positions are relative to the first used cell
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

    for (rel_row, rel_col, data) in range.cells() {
        if matches!(data, Data::Empty) {
            continue;
        }
        sheet.insert(
            row_offset + rel_row as u32,
            col_offset + rel_col as u32,
            parse_cell_value(data),
        );
    }

    sheet
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => parse_datetime(dt),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Dates render the way they read in the sheet; durations keep their serial value
fn parse_datetime(dt: &ExcelDateTime) -> CellValue {
    match dt.as_datetime() {
        Some(value) if dt.is_datetime() => {
            let text = if value.time() == NaiveTime::MIN {
                value.format("%Y-%m-%d").to_string()
            } else {
                value.format("%Y-%m-%d %H:%M:%S").to_string()
            };
            CellValue::Text(text)
        }
        _ => CellValue::Number(dt.as_f64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = read_workbook("does/not/exist.xlsx").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_parse_sheet_keeps_absolute_positions() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Value".into()));
        range.set_value((3, 1), Data::Int(42));
        range.set_value((3, 2), Data::Bool(true));

        let sheet = parse_sheet("Executive_Overview", &range);
        assert_eq!(sheet.bounds, Some(((2, 1), (3, 2))));
        assert_eq!(
            sheet.get_cell(3, 1).map(|c| c.value.clone()),
            Some(CellValue::Number(42.0))
        );
        assert_eq!(
            sheet.get_cell(2, 1).map(|c| c.value.clone()),
            Some(CellValue::Text("Value".into()))
        );
        assert!(sheet.get_cell(2, 2).is_none());
    }

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(
            parse_cell_value(&Data::String("x".into())),
            CellValue::Text("x".into())
        );
        assert!(parse_cell_value(&Data::Empty).is_empty());
    }

    #[test]
    fn test_date_cells_render_as_dates() {
        use calamine::ExcelDateTimeType;

        let date = ExcelDateTime::new(45123.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            parse_cell_value(&Data::DateTime(date)),
            CellValue::Text("2023-07-16".into())
        );

        let noon = ExcelDateTime::new(45123.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            parse_cell_value(&Data::DateTime(noon)),
            CellValue::Text("2023-07-16 12:00:00".into())
        );
    }
}
