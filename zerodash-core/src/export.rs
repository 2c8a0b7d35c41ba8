//! CSV export of account lists

use anyhow::{Context, Result};

use crate::reader::CellValue;
use crate::tables::{Account, ActionList, Phase, Records, SheetTable};

/// File name offered for a phase download, e.g. `Phase 1A_list.csv`
pub fn export_file_name(phase: Phase) -> String {
    format!("{}_list.csv", phase.label())
}

/// Serialize accounts as UTF-8 CSV with a header row.
///
/// Every column of `list` is written in sheet order, including columns outside the fixed
/// schema. `accounts` must come from `list`.
pub fn accounts_to_csv(list: &ActionList, accounts: &[&Account]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&list.columns).context("writing CSV header")?;

    for account in accounts {
        writer
            .write_record(list.row(account))
            .with_context(|| format!("writing CSV row for '{}'", account.account_name))?;
    }

    let bytes = writer.into_inner().context("flushing CSV")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Parse CSV produced by [`accounts_to_csv`] back into an action list.
///
/// Every field is read as text and validated with the same rules as the
/// `Account_Action_List` sheet, so scores and phases get their types back while other
/// columns keep their exact text.
pub fn read_accounts_csv(text: &str) -> Result<ActionList> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(record.iter().map(text_cell).collect());
    }

    let records = Records::new(ActionList::SHEET_NAME, headers, rows)?;
    Ok(ActionList::from_records(&records)?)
}

fn text_cell(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}
