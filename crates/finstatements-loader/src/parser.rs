//! CSV ledger parser

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{LoadError, LoadResult};
use crate::types::{LedgerRecord, LoadOptions, REQUIRED_COLUMNS};

/// Raw row as it appears in the file; extra columns are ignored
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Account Type")]
    account_type: String,
    #[serde(rename = "Account Name")]
    account_name: String,
    #[serde(rename = "Debit", default)]
    debit: Option<String>,
    #[serde(rename = "Credit", default)]
    credit: Option<String>,
}

/// Line-oriented parser for trial balance exports
pub struct CsvLedgerParser;

impl CsvLedgerParser {
    /// Parse CSV content into typed ledger records
    pub fn parse(content: &[u8], options: &LoadOptions) -> LoadResult<Vec<LedgerRecord>> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content);

        let headers = rdr.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LoadError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = index + 1;
            let raw = result?;

            // Fully blank lines show up as rows of empty cells in spreadsheet exports
            if raw.date.is_empty() && raw.account_type.is_empty() && raw.account_name.is_empty() {
                log::debug!("Skipping blank ledger row {}", row);
                continue;
            }

            records.push(LedgerRecord {
                row,
                date: parse_date(&raw.date, row, &options.date_formats)?,
                account_type: raw.account_type,
                account_name: raw.account_name,
                debit: parse_amount(raw.debit.as_deref(), row, "Debit")?,
                credit: parse_amount(raw.credit.as_deref(), row, "Credit")?,
            });
        }

        log::debug!("Parsed {} ledger records", records.len());
        Ok(records)
    }
}

fn parse_date(value: &str, row: usize, formats: &[String]) -> LoadResult<NaiveDate> {
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }
    Err(LoadError::InvalidDate {
        row,
        value: value.to_string(),
    })
}

fn parse_amount(value: Option<&str>, row: usize, column: &str) -> LoadResult<Decimal> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(Decimal::ZERO),
        Some(v) => v,
    };

    let amount = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| LoadError::InvalidAmount {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LoadError::NegativeAmount {
            row,
            column: column.to_string(),
            value: value.to_string(),
        });
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(content: &str) -> LoadResult<Vec<LedgerRecord>> {
        CsvLedgerParser::parse(content.as_bytes(), &LoadOptions::default())
    }

    #[test]
    fn test_parse_basic() {
        let records = parse(
            "Date,Account Type,Account Name,Debit,Credit\n\
             2025-05-01,Revenue,Service Revenue,0,100000\n\
             2025-05-01,Asset,Cash at Bank,100000,0\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row, 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert_eq!(records[0].account_type, "Revenue");
        assert_eq!(records[0].credit, dec!(100000));
        assert_eq!(records[1].debit, dec!(100000));
    }

    #[test]
    fn test_extra_columns_and_order() {
        let records = parse(
            "Memo,Credit,Debit,Account Name,Account Type,Date\n\
             opening,0,250.50,Cash at Bank,Asset,2024-01-31\n",
        )
        .unwrap();

        assert_eq!(records[0].debit, dec!(250.50));
        assert_eq!(records[0].account_name, "Cash at Bank");
    }

    #[test]
    fn test_blank_amount_is_zero() {
        let records = parse(
            "Date,Account Type,Account Name,Debit,Credit\n\
             2025-05-01,Expense,Rent,1200,\n",
        )
        .unwrap();
        assert_eq!(records[0].credit, Decimal::ZERO);
    }

    #[test]
    fn test_trimmed_cells_and_datetime() {
        let records = parse(
            "Date,Account Type,Account Name,Debit,Credit\n\
             2025-05-01 00:00:00 , Asset , Cash at Bank , 10 , 0\n",
        )
        .unwrap();
        assert_eq!(records[0].account_type, "Asset");
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
    }

    #[test]
    fn test_missing_column() {
        let err = parse("Date,Account Type,Account Name,Debit\n2025-05-01,Asset,Cash,1\n").unwrap_err();
        match err {
            LoadError::MissingColumn { column } => assert_eq!(column, "Credit"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_date() {
        let err = parse(
            "Date,Account Type,Account Name,Debit,Credit\n\
             2025-05-01,Asset,Cash,1,0\n\
             not-a-date,Asset,Cash,1,0\n",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 2, .. }));
    }

    #[test]
    fn test_invalid_amount() {
        let err = parse(
            "Date,Account Type,Account Name,Debit,Credit\n\
             2025-05-01,Asset,Cash,abc,0\n",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::InvalidAmount { row: 1, .. }));
    }

    #[test]
    fn test_negative_amount() {
        let err = parse(
            "Date,Account Type,Account Name,Debit,Credit\n\
             2025-05-01,Asset,Cash,0,-5\n",
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::NegativeAmount { row: 1, .. }));
    }

    #[test]
    fn test_custom_date_format() {
        let options = LoadOptions::with_date_formats(vec!["%m/%d/%Y".to_string()]);
        let records = CsvLedgerParser::parse(
            b"Date,Account Type,Account Name,Debit,Credit\n05/31/2025,Asset,Cash,1,0\n",
            &options,
        )
        .unwrap();
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
    }

    #[test]
    fn test_empty_ledger() {
        let records = parse("Date,Account Type,Account Name,Debit,Credit\n").unwrap();
        assert!(records.is_empty());
    }
}
