use crate::{parse_timestamp, RawRow, Timestamp};
use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Time,
    Quantity,
    Amount,
}

const FIELD_COUNT: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected {FIELD_COUNT} fields but found {0}")]
    FieldCount(usize),
    #[error("`{raw}` is not a valid {field:?} field")]
    InvalidField { field: Field, raw: String },
}

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: RowError },
    #[error(transparent)]
    CSVError(#[from] csv::Error),
}

/// Reads headerless `time, signed quantity, signed dollar amount` records.
pub fn parse_csv<R: std::io::Read>(
    reader: R,
) -> impl Iterator<Item = Result<RawRow<Timestamp>, ParserError>> {
    parse_from_reader(
        ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader),
    )
}

/// Parses every record of `reader`, numbering rows from 1.
pub fn parse_from_reader<R: std::io::Read>(
    reader: csv::Reader<R>,
) -> impl Iterator<Item = Result<RawRow<Timestamp>, ParserError>> {
    reader
        .into_records()
        .enumerate()
        .map(|(index, res)| parse_row(&res?, index + 1))
}

#[inline]
fn parse_row(record: &StringRecord, row: usize) -> Result<RawRow<Timestamp>, ParserError> {
    let malformed = |reason| ParserError::MalformedRow { row, reason };

    if record.len() != FIELD_COUNT {
        return Err(malformed(RowError::FieldCount(record.len())));
    }

    let invalid = |field, raw: &str| {
        malformed(RowError::InvalidField {
            field,
            raw: raw.to_string(),
        })
    };
    let number = |field, raw: &str| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| invalid(field, raw))
    };

    let time = parse_timestamp(&record[0]).ok_or_else(|| invalid(Field::Time, &record[0]))?;
    let quantity = number(Field::Quantity, &record[1])?;
    let amount = number(Field::Amount, &record[2])?;

    Ok(RawRow::new(time, quantity, amount))
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn new_year() -> Timestamp {
        NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn can_parse_buy_row() {
        assert_eq!(
            parse_row(&StringRecord::from(vec!["2021-01-01", "1.5", "150"]), 1).unwrap(),
            RawRow::new(new_year(), 1.5, 150.0)
        );
    }

    #[test]
    fn can_parse_excel_serial_sell_row() {
        assert_eq!(
            parse_row(&StringRecord::from(vec!["44197", "-2", "300.25"]), 1).unwrap(),
            RawRow::new(new_year(), -2.0, 300.25)
        );
    }

    #[test]
    fn missing_amount_is_malformed() {
        assert!(matches!(
            parse_row(&StringRecord::from(vec!["44197", "1"]), 7),
            Err(ParserError::MalformedRow {
                row: 7,
                reason: RowError::FieldCount(2)
            })
        ));
    }

    #[test]
    fn extra_field_is_malformed() {
        assert!(matches!(
            parse_row(&StringRecord::from(vec!["44197", "1", "2", "3"]), 1),
            Err(ParserError::MalformedRow {
                reason: RowError::FieldCount(4),
                ..
            })
        ));
    }

    #[test]
    fn non_numeric_quantity_is_malformed() {
        let err = parse_row(&StringRecord::from(vec!["44197", "ten", "2"]), 3).unwrap_err();
        assert!(matches!(
            &err,
            ParserError::MalformedRow {
                row: 3,
                reason: RowError::InvalidField {
                    field: Field::Quantity,
                    ..
                }
            }
        ));
        assert_eq!(
            err.to_string(),
            "Malformed row 3: `ten` is not a valid Quantity field"
        );
    }

    #[test]
    fn non_finite_amount_is_malformed() {
        assert!(matches!(
            parse_row(&StringRecord::from(vec!["44197", "1", "NaN"]), 1),
            Err(ParserError::MalformedRow {
                reason: RowError::InvalidField {
                    field: Field::Amount,
                    ..
                },
                ..
            })
        ));
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        assert!(matches!(
            parse_row(&StringRecord::from(vec!["soon", "1", "1"]), 1),
            Err(ParserError::MalformedRow {
                reason: RowError::InvalidField {
                    field: Field::Time,
                    ..
                },
                ..
            })
        ));
    }

    #[test]
    fn reads_headerless_trimmed_csv() {
        let input = "2021-01-01, 10, 1000\n44198 ,-4,480\n";
        let rows = parse_csv(input.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawRow::new(new_year(), 10.0, 1000.0));
        assert_eq!(rows[1].quantity, -4.0);
    }

    #[test]
    fn numbers_rows_from_one() {
        let input = "2021-01-01,1,1\n2021-01-02,1\n";
        let results = parse_csv(input.as_bytes()).collect::<Vec<_>>();
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ParserError::MalformedRow { row: 2, .. })
        ));
    }
}
