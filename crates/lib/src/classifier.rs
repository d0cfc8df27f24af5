use crate::{ConversionError, Precision, Transaction};
use thiserror::Error;
use tracing::warn;

/// A record as read from the input: signed quantity and signed dollar amount.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow<T> {
    pub time: T,
    pub quantity: f64,
    pub amount: f64,
}

impl<T> RawRow<T> {
    pub fn new(time: T, quantity: f64, amount: f64) -> Self {
        Self {
            time,
            quantity,
            amount,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Malformed row {row}: {source}")]
    MalformedRow { row: usize, source: ConversionError },
}

/// Buys and sells, each stable-sorted by time.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified<T> {
    pub buys: Vec<Transaction<T>>,
    pub sells: Vec<Transaction<T>>,
}

/// Splits `rows` into buys and sells on the sign of their quantity.
///
/// Sell quantities are negated so every classified transaction carries a
/// positive tick count. Rows with no quantity at `precision`, either exactly
/// zero or rounding to zero ticks, are dropped with a warning. Rows are
/// numbered from 1 in error messages.
pub fn classify<T: Ord>(
    rows: impl IntoIterator<Item = RawRow<T>>,
    precision: Precision,
) -> Result<Classified<T>, ClassifyError> {
    let mut buys = Vec::new();
    let mut sells = Vec::new();

    for (index, RawRow { time, quantity, amount }) in rows.into_iter().enumerate() {
        let row = index + 1;
        let (side, ticks, unit_price) = if quantity > 0.0 {
            (&mut buys, precision.to_ticks(quantity), amount / quantity)
        } else if quantity < 0.0 {
            (&mut sells, precision.to_ticks(-quantity), -amount / quantity)
        } else if quantity == 0.0 {
            warn!(row, "dropping row with zero quantity");
            continue;
        } else {
            return Err(ClassifyError::MalformedRow {
                row,
                source: ConversionError::OutOfRange(quantity),
            });
        };

        let ticks = ticks.map_err(|source| ClassifyError::MalformedRow { row, source })?;
        if ticks == 0 {
            warn!(row, quantity, %precision, "dropping row that rounds to zero ticks");
            continue;
        }

        side.push(Transaction::new(time, ticks, unit_price, precision));
    }

    // `sort_by` is stable, ties keep their input order
    buys.sort_by(|a, b| a.time.cmp(&b.time));
    sells.sort_by(|a, b| a.time.cmp(&b.time));

    Ok(Classified { buys, sells })
}
