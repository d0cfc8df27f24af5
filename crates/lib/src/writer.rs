use crate::{ledger_rows, Ledger};
use csv::WriterBuilder;
use std::{fmt::Display, io::Write};
use strum::VariantNames;
use strum_macros::EnumVariantNames;

/// Output columns, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumVariantNames)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Column {
    OpenTime,
    CloseTime,
    Qty,
    OpenPx,
    ClosePx,
}

pub fn write_csv<T: Clone + Display, W: Write>(
    ledger: &Ledger<T>,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(Column::VARIANTS)?;

    let mut fields: [String; 5] = Default::default();
    for row in ledger_rows(ledger) {
        row.render(&mut fields);
        writer.write_record(&fields)?;
    }

    writer.flush()
}
