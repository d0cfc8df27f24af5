mod classifier;
mod error;
mod formatter;
mod ledger;
mod parser;
mod position;
mod ticks;
mod timestamp;
mod transaction;
mod writer;

pub use classifier::*;
pub use error::Error;
pub use formatter::*;
pub use ledger::*;
pub use parser::{parse_csv, parse_from_reader, Field, ParserError, RowError};
pub use position::*;
pub use ticks::*;
pub use timestamp::*;
pub use transaction::*;
pub use writer::{write_csv, Column};

/// Reads every transaction from `reader` and matches it into a FIFO ledger.
///
/// Nothing is returned unless the whole input parses, classifies and matches.
#[tracing::instrument(skip(reader))]
pub fn run<R: std::io::Read>(reader: R, precision: i64) -> Result<Ledger<Timestamp>, Error> {
    let precision = Precision::new(precision)?;
    let rows = parse_csv(reader).collect::<Result<Vec<_>, _>>()?;
    let Classified { buys, sells } = classify(rows, precision)?;
    tracing::debug!(buys = buys.len(), sells = sells.len(), "classified transactions");

    Ok(match_fifo(buys, sells)?)
}

/// [`run`] followed by [`write_csv`]; `writer` is untouched if the run fails.
pub fn execute<R: std::io::Read, W: std::io::Write>(
    reader: R,
    writer: W,
    precision: i64,
) -> Result<(), Error> {
    let ledger = run(reader, precision)?;
    Ok(write_csv(&ledger, writer)?)
}
