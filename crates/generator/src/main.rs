use csv::WriterBuilder;
use fifo_pnl_lib::{Precision, Quantity, Transaction, TransactionExecutor};
use rand::prelude::*;
use std::convert::Infallible;
use std::io::Write;

const FIRST_SERIAL: f64 = 44197.0;
const MINUTES_PER_DAY: f64 = 1440.0;

/// Tracks held inventory so generated sells never exceed it.
#[derive(Debug, Default)]
struct GeneratorState {
    held: Quantity,
    buys: Vec<Transaction<u32>>,
    sells: Vec<Transaction<u32>>,
}

pub enum Side {
    Buy(Transaction<u32>),
    Sell(Transaction<u32>),
}

impl TransactionExecutor<Side> for GeneratorState {
    type TransactionError = Infallible;

    fn execute(mut self, side: Side) -> Result<Self, Self::TransactionError> {
        match side {
            Side::Buy(buy) => {
                self.held += buy.quantity;
                self.buys.push(buy);
            }
            Side::Sell(sell) => {
                self.held -= sell.quantity;
                self.sells.push(sell);
            }
        }
        Ok(self)
    }
}

impl Side {
    fn transaction(&self) -> &Transaction<u32> {
        match self {
            Side::Buy(t) | Side::Sell(t) => t,
        }
    }
}

impl GeneratorState {
    /// Buys and sells merged back into one stream ordered by minute.
    fn into_iter(self) -> impl Iterator<Item = Side> {
        itertools::kmerge_by(
            [
                self.buys.into_iter().map(Side::Buy).collect::<Vec<_>>(),
                self.sells.into_iter().map(Side::Sell).collect::<Vec<_>>(),
            ],
            |a: &Side, b: &Side| a.transaction().time < b.transaction().time,
        )
    }
}

pub fn write_csv<W: Write>(
    transactions: impl Iterator<Item = Side>,
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    for side in transactions {
        let transaction = side.transaction();
        let serial = FIRST_SERIAL + transaction.time as f64 / MINUTES_PER_DAY;
        let units = transaction.units();
        let amount = units * transaction.unit_price;
        let quantity = match side {
            Side::Buy(_) => units,
            Side::Sell(_) => -units,
        };

        writer.write_record(&[
            serial.to_string(),
            quantity.to_string(),
            format!("{amount:.2}"),
        ])?;
    }

    writer.flush()
}

fn main() {
    let count = std::env::args()
        .nth(1)
        .map(|arg| arg.parse().expect("row count must be a positive integer"))
        .unwrap_or(100_000u32);
    let precision = Precision::default();
    let mut rng = thread_rng();
    let mut price = 100.0f64;

    let generator = (0..count).fold(GeneratorState::default(), |state, minute| {
        price = (price * rng.gen_range(0.99..1.01)).max(1.0);
        let quantity = rng.gen_range(1..=50 * 10i64.pow(precision.digits()));

        //roughly 60% buys so inventory keeps up with sells
        let side = if state.held == 0 || rng.gen_bool(0.6) {
            Side::Buy(Transaction::new(minute, quantity, price, precision))
        } else {
            let quantity = quantity.min(state.held);
            Side::Sell(Transaction::new(minute, quantity, price, precision))
        };

        match state.execute(side) {
            Ok(state) => state,
            Err(never) => match never {},
        }
    });

    write_csv(generator.into_iter(), std::io::stdout().lock()).unwrap();
}
