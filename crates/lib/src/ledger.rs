use crate::{ClosedPosition, Lot, Quantity, Transaction, TransactionExecutor};
use std::{collections::VecDeque, fmt};
use thiserror::Error;
use tracing::{debug, error, info, trace};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransactionExecutionError {
    #[error(
        "Insufficient inventory: sell #{sell} at {time} for {requested} units has {unmatched} units left unmatched"
    )]
    InsufficientInventory {
        /// 1-based position of the sell in time order
        sell: usize,
        time: String,
        requested: f64,
        unmatched: f64,
    },
}

/// FIFO book of one account in one instrument.
///
/// The open queue holds lots oldest first; a partially consumed lot goes
/// back to the front, so the head is always the next lot to be sold.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger<T> {
    open: VecDeque<Lot<T>>,
    closed: Vec<ClosedPosition<T>>,
    sells: usize,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            open: VecDeque::new(),
            closed: Vec::new(),
            sells: 0,
        }
    }
}

impl<T> Ledger<T> {
    /// Seeds the open queue with one lot per buy, keeping the given order.
    pub fn from_buys(buys: impl IntoIterator<Item = Transaction<T>>) -> Self {
        Self {
            open: buys.into_iter().map(Lot::from).collect(),
            ..Default::default()
        }
    }

    pub fn open(&self) -> impl ExactSizeIterator<Item = &Lot<T>> + '_ {
        self.open.iter()
    }

    pub fn closed(&self) -> &[ClosedPosition<T>] {
        &self.closed
    }

    pub fn open_quantity(&self) -> Quantity {
        self.open.iter().map(|lot| lot.quantity).sum()
    }

    pub fn closed_quantity(&self) -> Quantity {
        self.closed.iter().map(|position| position.quantity).sum()
    }

    pub fn into_parts(self) -> (Vec<ClosedPosition<T>>, Vec<Lot<T>>) {
        (self.closed, self.open.into())
    }
}

impl<T: Clone + fmt::Display> TransactionExecutor<Transaction<T>> for &mut Ledger<T> {
    type TransactionError = TransactionExecutionError;

    /// Closes `sell` against the oldest open lots.
    fn execute(self, sell: Transaction<T>) -> Result<Self, Self::TransactionError> {
        self.sells += 1;
        debug!(index = self.sells, %sell, "matching sell");

        let mut remaining = sell.quantity;
        while remaining > 0 {
            let Some(mut lot) = self.open.pop_front() else {
                let err = TransactionExecutionError::InsufficientInventory {
                    sell: self.sells,
                    time: sell.time.to_string(),
                    requested: sell.units(),
                    unmatched: sell.precision.to_units(remaining),
                };
                error!(%err, "open lots exhausted");
                return Err(err);
            };

            if remaining >= lot.quantity {
                trace!(%lot, "closing lot");
                remaining -= lot.quantity;
                self.closed.push(lot.close(&sell));
            } else {
                let taken = lot.split_off(remaining);
                trace!(%taken, residual = %lot, "splitting lot");
                self.closed.push(taken.close(&sell));
                self.open.push_front(lot);
                remaining = 0;
            }
        }

        Ok(self)
    }
}

/// Matches time-ordered `sells` against time-ordered `buys`.
///
/// Every buy is queued before the first sell is applied. Fails on the first
/// sell that outstrips the remaining open lots.
pub fn match_fifo<T: Ord + Clone + fmt::Display>(
    buys: Vec<Transaction<T>>,
    sells: Vec<Transaction<T>>,
) -> Result<Ledger<T>, TransactionExecutionError> {
    debug_assert!(buys.windows(2).all(|w| w[0].time <= w[1].time));
    debug_assert!(sells.windows(2).all(|w| w[0].time <= w[1].time));

    let mut ledger = Ledger::from_buys(buys);
    for sell in sells {
        ledger.execute(sell)?;
    }

    info!(
        closed = ledger.closed.len(),
        open = ledger.open.len(),
        "matched sells against open lots"
    );
    Ok(ledger)
}
