use crate::{Precision, Quantity};
use std::fmt;

/// A buy or a sell after classification. The quantity is always positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction<T> {
    pub time: T,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub precision: Precision,
}

impl<T> Transaction<T> {
    pub fn new(time: T, quantity: Quantity, unit_price: f64, precision: Precision) -> Self {
        Self {
            time,
            quantity,
            unit_price,
            precision,
        }
    }

    pub fn units(&self) -> f64 {
        self.precision.to_units(self.quantity)
    }
}

impl<T: fmt::Display> fmt::Display for Transaction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} @ {}", self.time, self.units(), self.unit_price)
    }
}

/// Applies a transaction to some state, handing the updated state back.
pub trait TransactionExecutor<T>: Sized {
    type TransactionError;

    fn execute(self, transaction: T) -> Result<Self, Self::TransactionError>;
}
