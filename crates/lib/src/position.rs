use crate::{Precision, Quantity, Transaction};
use std::fmt;

/// A still open slice of a historical buy.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot<T> {
    pub open_time: T,
    pub quantity: Quantity,
    pub open_price: f64,
    pub precision: Precision,
}

impl<T> Lot<T> {
    pub fn units(&self) -> f64 {
        self.precision.to_units(self.quantity)
    }

    /// Splits `quantity` ticks off the lot, leaving the remainder in place.
    ///
    /// `quantity` must be strictly smaller than the lot's own quantity so the
    /// residual never drops to zero.
    pub(crate) fn split_off(&mut self, quantity: Quantity) -> Self
    where
        T: Clone,
    {
        debug_assert!(0 < quantity && quantity < self.quantity);
        self.quantity -= quantity;
        Self {
            open_time: self.open_time.clone(),
            quantity,
            open_price: self.open_price,
            precision: self.precision,
        }
    }

    pub(crate) fn close(self, sell: &Transaction<T>) -> ClosedPosition<T>
    where
        T: Clone,
    {
        ClosedPosition {
            open_time: self.open_time,
            close_time: sell.time.clone(),
            quantity: self.quantity,
            open_price: self.open_price,
            close_price: sell.unit_price,
            precision: self.precision,
        }
    }
}

impl<T> From<Transaction<T>> for Lot<T> {
    fn from(buy: Transaction<T>) -> Self {
        Self {
            open_time: buy.time,
            quantity: buy.quantity,
            open_price: buy.unit_price,
            precision: buy.precision,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Lot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opened {}: {} @ {}", self.open_time, self.units(), self.open_price)
    }
}

/// The quantity matched between one sell and one (possibly partial) lot.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedPosition<T> {
    pub open_time: T,
    pub close_time: T,
    pub quantity: Quantity,
    pub open_price: f64,
    pub close_price: f64,
    pub precision: Precision,
}

impl<T> ClosedPosition<T> {
    pub fn units(&self) -> f64 {
        self.precision.to_units(self.quantity)
    }
}

impl<T: fmt::Display> fmt::Display for ClosedPosition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "opened {}: {} @ {}; closed {} for {}",
            self.open_time,
            self.units(),
            self.open_price,
            self.close_time,
            self.close_price
        )
    }
}
