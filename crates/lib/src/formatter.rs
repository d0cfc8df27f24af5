use crate::{ClosedPosition, Ledger, Lot};
use std::fmt::{self, Write};

/// One output line: a closed position, or an open lot with no close side.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow<T> {
    pub open_time: T,
    pub close_time: Option<T>,
    pub quantity: f64,
    pub open_price: f64,
    pub close_price: Option<f64>,
}

impl<T: Clone> From<&ClosedPosition<T>> for LedgerRow<T> {
    fn from(position: &ClosedPosition<T>) -> Self {
        Self {
            open_time: position.open_time.clone(),
            close_time: Some(position.close_time.clone()),
            quantity: position.units(),
            open_price: position.open_price,
            close_price: Some(position.close_price),
        }
    }
}

impl<T: Clone> From<&Lot<T>> for LedgerRow<T> {
    fn from(lot: &Lot<T>) -> Self {
        Self {
            open_time: lot.open_time.clone(),
            close_time: None,
            quantity: lot.units(),
            open_price: lot.open_price,
            close_price: None,
        }
    }
}

impl<T: fmt::Display> LedgerRow<T> {
    /// Renders the row into `fields`, reusing their allocations.
    pub fn render(&self, fields: &mut [String; 5]) {
        fields.iter_mut().for_each(String::clear);
        let [open_time, close_time, quantity, open_price, close_price] = fields;

        write!(open_time, "{}", self.open_time).expect("writing to a String cannot fail");
        if let Some(time) = &self.close_time {
            write!(close_time, "{time}").expect("writing to a String cannot fail");
        }
        write!(quantity, "{}", self.quantity).expect("writing to a String cannot fail");
        write!(open_price, "{}", self.open_price).expect("writing to a String cannot fail");
        if let Some(price) = self.close_price {
            write!(close_price, "{price}").expect("writing to a String cannot fail");
        }
    }
}

/// Closed positions in matching order, then open lots in queue order.
pub fn ledger_rows<T: Clone>(ledger: &Ledger<T>) -> impl Iterator<Item = LedgerRow<T>> + '_ {
    ledger
        .closed()
        .iter()
        .map(LedgerRow::from)
        .chain(ledger.open().map(LedgerRow::from))
}
