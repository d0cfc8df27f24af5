use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ConversionError(#[from] crate::ticks::ConversionError),
    #[error(transparent)]
    ParserError(#[from] crate::parser::ParserError),
    #[error(transparent)]
    ClassifyError(#[from] crate::classifier::ClassifyError),
    #[error(transparent)]
    TransactionExecutionError(#[from] crate::ledger::TransactionExecutionError),
    #[error("Failed to write ledger")]
    WriteError(#[from] std::io::Error),
}
