// Domain types and value objects
mod bucket_width;
mod customer;
mod order;
pub(crate) mod serde_dates;
mod transaction;

pub use {
    bucket_width::BucketWidth,
    customer::CustomerCharacteristics,
    order::OrderRecord,
    transaction::TransactionEvent,
};
