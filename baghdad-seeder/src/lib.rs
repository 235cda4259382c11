pub mod catalog;
pub mod generator;
pub mod names;
pub mod random;

/// Rows per INSERT statement, well under the Postgres bind parameter limit.
pub const BATCH_SIZE: usize = 1000;
