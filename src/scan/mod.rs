pub mod cadence;
pub mod chunk;
pub mod classifier;
pub mod filter;
pub mod store;

pub use classifier::Classifier;
pub use store::CategoryMap;
