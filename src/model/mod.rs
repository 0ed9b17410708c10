//! Plain data records: products, stock transactions and the reports derived from them.

pub mod product;
pub mod report;
pub mod transaction;

pub use product::*;
pub use report::*;
pub use transaction::*;
