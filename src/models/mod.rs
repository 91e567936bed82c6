//! Data models for the sales dashboard.
//!
//! Storage rows, request bodies and the joined views handed to the panel and report pipeline.

mod disparos;
mod event;
mod report;
mod salesperson;
mod store;
mod validation;

pub use disparos::*;
pub use event::*;
pub use report::*;
pub use salesperson::*;
pub use store::*;
pub use validation::*;
