pub mod filter;
pub mod bank;

pub use filter::Filter;
pub use bank::{FilterPipeline, edge_filters};
