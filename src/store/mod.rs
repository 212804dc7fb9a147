pub mod memory;

pub use memory::QuoteHistory;
