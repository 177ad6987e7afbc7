pub mod export;
pub mod lookups;
pub mod tickets;
