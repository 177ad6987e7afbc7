//! Domain core for the pasajes desk.
//!
//! Pure types and state machines shared by the record store, the HTTP API and
//! the desk client. Nothing in this crate performs I/O.

pub mod edit_session;
pub mod error;
pub mod fault;
pub mod filter;
pub mod list_cache;
pub mod pagination;
pub mod ticket;
pub mod types;
mod wire;

#[cfg(test)]
mod test_support;
