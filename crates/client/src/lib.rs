//! Desk client for the pasajes API.
//!
//! [`desk::TicketDesk`] owns the list cache, pagination, route filter and
//! edit session, and talks to the server through a [`store::RecordStore`].

pub mod command;
pub mod config;
pub mod desk;
pub mod error;
pub mod http;
pub mod notice;
pub mod render;
pub mod store;
