//! invoicing-admin: line-item tax computation, document totals and REST access
//! for the invoicing administration tool.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
