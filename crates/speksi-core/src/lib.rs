pub mod acceptance;
pub mod config;
pub mod doc_status;
pub mod error;
pub mod index_sync;
pub mod io;
pub mod ledger;
pub mod lifecycle;
pub mod paths;
pub mod phase;
pub mod spec;
pub mod story;
pub mod types;

pub use error::{Result, SpeksiError};
