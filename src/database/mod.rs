//! QRGen database layer.
//!
//! Provides SQLite connection management, schema migrations, and the
//! key-value storage slots that back the generation history.
//!
//! # Usage
//!
//! ```no_run
//! use qrgen::database::{Database, KeyValueStorage};
//!
//! let db = Database::open("qrgen.db").expect("failed to open database");
//! db.set_item("qrgen-history", "[]").expect("failed to write");
//! assert_eq!(db.get_item("qrgen-history").unwrap().as_deref(), Some("[]"));
//! ```

pub mod connection;
pub mod migrations;
pub mod storage;

pub use connection::Database;
pub use storage::{KeyValueStorage, MemoryStorage};
