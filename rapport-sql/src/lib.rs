//! rapport-sql
//!
//! [`SqlCatalog`] reads the Northwind product catalog from a SQLite database
//! holding the Northwind `Products` and `Suppliers` tables.
//!
//! Each session owns one database connection. It is opened when a report
//! starts and closed when the session is dropped. Query descriptors are
//! translated into SQL, and pages are read with `LIMIT`/`OFFSET` over a fixed
//! row order, so the connector reports rows exactly as the database sorted them.
#![warn(missing_docs)]

mod catalog;
mod sql;

pub use catalog::{SqlCatalog, SqlCatalogBuilder};
