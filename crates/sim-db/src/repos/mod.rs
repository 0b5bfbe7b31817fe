//! Port implementations for [`LibsqlStore`](crate::store::LibsqlStore).
//!
//! Each module implements one repository trait from [`crate::ports`] via an
//! `impl ... for LibsqlStore` block.

pub mod history;
pub mod preferences;
pub mod project;
