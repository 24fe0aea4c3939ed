//! PostgreSQL persistence for Vociform.
//!
//! Provides the diesel schema, connection/pool helpers, synchronous
//! repository functions, and async [`vociform_interface`] store
//! implementations that move blocking diesel work onto
//! `spawn_blocking`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod forms;
mod models;
mod responses;
pub mod schema;
mod store;
mod usage;

pub use connection::{
    create_pool, establish_connection, missing_tables, run_migrations, PgPool, EXPECTED_TABLES,
};
pub use forms::{
    create_form, delete_form, get_active_form, get_form, list_forms, update_form,
};
pub use responses::{insert_response, list_responses};
pub use store::{DatabaseFormStore, DatabaseResponseStore, DatabaseUsageStore};
pub use usage::{
    append_event, get_or_create_account, increment_usage, recent_event_count, reset_period,
};

use vociform_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = std::result::Result<T, DatabaseError>;
