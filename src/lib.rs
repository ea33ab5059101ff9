//! Generate SQL scripts that anonymize the contents of a database.
//!
//! The pipeline is:
//! 1. [`seeds::load_seeds`] builds the seed registry (embedded defaults plus
//!    optional override files)
//! 2. [`mapping::load_column_specs`] reads the `table -> column -> {type, source}`
//!    mapping
//! 3. [`script::generate_script`] formats every column with a
//!    [`formatter::Dialect`] and merges inserts and updates into the dialect's
//!    template
//! 4. [`delivery::write_script`] persists the result, asking before
//!    overwriting

pub mod delivery;
pub mod error;
pub mod formatter;
pub mod mapping;
pub mod script;
pub mod seeds;

pub use error::{ObfuscateError, Result};
