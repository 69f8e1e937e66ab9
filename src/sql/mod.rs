//! Parameterized SQL for the `items` table: identifiers from config only, values as parameters.

mod builder;
pub use builder::*;
