//! Route naming: classification of route tokens and rail line translation.
//!
//! All naming knowledge lives in one [`LineTable`], loaded from JSON (a
//! copy is compiled in) and validated at load time:
//!
//! - rail line names, each with the name the rail feed uses for it
//! - subway line codes
//! - the single-character trolley prefix
//!
//! Classification and name translation are pure functions of the table.

mod classify;
mod error;
mod names;
mod table;

pub use error::LineTableError;
pub use names::NameMapping;
pub use table::LineTable;
