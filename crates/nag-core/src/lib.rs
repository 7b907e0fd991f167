pub mod due;
pub mod entry;
pub mod error;
pub mod executor;
pub mod io;
pub mod ledger;
pub mod nag;
pub mod paths;
pub mod prompt;
pub mod report;

pub use entry::EntrySpec;
pub use error::{NagError, Result};
