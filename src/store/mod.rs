//! In-memory roster store split across logical submodules.

mod draft;
mod error;
mod records;

pub use draft::{Draft, Panel, Roster};
pub use error::StoreError;
pub use records::RecordStore;
