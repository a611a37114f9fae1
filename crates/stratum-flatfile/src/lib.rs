//! Flat-file storage backends: one YAML or JSON document per player.
//!
//! Records live under `<data_dir>/players/<uuid>.<ext>`. Simple and
//! greppable; suited to small installations where a database is overkill.

mod error;
mod store;

pub use error::{FlatFileError, FlatFileResult};
pub use store::{FileFormat, FlatFileProgressStore};
