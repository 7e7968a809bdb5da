pub mod error;

pub use error::{ErrorKind, IngestError, Result};
