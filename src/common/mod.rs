pub mod append;
pub mod ec;
pub mod eci;
pub mod error;
pub mod escape;
pub mod gs1;
pub mod hibc;
pub mod metadata;
pub mod version;

pub use append::{AppendSegment, AppendTemplate};
pub use ec::*;
pub use eci::{Charset, Eci};
pub use error::*;
pub use escape::{EscapeMode, Unit};
pub use metadata::*;
pub use version::{Selection, VersionSelector};
