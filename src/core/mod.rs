//! Core domain: identifier validation, competencies, mock records and the
//! inquiry pipeline.
//!
//! Nothing in this module performs network I/O. The only filesystem access
//! is [`JsonFile`], the default backing of [`MockStore`].

mod clock;
mod competency;
mod error;
mod identifier;
mod inquiry;
mod record;
mod store;
pub mod template;

pub use clock::*;
pub use competency::*;
pub use error::*;
pub use identifier::*;
pub use inquiry::*;
pub use record::*;
pub use store::*;
pub use template::materialize;
