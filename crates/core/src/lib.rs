//! Domain types and rules for the face pair annotation service.
//!
//! This crate is HTTP-free: it holds the pair table loader, the per-session
//! answer state machine, image resolution, input validation, and the
//! finished annotation record. The `facepair-api` crate wires these into
//! handlers; `facepair-sheets` ships records to the spreadsheet.

pub mod error;
pub mod pairs;
pub mod record;
pub mod resolver;
pub mod session;
pub mod validation;

pub use error::CoreError;
pub use pairs::{load_pairs, Decision, Pair};
pub use record::AnnotationRecord;
pub use resolver::{ImageResolver, ImageSource};
pub use session::{AnnotationSession, Stage};
