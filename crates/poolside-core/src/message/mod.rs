//! Message registry and response envelope.
//!
//! Every API outcome is named by a [`MessageCategory`]. The registry assigns
//! each category exactly one HTTP status code and display text, so the same
//! event always produces the same status and wording wherever it is raised.

pub mod category;
pub mod envelope;
pub mod outcome;
pub mod registry;

pub use category::MessageCategory;
pub use envelope::Envelope;
pub use outcome::Categorized;
pub use registry::{RegistryError, Resolved, resolve, resolve_key, validate};
