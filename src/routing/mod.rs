//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Redirect document (YAML/JSON)
//!     → records.rs (decode into ordered RedirectRecord sequence)
//!     → mapping.rs (fold into PathMapping, last write wins)
//!     → router.rs (RedirectService around a fallback service)
//!
//! Incoming Request (path)
//!     → router.rs (exact lookup)
//!     → 302 Found, or the fallback's response
//! ```
//!
//! # Design Decisions
//! - Mappings compiled at startup, immutable at runtime
//! - Exact string match only, no prefixes or patterns
//! - Deterministic: same path always resolves the same way
//! - Decoding is the only fallible step

pub mod mapping;
pub mod records;
pub mod router;

pub use mapping::{build_mapping, PathMapping};
pub use records::{decode_json, decode_records, decode_yaml, DecodeError, RecordFormat, RedirectRecord};
pub use router::{build_handler, json_handler, yaml_handler, RedirectLayer, RedirectService};
