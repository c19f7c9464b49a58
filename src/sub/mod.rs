//! Regex-group-driven substitution.
//!
//! A pattern's capture groups are labelled with decimal indices into a
//! [`SubstitutionList`]. The first match is located, and each group's span is
//! replaced by the value its label points at; everything else is copied
//! through untouched.

pub mod engine;
pub mod errors;
pub mod pattern;

pub use engine::{plan, substitute, GroupSubstitution, Span, SubstitutionList};
pub use errors::SubstituteError;
pub use pattern::Pattern;
