//! Material catalog.
//!
//! The catalog is a closed set: a [`Material`] value is always valid, so lookups are total.
//! Unknown identifiers are rejected when parsing (`FromStr` / serde), never inside the core.

pub(crate) mod material;
