//! Core data model for grouped bibliography processing.
//!
//! This crate holds everything the pipeline shares: the CSL-JSON record
//! model, the supported group fields with their key-derivation rules, and
//! citation style resolution (built-in names, classification of uploaded
//! CSL XML, and the custom-style registry).

pub mod grouping;
pub mod reference;
pub mod style;

pub use grouping::{key_for, FieldValue, GroupField, UnknownGroupField, GROUP_FIELD_NAMES};
pub use reference::{DateVariable, Reference, StringOrNumber};
pub use style::{
    classify, BuiltinStyle, StyleClass, StyleId, StyleRegistry, UnsupportedStyleError,
    BUILTIN_STYLE_NAMES,
};
