//! Common utilities shared across the outcomemap codebase.
//!
//! Currently only cell text cleanup: trimming, whitespace collapsing, label
//! stripping and integer extraction used by the format builders and parsers.

pub mod text;

pub use text::{collapse_whitespace, first_integer, integers, is_integer, non_blank, strip_ilo_prefix};
