//! Error types and result definitions for the nframe dataframe toolkit.
//!
//! This crate provides the unified error type ([`Error`]) and result type alias
//! ([`Result<T>`]) used throughout all nframe crates. Every operation that can
//! fail returns `Result<T>`, where the error variant describes what went wrong.
//!
//! # Error Philosophy
//!
//! nframe uses a single error enum rather than crate-specific error types.
//! This approach:
//! - Simplifies error handling across crate boundaries
//! - Allows errors to propagate naturally with the `?` operator
//! - Enables structured error matching for programmatic handling
//!
//! # Error Categories
//!
//! - **Structural violations** ([`Error::Structure`]): row-length mismatches,
//!   ambiguous insert paths, duplicate sibling column names
//! - **Schema lookup failures** ([`Error::Schema`]): selectors, paths or join
//!   conditions that reference columns which do not exist
//! - **Empty selections** ([`Error::EmptyResult`]): `first`/`last`/`single`
//!   over zero matching rows
//! - **User input errors** ([`Error::InvalidArgument`]): bad parameters, such
//!   as `single` over more than one row or an empty grouping key
//! - **Typed reads gone wrong** ([`Error::TypeMismatch`]): a value read back
//!   with an incompatible expected type
//!
//! All failures are synchronous and fail-fast. Tables are immutable, so a
//! failed operation leaves its inputs completely unaffected.

#![forbid(unsafe_code)]

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
