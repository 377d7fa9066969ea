//! Core types and pure functions for the orgtable single-table layout.
//!
//! - [`organization`]: the nested input graph and the read-side report envelope
//! - [`storage`]: key encoding, flattening, attribute values, normalization and
//!   the [`storage::ItemStore`] boundary implemented by the backends

pub mod organization;
pub mod storage;
