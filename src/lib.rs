//! Purpose: Decode JSON-stat v2 datasets into validated, dimension-ordered values.
//! Exports: `api` (decode entry points, dataset types, errors).
//! Role: Library backing the `jsonstat` CLI; `api` is the stable surface.
//! Invariants: Decoding is single-threaded per call and shares no state across calls.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
mod json;
