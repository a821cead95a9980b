//! Request extractors.

mod payload;
