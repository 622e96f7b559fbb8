//! Request extractors that reject with the API error envelope.

pub mod path_id;

pub use path_id::PathId;
