//! Batched per-directory and per-file descriptions

pub mod decode;
pub mod pipeline;

pub use decode::{decode_payload, extract_json_block, BatchPayload};
pub use pipeline::{BatchFailure, DescriptionPipeline};
