//! Single-shot, whole-project generators
//!
//! Both generators only read the project model and always return text: model
//! failures turn into deterministic fallbacks.

pub mod natural;
pub mod prompt;

pub use natural::{fallback_description, generate_natural_description};
pub use prompt::{build_summary_prompt, generate_summary};
