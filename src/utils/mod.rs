//! Shared helpers: classification, lossy reading, paths, number formatting.

pub mod classify;
pub mod encoding;
pub mod paths;

pub use classify::{
    detect_language, extension_of, file_icon, is_code, should_ignore, IgnoreRule, IgnoreRules,
};
pub use encoding::{read_preview, read_text_lossy, truncate_chars};
pub use paths::{join_relative, normalize_path};

/// Format an integer with `,` thousands separators.
pub fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
