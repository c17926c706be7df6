pub mod text;

pub use text::{clip_chars, strip_html};
