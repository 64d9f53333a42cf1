pub mod preview;

pub use preview::{decode_png, encode_png, render_preview};
