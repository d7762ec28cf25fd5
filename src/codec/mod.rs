mod html_format;
mod json_format;
mod url_parts;

pub use html_format::*;
pub use json_format::*;
pub use url_parts::*;
