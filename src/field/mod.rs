mod body;
mod field;
mod is_blank;

pub use body::*;
pub use field::*;
pub use is_blank::*;
