mod env;
mod proxy;

pub use env::*;
pub use proxy::*;
