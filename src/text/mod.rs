pub mod splitter;
pub mod validator;

pub use splitter::*;
pub use validator::*;
