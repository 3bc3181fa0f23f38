pub mod scanner;
pub mod tagger;

pub use scanner::*;
pub use tagger::*;
