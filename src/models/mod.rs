pub mod tag;
pub mod tree;

pub use tag::*;
pub use tree::*;
