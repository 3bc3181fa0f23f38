pub mod backend;
pub mod command;
pub mod http;

pub use backend::*;
pub use command::*;
pub use http::*;
