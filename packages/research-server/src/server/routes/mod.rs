// HTTP routes
pub mod health;
pub mod tools;

pub use health::*;
pub use tools::*;
