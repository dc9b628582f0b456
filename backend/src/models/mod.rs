pub mod macros;

pub mod asset;
pub mod catalog;
pub mod scope;
pub mod time;

pub use asset::*;
pub use catalog::*;
pub use scope::*;
pub use time::*;
