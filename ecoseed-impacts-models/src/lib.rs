pub mod canon;
pub mod codes;
pub mod errors;
pub mod order;
pub mod reference;
pub mod rules;
pub mod vector;

pub use canon::*;
pub use codes::*;
pub use errors::*;
pub use order::*;
pub use reference::*;
pub use rules::*;
pub use vector::*;
