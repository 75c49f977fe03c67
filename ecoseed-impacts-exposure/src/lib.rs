pub mod config;
pub mod errors;
pub mod mock;
pub mod policy;
pub mod preview;
pub mod store;
pub mod token;
pub mod types;

pub use config::*;
pub use errors::*;
pub use policy::*;
pub use preview::*;
pub use store::*;
pub use token::*;
pub use types::*;
