pub mod aggregation;
pub mod correction;
pub mod engine;
pub mod errors;
pub mod facade;
pub mod merge;
pub mod provision;

pub use aggregation::*;
pub use correction::*;
pub use engine::*;
pub use errors::*;
pub use facade::*;
pub use merge::*;
pub use provision::*;
