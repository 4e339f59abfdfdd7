#[macro_use]
mod enums;

pub mod cache;
pub mod cluster;
pub mod events;
pub mod java;
pub mod metadata;
pub mod validation;

pub use cache::*;
pub use cluster::*;
pub use enums::*;
pub use events::*;
pub use java::*;
pub use metadata::*;
pub use validation::*;
