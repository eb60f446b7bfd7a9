pub mod dataset;
pub mod float;
pub mod intent;
pub mod message;

pub use dataset::*;
pub use float::*;
pub use intent::*;
pub use message::*;
