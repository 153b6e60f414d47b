pub mod persist;
pub mod resolve;
pub mod verify;

pub use persist::Persist;
pub use resolve::Resolve;
pub use verify::verify;
