pub mod cell;
pub mod pos;
pub mod snapshot;

pub use cell::*;
pub use pos::*;
pub use snapshot::*;
