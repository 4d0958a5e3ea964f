// Domain value objects
pub mod event_names;
pub mod identifiers;

pub use event_names::*;
pub use identifiers::*;
