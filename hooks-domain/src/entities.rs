// Domain entities
pub mod event;
pub mod inventory;
pub mod model;

pub use event::*;
pub use inventory::*;
pub use model::*;
