//! Assessment event system

mod bus;
mod memory;
mod types;

pub use bus::{EventBus, EventSeq};
pub use memory::MemoryEventBus;
pub use types::AssessmentEvent;
