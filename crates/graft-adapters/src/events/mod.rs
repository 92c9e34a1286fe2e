//! Event sinks.

mod memory;

pub use memory::MemoryEvents;
