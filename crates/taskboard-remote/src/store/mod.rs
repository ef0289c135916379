pub mod atomic_writer;
pub mod client_state_store;

pub use atomic_writer::AtomicWriter;
pub use client_state_store::{ClientState, ClientStateStore};
