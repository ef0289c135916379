pub mod backend;
pub mod local;
pub mod store;
pub mod supabase;

pub use backend::Backend;
pub use local::LocalBackend;
pub use store::{AtomicWriter, ClientState, ClientStateStore};
pub use supabase::SupabaseClient;
