pub mod collection;
pub mod collections;
pub mod memory;
pub mod store;
pub mod supabase;

pub use collection::Collection;
pub use memory::InMemoryStore;
pub use store::*;
pub use supabase::SupabaseClient;
