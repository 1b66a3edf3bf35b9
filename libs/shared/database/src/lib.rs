pub mod store;
pub mod memory;
pub mod supabase;

pub use store::{
    to_document, Document, DocumentStore, Filter, SharedStore, StoreError, StoredDocument,
};
pub use memory::MemoryStore;
pub use supabase::SupabaseClient;
