// Service exports
pub mod profile_store;

pub use profile_store::{ProfileStoreClient, ProfileStoreError, decode_profiles};
