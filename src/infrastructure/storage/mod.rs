//! Avatar Storage
//!
//! Local filesystem store for directly-uploaded avatars, and the signer
//! that issues credentials for client-side uploads to the cloud bucket.

mod credentials;
mod local_store;

pub use credentials::{ObjectStorageSigner, UploadCredential};
pub use local_store::LocalAvatarStore;
