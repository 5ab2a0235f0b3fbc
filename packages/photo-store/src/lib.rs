pub mod cdn;
pub mod client;
pub mod errors;
pub mod sign;
pub mod upload;

// 公開API
pub use cdn::cdn_url;
pub use client::{Credentials, Headers, S3Client};
pub use errors::{StoreError, UploadError};
pub use upload::{
    CdnStore, Finalizer, UploadCoordinator, UploadJob, UploadedVariant,
};
