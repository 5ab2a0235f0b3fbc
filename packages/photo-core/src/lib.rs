pub mod address;
pub mod constants;
pub mod errors;
pub mod transcode;
pub mod validation;

// 公開API
pub use address::{ContentHash, content_hash};
pub use constants::{DEFAULT_QUALITY, MAX_FILE_NAME_LEN, MAX_PIXELS};
pub use errors::{MediaError, TranscodeError};
pub use transcode::{
    ImageInfo, OutputFormat, TranscodeResult, TranscodeSpec, decode_image, encode_image, get_info,
    transcode,
};
pub use validation::sanitize_file_name;
