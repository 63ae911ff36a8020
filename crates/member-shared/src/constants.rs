//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 604800;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_MEDIA_TIMEOUT_SECONDS: u64 = 30;
/// Square crop centred on the detected face, 500x500.
pub const PHOTO_TRANSFORMATION: &str = "c_fill,g_face,h_500,w_500";
pub const MAX_PROFILE_TEXT_LENGTH: u64 = 2000;
pub const MAX_LOCATION_LENGTH: u64 = 100;
