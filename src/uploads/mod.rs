mod storage;

pub use storage::{
    MAX_UPLOAD_BYTES, StoredUpload, UPLOAD_URL_PREFIX, UploadError, UploadStorage,
    content_type_for, sanitize_file_name,
};
