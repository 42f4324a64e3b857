//! Upload model -> stored file mapper

use social_core::entities::StoredFile;

use crate::models::UploadModel;

impl From<UploadModel> for StoredFile {
    fn from(model: UploadModel) -> Self {
        StoredFile {
            filename: model.filename,
            content_type: model.content_type,
            data: model.data,
            uploaded_at: model.uploaded_at,
        }
    }
}
