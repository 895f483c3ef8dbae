//! # Bundle Image Commands
//!
//! Uploading the cover image of the bundle being edited.
//!
//! The key of the image being replaced goes along with the upload so the
//! server can delete the old file.

use beat_api::AdminBackend;
use beat_core::validation::validate_image_upload;
use beat_core::{ImageUpload, ValidationError};
use tracing::{info, warn};

use super::CommandOutcome;
use crate::console::AdminConsole;
use crate::state::{Control, Prompter};

pub const INVALID_IMAGE_MESSAGE: &str = "Please select a valid image file";
pub const IMAGE_TOO_LARGE_MESSAGE: &str = "File is too large. Maximum 5MB allowed.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading the image";
const UPLOAD_DONE_MESSAGE: &str = "Image uploaded successfully";

pub async fn upload_bundle_image<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
    upload: ImageUpload,
) -> CommandOutcome {
    info!(file = %upload.file_name, size = upload.size(), "upload_bundle_image command");

    let Some(_guard) = console.loading.begin(Control::ImageUpload) else {
        return CommandOutcome::Busy;
    };

    if let Err(e) = validate_image_upload(&upload) {
        let message = match e {
            ValidationError::TooLarge { .. } => IMAGE_TOO_LARGE_MESSAGE,
            _ => INVALID_IMAGE_MESSAGE,
        };
        console.notifications.error(message);
        return CommandOutcome::Invalid;
    }

    let previous_key = console.bundle_image.as_ref().map(|i| i.image_key.clone());

    match console
        .backend
        .upload_bundle_image(&upload, previous_key.as_deref())
        .await
    {
        Ok(image) => {
            info!(image_key = %image.image_key, replaced = ?previous_key, "Bundle image stored");
            console.bundle_image = Some(image);
            console.notifications.success(UPLOAD_DONE_MESSAGE);
            CommandOutcome::Completed
        }
        Err(e) => {
            warn!(error = %e, "Bundle image upload failed");
            console.notifications.error(UPLOAD_FAILED_MESSAGE);
            CommandOutcome::Failed
        }
    }
}
