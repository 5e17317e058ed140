//! Upload Page - Model (API functions)

use crate::shared::api_utils::{api_url, read_json, RequestError};
use contracts::upload::UploadResponse;
use gloo_net::http::Request;
use web_sys::{File, FormData};

/// Send one file as the `file` field of a multipart body
pub async fn upload_file(file: &File) -> Result<UploadResponse, RequestError> {
    let form = FormData::new()
        .map_err(|e| RequestError::network(format!("Cannot build form data: {e:?}")))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| RequestError::network(format!("Cannot attach file: {e:?}")))?;

    let resp = Request::post(&api_url("/api/uploads"))
        .header("Accept", "application/json")
        .body(form)?
        .send()
        .await?;
    read_json(resp).await
}
