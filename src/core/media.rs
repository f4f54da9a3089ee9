use crate::core::transport::{ServiceClient, Transport};
use crate::domain::model::RemoteCallResult;
use crate::domain::peers::{MediaFile, UploadedMedia};
use crate::domain::ports::MediaService;
use crate::utils::error::{InterlinkError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

const SERVICE: &str = "media";
const FORM_FIELD: &str = "media";

#[derive(Debug, Clone)]
pub struct MediaClient {
    inner: ServiceClient,
}

impl MediaClient {
    pub fn new(base_url: &str, transport: &Transport) -> Result<Self> {
        Ok(Self {
            inner: ServiceClient::new(SERVICE, base_url, transport)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url().as_str()
    }
}

fn build_form(files: Vec<MediaFile>) -> Result<Form> {
    let mut form = Form::new();
    for file in files {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type {
            part = part.mime_str(&content_type).map_err(|e| {
                InterlinkError::request_build(
                    SERVICE,
                    format!("invalid content type '{}': {}", content_type, e),
                )
            })?;
        }
        form = form.part(FORM_FIELD, part);
    }
    Ok(form)
}

#[async_trait]
impl MediaService for MediaClient {
    async fn upload_images(
        &self,
        token: &str,
        files: Vec<MediaFile>,
    ) -> Result<RemoteCallResult<UploadedMedia>> {
        if files.is_empty() {
            return Err(InterlinkError::request_build(
                SERVICE,
                "at least one file is required",
            ));
        }
        let form = build_form(files)?;

        self.inner
            .request(Method::POST, "/v1/media/uploads", None)?
            .bearer(token)?
            .multipart(form)
            .send()
            .await
    }
}
