//! Upload Page - View Model

use super::model::upload_file;
use crate::shared::api_utils::{api_base, RequestError};
use crate::shared::components::file_input::FileInputValue;
use crate::shared::forms::ValidationErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct UploadPageVm {
    /// Current selection; holds a `web_sys::File`, so it stays on this thread
    pub selected: RwSignal<Option<FileInputValue>, LocalStorage>,
    /// URL written back into the file input after a successful upload
    pub stored_url: RwSignal<Option<String>>,
    pub validation: RwSignal<Option<ValidationErrors>>,
    pub touched: RwSignal<bool>,
    pub uploading: RwSignal<bool>,
    pub error: RwSignal<Option<RequestError>>,
}

impl UploadPageVm {
    pub fn new() -> Self {
        Self {
            selected: RwSignal::new_local(None),
            stored_url: RwSignal::new(None),
            validation: RwSignal::new(None),
            touched: RwSignal::new(false),
            uploading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn select(&self, value: Option<FileInputValue>) {
        self.error.set(None);
        self.selected.set(value);
    }

    /// Image shown in the preview: the fresh selection, else the stored file
    pub fn preview_url(&self) -> Option<String> {
        self.selected
            .with(|s| s.as_ref().map(|v| v.path.clone()))
            .or_else(|| self.stored_url.get())
    }

    pub fn can_upload(&self) -> bool {
        !self.uploading.get()
            && self.validation.with(|v| v.as_ref().map_or(true, |e| e.is_empty()))
            && self.selected.with(|s| s.as_ref().is_some_and(|v| v.file.is_some()))
    }

    pub fn upload(&self) {
        self.touched.set(true);
        if !self.can_upload() {
            return;
        }
        let Some(file) = self.selected.with_untracked(|s| s.as_ref().and_then(|v| v.file.clone()))
        else {
            return;
        };
        self.uploading.set(true);
        self.error.set(None);
        let vm = *self;

        spawn_local(async move {
            match upload_file(&file).await {
                Ok(resp) => {
                    log::info!("Uploaded {} ({} bytes) to {}", resp.file_name, resp.size, resp.url);
                    vm.selected.set(None);
                    vm.stored_url.set(Some(format!("{}{}", api_base(), resp.url)));
                }
                Err(e) => {
                    log::error!("Upload of {} failed: {}", file.name(), e);
                    vm.error.set(Some(e));
                }
            }
            vm.uploading.set(false);
        });
    }
}

impl Default for UploadPageVm {
    fn default() -> Self {
        Self::new()
    }
}
