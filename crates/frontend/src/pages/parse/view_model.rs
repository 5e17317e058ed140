//! Parse Page - View Model

use super::model::parse_url;
use crate::shared::api_utils::RequestError;
use crate::shared::storage::StorageContext;
use contracts::parse::{ParseFormData, ParseResult};
use leptos::prelude::*;
use leptos::task::spawn_local;

const LAST_URL_KEY: &str = "parse.last_url";

#[derive(Clone, Copy)]
pub struct ParsePageVm {
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<RequestError>>,
    pub result: RwSignal<Option<ParseResult>>,
    storage: StoredValue<StorageContext>,
}

impl ParsePageVm {
    pub fn new(storage: StorageContext) -> Self {
        Self {
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            result: RwSignal::new(None),
            storage: StoredValue::new(storage),
        }
    }

    /// URL submitted last time, used to pre-fill the form
    pub fn last_url(&self) -> Option<String> {
        self.storage.with_value(|s| s.get(LAST_URL_KEY))
    }

    pub fn send(&self, data: ParseFormData) {
        if self.loading.get_untracked() {
            return;
        }
        self.storage.with_value(|s| s.set(LAST_URL_KEY, &data.url));
        self.loading.set(true);
        self.error.set(None);
        let vm = *self;

        spawn_local(async move {
            match parse_url(&data).await {
                Ok(result) => {
                    vm.result.set(Some(result));
                }
                Err(e) => {
                    log::warn!("Parse request for {} failed: {}", data.url, e);
                    vm.result.set(None);
                    vm.error.set(Some(e));
                }
            }
            vm.loading.set(false);
        });
    }
}
