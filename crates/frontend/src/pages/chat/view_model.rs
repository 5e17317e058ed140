//! Chat Page - View Model

use super::in_flight::InFlight;
use super::model::stream_completion;
use super::session::ChatSession;
use crate::shared::storage::StorageContext;
use contracts::chat::{ChatFormValue, ChatMessage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::AbortController;

const HISTORY_KEY: &str = "chat.history";

#[derive(Clone, Copy)]
pub struct ChatPageVm {
    pub session: RwSignal<ChatSession>,
    storage: StoredValue<StorageContext>,
    /// Abort handle of the running stream; a stream only touches the
    /// session while its generation is current
    in_flight: StoredValue<InFlight<AbortController>, LocalStorage>,
}

impl ChatPageVm {
    pub fn new(storage: StorageContext) -> Self {
        Self {
            session: RwSignal::new(ChatSession::new()),
            storage: StoredValue::new(storage),
            in_flight: StoredValue::new_local(InFlight::new()),
        }
    }

    /// Load the saved conversation; the session starts waiting for input
    pub fn restore(&self) {
        let history = self
            .storage
            .with_value(|s| s.get_json::<Vec<ChatMessage>>(HISTORY_KEY))
            .unwrap_or_default();
        log::debug!("Restored {} chat messages", history.len());
        self.session.update(|s| s.restore(history));
    }

    fn persist(&self) {
        let history = self.session.with_untracked(|s| s.history());
        self.storage.with_value(|s| s.set_json(HISTORY_KEY, &history));
    }

    fn is_current(&self, generation: u64) -> bool {
        self.in_flight
            .try_with_value(|f| f.is_current(generation))
            .unwrap_or(false)
    }

    pub fn send(&self, value: ChatFormValue) {
        let Some(request) = self.session.try_update(|s| s.begin(value)).flatten() else {
            return;
        };
        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(e) => {
                self.session
                    .update(|s| s.fail(format!("Cannot start request: {e:?}")));
                return;
            }
        };
        let signal = controller.signal();
        let Some((generation, replaced)) =
            self.in_flight.try_update_value(|f| f.start(controller))
        else {
            return;
        };
        if let Some(replaced) = replaced {
            replaced.abort();
        }
        let vm = *self;

        spawn_local(async move {
            let result = stream_completion(&request, &signal, |event| {
                if !vm.is_current(generation) {
                    return;
                }
                let terminal = event.is_terminal();
                vm.session.update(|s| s.apply(event));
                if terminal {
                    vm.persist();
                }
            })
            .await;

            if vm.in_flight.try_update_value(|f| f.finish(generation)) != Some(true) {
                return;
            }
            match result {
                Ok(()) => vm.session.update(|s| s.finish_stream()),
                Err(e) => {
                    log::error!("Chat stream failed: {}", e);
                    vm.session.update(|s| s.fail(e.message));
                }
            }
            vm.persist();
        });
    }

    /// Stop the in-flight generation, keeping what was received
    pub fn stop(&self) {
        if self.session.try_update(|s| s.stop()) != Some(true) {
            return;
        }
        self.abort_in_flight();
        self.persist();
    }

    /// Abort the pending request, if any, without touching the session.
    /// Its callbacks become no-ops.
    pub fn abort_in_flight(&self) {
        if let Some(controller) = self.in_flight.try_update_value(|f| f.cancel()).flatten() {
            controller.abort();
        }
    }

    pub fn dismiss_error(&self) {
        self.session.update(|s| s.dismiss_error());
    }

    pub fn clear(&self) {
        if self.session.try_update(|s| s.clear()) == Some(true) {
            self.storage.with_value(|s| s.remove(HISTORY_KEY));
        }
    }
}
