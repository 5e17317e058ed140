//! File Input - View Component

use super::model::{FileInputModel, FileInputValue, SelectedFileMeta};
use crate::shared::components::field_error::FieldError;
use crate::shared::forms::ValidationErrors;
use crate::shared::icons::icon;
use contracts::upload::FileConstraints;
use leptos::prelude::*;
use thaw::*;

fn revoke(url: Option<String>) {
    if let Some(url) = url {
        let _ = web_sys::Url::revoke_object_url(&url);
    }
}

/// File picker usable as a control of a larger form.
///
/// - `value`: URL written in by the parent; the displayed name is derived from it
/// - `touched`: touched state of the enclosing control, mirrored on the field
/// - `on_change`: selected file (`None` when the selection was rejected)
/// - `on_validation`: `custom` error of the last selection, `None` when valid
#[component]
pub fn FileInput(
    #[prop(optional, into)] accepted_types: MaybeProp<String>,
    /// Maximum size in megabytes
    #[prop(optional, into)]
    max_file_size: MaybeProp<f64>,
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(optional, into)] value: MaybeProp<String>,
    #[prop(optional, into)] touched: MaybeProp<bool>,
    on_change: Callback<Option<FileInputValue>>,
    #[prop(optional)] on_touched: Option<Callback<()>>,
    #[prop(optional)] on_validation: Option<Callback<Option<ValidationErrors>>>,
) -> impl IntoView {
    let constraints = move || FileConstraints {
        accepted_types: accepted_types.get(),
        max_file_size: max_file_size.get(),
    };
    let model = RwSignal::new(FileInputModel::new(untrack(constraints)));
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let report_validation = move || {
        if let Some(on_validation) = on_validation {
            on_validation.run(model.with_untracked(|m| m.validate()));
        }
    };

    Effect::new(move |_| {
        let constraints = constraints();
        model.update(|m| m.constraints = constraints);
    });

    // writeValue: the parent pushed a stored URL
    Effect::new(move |_| {
        let url = value.get();
        revoke(model.try_update(|m| m.write_value(url.as_deref())).flatten());
        if let Some(input) = file_input_ref.get_untracked() {
            input.set_value("");
        }
        report_validation();
    });

    Effect::new(move |_| {
        if let Some(touched) = touched.get() {
            model.update(|m| m.sync_touched(touched));
        }
    });

    on_cleanup(move || {
        revoke(model.try_update_untracked(|m| m.replace_object_url(None)).flatten());
    });

    let mark_touched = move || {
        model.update(|m| m.select_file_name.mark_as_touched());
        if let Some(on_touched) = on_touched {
            on_touched.run(());
        }
    };

    let open_picker = move || {
        if let Some(input) = file_input_ref.get_untracked() {
            input.click();
        }
        mark_touched();
    };

    let handle_change = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let meta = SelectedFileMeta {
            name: file.name(),
            mime_type: file.type_(),
            size: file.size() as u64,
        };

        match model.try_update(|m| m.select(&meta)) {
            Some(Ok(())) => match web_sys::Url::create_object_url_with_blob(&file) {
                Ok(path) => {
                    revoke(model.try_update(|m| m.replace_object_url(Some(path.clone()))).flatten());
                    on_change.run(Some(FileInputValue {
                        path,
                        file_name: meta.name,
                        file: Some(file),
                    }));
                }
                Err(e) => {
                    log::error!("Failed to create object URL for {}: {:?}", meta.name, e);
                    on_change.run(None);
                }
            },
            Some(Err(error)) => {
                log::warn!("Rejected file {}: {}", error.file_name, error.message);
                revoke(model.try_update(|m| m.replace_object_url(None)).flatten());
                on_change.run(None);
            }
            None => {}
        }
        report_validation();
    };

    let file_name = move || model.with(|m| m.file_name().to_string());
    let error = Signal::derive(move || model.with(|m| m.error_message()));

    view! {
        <div class="form__group file-input">
            {move || label.get().map(|text| view! { <label class="form__label">{text}</label> })}

            <input
                node_ref=file_input_ref
                type="file"
                style="display: none;"
                accept=move || accepted_types.get().unwrap_or_default()
                on:change=handle_change
            />

            <Flex style="gap: 8px; align-items: center;">
                <input
                    type="text"
                    readonly=true
                    class="file-input__name"
                    style="flex: 1; cursor: pointer;"
                    placeholder="No file selected"
                    prop:value=file_name
                    on:click=move |_| open_picker()
                    on:blur=move |_| mark_touched()
                />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| open_picker()>
                    {icon("attach")}
                    " Browse"
                </Button>
            </Flex>

            <FieldError error=error />
        </div>
    }
}
