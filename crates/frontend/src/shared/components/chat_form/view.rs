//! Chat Form - View Component

use super::model::{fitted_height, ChatFormModel};
use crate::shared::components::field_error::FieldError;
use crate::shared::icons::icon;
use contracts::chat::{ChatConnectState, ChatFormValue, MAX_MESSAGE_LENGTH};
use leptos::prelude::*;
use thaw::*;

/// Grow or shrink the textarea to its content, up to the max height
fn fit_to_content(textarea: &web_sys::HtmlTextAreaElement) {
    // HtmlElement::style, not the leptos ElementExt::style of the same name
    let style = web_sys::HtmlElement::style(textarea);
    let _ = style.set_property("height", "auto");
    let height = fitted_height(textarea.scroll_height());
    let _ = style.set_property("height", &format!("{height}px"));
}

/// Message input of the chat page.
///
/// Enter submits, Shift+Enter inserts a newline. Submitting only emits while
/// `connection` is `Waiting`; while a completion is generating the send button
/// turns into a stop button.
#[component]
pub fn ChatForm(
    #[prop(into)] connection: Signal<Option<ChatConnectState>>,
    on_send: Callback<ChatFormValue>,
    on_stop_generation: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(ChatFormModel::new());
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    // Height is measured after the new value is rendered
    let resize_textarea = move || {
        request_animation_frame(move || {
            if let Some(textarea) = textarea_ref.get_untracked() {
                fit_to_content(&textarea);
            }
        });
    };

    let submit = move || {
        let value = form
            .try_update(|f| f.submit(connection.get_untracked()))
            .flatten();
        if let Some(value) = value {
            if let Some(textarea) = textarea_ref.get_untracked() {
                let _ = textarea.blur();
            }
            on_send.run(value);
            resize_textarea();
        }
    };

    let handle_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Enter" {
            return;
        }
        ev.prevent_default();
        if ev.shift_key() {
            form.update(|f| f.insert_newline());
            resize_textarea();
            return;
        }
        submit();
    };

    let can_submit = Signal::derive(move || form.with(|f| f.can_submit(connection.get())));
    let is_generating =
        Signal::derive(move || connection.get().is_some_and(|c| c.is_generating()));
    let error = Signal::derive(move || {
        form.with(|f| {
            f.message
                .should_show_errors()
                .then(|| f.message.errors().first().map(|e| e.message()))
                .flatten()
        })
    });

    view! {
        <div class="chat-form" style="display: flex; flex-direction: column; gap: 4px;">
            <Flex style="gap: 8px; align-items: flex-end;">
                <div style="flex: 1;">
                    <textarea
                        node_ref=textarea_ref
                        class="chat-form__textarea"
                        rows="1"
                        placeholder="Type a message... (Shift+Enter for a new line)"
                        style="width: 100%; min-height: 44px; resize: none; overflow-y: auto;"
                        prop:value=move || form.with(|f| f.message.value().to_string())
                        on:input=move |ev| {
                            form.update(|f| f.message.input(event_target_value(&ev)));
                            resize_textarea();
                        }
                        on:blur=move |_| form.update(|f| f.message.mark_as_touched())
                        on:keydown=handle_keydown
                    ></textarea>
                </div>

                {move || {
                    if is_generating.get() {
                        view! {
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| on_stop_generation.run(())
                            >
                                {move || {
                                    (connection.get() == Some(ChatConnectState::Loading))
                                        .then(|| view! { <Spinner size=SpinnerSize::Tiny /> })
                                }}
                                {icon("stop")}
                                " Stop"
                            </Button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=Signal::derive(move || !can_submit.get())
                                on_click=move |_| submit()
                            >
                                {icon("send")}
                                " Send"
                            </Button>
                        }
                            .into_any()
                    }
                }}
            </Flex>

            <Flex justify=FlexJustify::SpaceBetween>
                <FieldError error=error />
                <span style="font-size: 11px; color: var(--colorNeutralForeground3); margin-left: auto;">
                    {move || format!("{} / {}", form.with(|f| f.length()), MAX_MESSAGE_LENGTH)}
                </span>
            </Flex>
        </div>
    }
}
