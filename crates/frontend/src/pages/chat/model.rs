//! Chat Page - Model (API functions)

use crate::shared::api_utils::{api_url, RequestError};
use contracts::chat::stream::{parse_event, ChatStreamEvent, SseDecoder};
use contracts::chat::ChatCompletionRequest;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, ReadableStreamDefaultReader, Request, RequestInit, RequestMode, Response};

fn js_error(e: JsValue) -> RequestError {
    RequestError::network(format!("{e:?}"))
}

/// Stream a completion, calling `on_event` for every event as it arrives.
///
/// Resolves when the response body ends. Aborting `signal` makes the pending
/// read fail, which surfaces here as an `Err`.
pub async fn stream_completion(
    request: &ChatCompletionRequest,
    signal: &AbortSignal,
    mut on_event: impl FnMut(ChatStreamEvent),
) -> Result<(), RequestError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_signal(Some(signal));

    let body = serde_json::to_string(request).map_err(|e| RequestError::network(format!("{e}")))?;
    opts.set_body(&JsValue::from_str(&body));

    let url = api_url("/api/chat/stream");
    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;
    request
        .headers()
        .set("Accept", "text/event-stream")
        .map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| RequestError::network("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        let text = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|t| t.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        return Err(RequestError::from_status(resp.status(), &text));
    }

    let body = resp
        .body()
        .ok_or_else(|| RequestError::network("Response has no body"))?;
    let reader: ReadableStreamDefaultReader = body
        .get_reader()
        .dyn_into()
        .map_err(|e| js_error(e.into()))?;
    let mut decoder = SseDecoder::new();

    loop {
        let chunk = JsFuture::from(reader.read()).await.map_err(js_error)?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(js_error)?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value")).map_err(js_error)?;
        let bytes = js_sys::Uint8Array::new(&value).to_vec();
        forward_events(decoder.push_bytes(&bytes), &mut on_event)?;
    }

    forward_events(decoder.finish(), &mut on_event)
}

/// Decode payloads in order; a malformed one stops the stream
fn forward_events(
    payloads: impl IntoIterator<Item = String>,
    on_event: &mut impl FnMut(ChatStreamEvent),
) -> Result<(), RequestError> {
    for payload in payloads {
        on_event(parse_event(&payload).map_err(RequestError::network)?);
    }
    Ok(())
}
