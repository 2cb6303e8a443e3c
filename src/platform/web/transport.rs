//! `fetch`-based form transport
//!
//! Requests go out in `no-cors` mode, so the response is opaque. Only a rejected
//! `fetch` promise counts as a failure.

use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, RequestInit, RequestMode};

use crate::fx::{SubmitError, Transport};

#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

fn js_err(err: wasm_bindgen::JsValue) -> SubmitError {
    SubmitError::Transport(format!("{:?}", err))
}

impl Transport for FetchTransport {
    async fn post(&self, endpoint: &str, fields: &[(String, String)]) -> Result<(), SubmitError> {
        let window =
            web_sys::window().ok_or_else(|| SubmitError::Transport("no window".to_string()))?;

        let body = FormData::new().map_err(js_err)?;
        for (name, value) in fields {
            body.append_with_str(name, value).map_err(js_err)?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::NoCors);
        init.set_body(&body.into());

        JsFuture::from(window.fetch_with_str_and_init(endpoint, &init))
            .await
            .map_err(js_err)?;
        Ok(())
    }
}
