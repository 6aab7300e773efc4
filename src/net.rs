use crate::core::api::{self, ApiError, CSRF_HEADER};
use crate::dom;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

/// Issue a same-origin request with the CSRF header and return the body
/// text together with the HTTP status.
async fn fetch_text(method: &str, url: &str, body: Option<String>) -> Result<(u16, String), ApiError> {
    let window = web::window().ok_or_else(|| ApiError::Network("no window".into()))?;
    let init = web::RequestInit::new();
    init.set_method(method);
    init.set_credentials(web::RequestCredentials::SameOrigin);
    if let Some(json) = &body {
        init.set_body(&JsValue::from_str(json));
    }
    let request = web::Request::new_with_str_and_init(url, &init).map_err(js_err)?;
    let headers = request.headers();
    let token = window
        .document()
        .and_then(|d| api::csrf_token_from_cookie(&dom::cookie(&d)));
    if let Some(token) = token {
        headers.set(CSRF_HEADER, &token).map_err(js_err)?;
    }
    if body.is_some() {
        headers
            .set("Content-Type", "application/json")
            .map_err(js_err)?;
    }

    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .unwrap_or_default();
    Ok((response.status(), text))
}

fn unwrap_envelope<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    match api::decode::<T>(text) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !(200..300).contains(&status) => Err(ApiError::Status(status)),
        Err(e) => Err(e),
    }
}

fn logged<T>(url: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        log::warn!("[api] {} failed: {}", url, e);
    }
    result
}

/// GET an endpoint that answers with the `{success, ...}` envelope.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let result = match fetch_text("GET", url, None).await {
        Ok((status, text)) => unwrap_envelope(status, &text),
        Err(e) => Err(e),
    };
    logged(url, result)
}

/// GET an endpoint whose body is the payload itself.
pub async fn get_plain<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let result = match fetch_text("GET", url, None).await {
        Ok((status, _)) if !(200..300).contains(&status) => Err(ApiError::Status(status)),
        Ok((_, text)) => serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string())),
        Err(e) => Err(e),
    };
    logged(url, result)
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, ApiError> {
    let result = match serde_json::to_string(body) {
        Ok(json) => match fetch_text("POST", url, Some(json)).await {
            Ok((status, text)) => unwrap_envelope(status, &text),
            Err(e) => Err(e),
        },
        Err(e) => Err(ApiError::Decode(e.to_string())),
    };
    logged(url, result)
}
