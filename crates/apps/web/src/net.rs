//! Executes the API crate's request values with the browser's fetch.

use api::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use gloo_net::http::Request;

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// One round-trip. Non-2xx statuses come back as data; only a failure to
/// reach the backend at all becomes `ApiError::Transport`.
pub async fn execute(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let mut builder = match request.method {
        HttpMethod::Get => Request::get(&request.url),
        HttpMethod::Post => Request::post(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let ready = match request.body {
        Some(body) => builder.body(body).map_err(transport)?,
        None => builder.build().map_err(transport)?,
    };

    let response = ready.send().await.map_err(transport)?;
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    Ok(HttpResponse { status, body })
}
