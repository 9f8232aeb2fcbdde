use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    AdvisoryView, DeleteResponse, DetectionResponse, ErrorResponse, HealthResponse, HistoryEntry,
};

pub async fn detect(file: &GlooFile) -> Result<DetectionResponse, String> {
    let form_data =
        web_sys::FormData::new().map_err(|_| "Failed to prepare the upload.".to_string())?;
    form_data
        .append_with_blob_and_filename("image", file.as_ref(), &file.name())
        .map_err(|_| "Failed to attach the image.".to_string())?;

    let response = Request::post("/api/detect")
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

pub async fn fetch_health() -> Result<HealthResponse, String> {
    get_json("/api/health").await
}

pub async fn fetch_education() -> Result<Vec<AdvisoryView>, String> {
    get_json("/api/education").await
}

pub async fn fetch_history() -> Result<Vec<HistoryEntry>, String> {
    get_json("/api/history").await
}

pub async fn delete_history(id: &str) -> Result<DeleteResponse, String> {
    let encoded: String = js_sys::encode_uri_component(id).into();
    let response = Request::delete(&format!("/api/history/{}", encoded))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        return response
            .json::<T>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e));
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::error!("{} {} failed: {}", status, response.url(), body);
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => Err(err.error),
        Err(_) => Err(format!("Server error: {} - {}", status, body)),
    }
}
