use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use chrono::Local;
use futures::TryStreamExt;
use log::{error, info, warn};
use shared::{
    AdvisoryView, ClassLabel, DeleteResponse, DetectionResponse, HealthResponse, HistoryEntry,
    LabelInfo,
};

use crate::config::AppConfig;
use crate::context::{ASSETS_URL, AppContext, HISTORY_IMAGES_URL};
use crate::error::ApiError;
use crate::history::{HistoryError, HistoryRecord};
use crate::inference::preprocess::decode_image;

pub const IMAGE_FIELD: &str = "image";

pub fn configure_routes(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    configure_api(cfg);
    configure_static(cfg, config);
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health)))
        .service(web::resource("/api/labels").route(web::get().to(labels)))
        .service(web::resource("/api/detect").route(web::post().to(detect)))
        .service(web::resource("/api/education").route(web::get().to(education_list)))
        .service(web::resource("/api/education/{label}").route(web::get().to(education_one)))
        .service(web::resource("/api/history").route(web::get().to(history_list)))
        .service(web::resource("/api/history/{id}").route(web::delete().to(history_delete)));
}

/// History artifacts, reference images and the compiled frontend. The
/// frontend mount is catch-all and must stay last.
pub fn configure_static(cfg: &mut web::ServiceConfig, config: &AppConfig) {
    cfg.service(Files::new(HISTORY_IMAGES_URL, &config.history_dir))
        .service(Files::new(ASSETS_URL, &config.assets_dir))
        .service(Files::new("/", &config.frontend_dir).index_file("index.html"));
}

async fn health(ctx: web::Data<AppContext>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        model_loaded: ctx.model().is_ok(),
        model_error: ctx.model_error().map(str::to_string),
        history_dir: ctx.history.dir().display().to_string(),
        labels: ClassLabel::ALL.len(),
    })
}

async fn labels() -> HttpResponse {
    let labels: Vec<LabelInfo> = ClassLabel::ALL.into_iter().map(LabelInfo::from).collect();
    HttpResponse::Ok().json(labels)
}

async fn detect(
    ctx: web::Data<AppContext>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let model = ctx.model()?.clone();
    let image_data = read_image_field(payload, ctx.max_upload_bytes).await?;
    info!("Received upload of {} bytes", image_data.len());

    let worker_ctx = ctx.clone();
    let (classification, recorded) = web::block(move || -> Result<_, ApiError> {
        let image = decode_image(&image_data)?;
        let classification = model.classify_image(&image)?;
        let recorded = worker_ctx.history.record(
            &image,
            classification.label,
            Local::now().naive_local(),
        );
        Ok((classification, recorded))
    })
    .await??;

    let (record_id, record_error) = match recorded {
        Ok(id) => {
            info!("Saved detection to history as {:?}", id);
            (Some(id), None)
        }
        Err(e) => {
            error!("Detection succeeded but could not be saved to history: {}", e);
            (None, Some(e.to_string()))
        }
    };

    info!(
        "Detected {:?} with confidence {:.4}",
        classification.label.as_str(),
        classification.confidence
    );

    Ok(HttpResponse::Ok().json(DetectionResponse {
        label: classification.label,
        confidence: classification.confidence,
        confidence_percent: classification.confidence * 100.0,
        distribution: classification.scores(),
        advice: ctx
            .knowledge
            .lookup(classification.label)
            .quick_advice
            .to_string(),
        record_id,
        record_error,
    }))
}

/// Collect the bytes of the `image` field, failing once they pass `limit`.
async fn read_image_field(mut payload: Multipart, limit: usize) -> Result<Vec<u8>, ApiError> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(mut field) = payload.try_next().await? {
        let is_image = field.name() == Some(IMAGE_FIELD) && image_data.is_none();
        let mut buffer = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if !is_image {
                continue;
            }
            if buffer.len() + chunk.len() > limit {
                warn!("Rejecting upload larger than {} bytes", limit);
                return Err(ApiError::PayloadTooLarge(limit));
            }
            buffer.extend_from_slice(&chunk);
        }
        if is_image {
            image_data = Some(buffer);
        }
    }

    match image_data {
        Some(data) if !data.is_empty() => Ok(data),
        Some(_) => Err(ApiError::InvalidImage("the uploaded file is empty".into())),
        None => Err(ApiError::InvalidImage(format!(
            "missing multipart field {:?}",
            IMAGE_FIELD
        ))),
    }
}

async fn education_list(ctx: web::Data<AppContext>) -> HttpResponse {
    let entries: Vec<AdvisoryView> = ctx
        .knowledge
        .entries()
        .iter()
        .map(|entry| entry.to_view(ASSETS_URL))
        .collect();
    HttpResponse::Ok().json(entries)
}

async fn education_one(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let label = path.into_inner();
    let entry = ctx.knowledge.lookup_str(&label)?;
    Ok(HttpResponse::Ok().json(entry.to_view(ASSETS_URL)))
}

async fn history_list(ctx: web::Data<AppContext>) -> Result<HttpResponse, ApiError> {
    let worker_ctx = ctx.clone();
    let records = web::block(move || worker_ctx.history.list()).await??;
    let entries: Vec<HistoryEntry> = records.iter().map(history_entry).collect();
    Ok(HttpResponse::Ok().json(entries))
}

async fn history_delete(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let worker_ctx = ctx.clone();
    let target = id.clone();
    let deleted = match web::block(move || worker_ctx.history.delete(&target)).await? {
        Ok(()) => true,
        Err(HistoryError::NotFound(_)) => {
            warn!("History entry {:?} was already gone", id);
            false
        }
        Err(e) => return Err(e.into()),
    };
    Ok(HttpResponse::Ok().json(DeleteResponse { id, deleted }))
}

fn history_entry(record: &HistoryRecord) -> HistoryEntry {
    HistoryEntry {
        id: record.id.clone(),
        label: record.label.clone(),
        captured_at: record.timestamp(),
        display_time: record.display_time(),
        image_url: format!("{}/{}", HISTORY_IMAGES_URL, urlencoding::encode(&record.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{CollisionPolicy, HistoryStore};
    use crate::inference::model::tests::{StubClassifier, jpeg_bytes};
    use crate::inference::{InferenceError, Model};
    use crate::knowledge::KnowledgeBase;
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::{App, test};
    use chrono::NaiveDate;
    use shared::ErrorResponse;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    const BOUNDARY: &str = "----ikancheck-test-boundary";
    const HEALTHY: [f32; 7] = [0.02, 0.03, 0.05, 0.1, 0.7, 0.05, 0.05];

    fn context(dir: &TempDir, stub: Arc<StubClassifier>, max_upload_bytes: usize) -> AppContext {
        AppContext::new(
            Ok(Model::new(stub)),
            KnowledgeBase::builtin(),
            HistoryStore::open(dir.path(), CollisionPolicy::Overwrite).unwrap(),
            max_upload_bytes,
        )
    }

    fn multipart_body(field: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"fish.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn detect_request(field: &str, data: &[u8]) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/detect")
            .insert_header((
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(field, data))
    }

    #[actix_web::test]
    async fn detect_classifies_and_records() {
        let dir = TempDir::new().unwrap();
        let stub = Arc::new(StubClassifier::new(HEALTHY.to_vec()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context(&dir, stub.clone(), 1 << 20)))
                .configure(configure_api),
        )
        .await;

        let resp: DetectionResponse =
            test::call_and_read_body_json(&app, detect_request("image", &jpeg_bytes([20, 90, 160])).to_request())
                .await;

        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resp.label, ClassLabel::HealthyFish);
        assert!((resp.confidence_percent - 70.0).abs() < 1e-3);
        assert_eq!(resp.distribution.len(), 7);
        assert!(resp.advice.contains("healthy"));
        assert!(resp.record_error.is_none());

        let id = resp.record_id.unwrap();
        assert!(id.ends_with("_Healthy Fish.jpg"));
        assert!(dir.path().join(&id).is_file());
    }

    #[actix_web::test]
    async fn detect_rejects_bad_uploads() {
        let dir = TempDir::new().unwrap();
        let stub = Arc::new(StubClassifier::new(HEALTHY.to_vec()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context(&dir, stub.clone(), 64)))
                .configure(configure_api),
        )
        .await;

        let resp = test::call_service(&app, detect_request("image", b"not an image").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.kind, "invalid_image");

        let resp = test::call_service(&app, detect_request("photo", b"abc").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(&app, detect_request("image", &[0u8; 512]).to_request()).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[actix_web::test]
    async fn missing_model_answers_service_unavailable() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::new(
            Err(InferenceError::ModelUnavailable("model file not found".into())),
            KnowledgeBase::builtin(),
            HistoryStore::open(dir.path(), CollisionPolicy::Overwrite).unwrap(),
            1 << 20,
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .configure(configure_api),
        )
        .await;

        let resp = test::call_service(&app, detect_request("image", &jpeg_bytes([1, 2, 3])).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let health: HealthResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/health").to_request(),
        )
        .await;
        assert!(!health.model_loaded);
        assert!(health.model_error.unwrap().contains("not found"));
        assert_eq!(health.labels, 7);

        // the rest of the app keeps working
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/education").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn education_lookup_is_exact() {
        let dir = TempDir::new().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(context(
                    &dir,
                    Arc::new(StubClassifier::new(HEALTHY.to_vec())),
                    1 << 20,
                )))
                .configure(configure_api),
        )
        .await;

        let all: Vec<AdvisoryView> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/education").to_request(),
        )
        .await;
        let labels: Vec<ClassLabel> = all.iter().map(|v| v.label).collect();
        assert_eq!(labels, ClassLabel::ALL.to_vec());

        let one: AdvisoryView = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/education/Parasitic%20diseases")
                .to_request(),
        )
        .await;
        assert_eq!(one.label, ClassLabel::ParasiticDiseases);
        assert_eq!(one.image_url, "/assets/image/parasit.jpg");

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/education/parasitic%20diseases")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn history_lists_newest_first_and_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, Arc::new(StubClassifier::new(HEALTHY.to_vec())), 1 << 20);
        let image = decode_image(&jpeg_bytes([200, 10, 10])).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let older = ctx
            .history
            .record(&image, ClassLabel::HealthyFish, day.and_hms_opt(10, 0, 0).unwrap())
            .unwrap();
        let newer = ctx
            .history
            .record(&image, ClassLabel::Aeromoniasis, day.and_hms_opt(12, 0, 0).unwrap())
            .unwrap();
        std::fs::write(dir.path().join("notes.jpg"), b"x").unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .configure(configure_api),
        )
        .await;

        let entries: Vec<HistoryEntry> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/history").to_request(),
        )
        .await;
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        // names without a timestamp sort by the file name itself
        assert_eq!(ids, vec!["notes.jpg", newer.as_str(), older.as_str()]);
        assert_eq!(entries[0].label, "notes");
        assert_eq!(entries[0].display_time, "Unknown");
        assert_eq!(entries[1].display_time, "01 January 2024, 12:00");
        assert_eq!(
            entries[2].image_url,
            "/history-images/20240101_100000_Healthy%20Fish.jpg"
        );
        assert_eq!(entries[2].captured_at.as_deref(), Some("20240101_100000"));

        let uri = format!("/api/history/{}", urlencoding::encode(&older));
        let first: DeleteResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert!(first.deleted);
        assert_eq!(first.id, older);

        let second: DeleteResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::delete().uri(&uri).to_request(),
        )
        .await;
        assert!(!second.deleted);

        let resp = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/api/history/.hidden.jpg")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let entries: Vec<HistoryEntry> = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/history").to_request(),
        )
        .await;
        assert_eq!(entries.len(), 2);
    }
}
