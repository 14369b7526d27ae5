//! End-to-end tests for the web service against the in-memory drive.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use chrono::Local;
use rxsnap_api::{setup, state::AppState};
use rxsnap_core::{naming, Config};
use rxsnap_drive::MemoryDrive;

struct TestApp {
    server: TestServer,
    drive: Arc<MemoryDrive>,
    root_id: String,
    staging: tempfile::TempDir,
}

fn setup_test_app() -> TestApp {
    let staging = tempfile::tempdir().unwrap();
    let config = Config::for_memory_backend(staging.path());
    let root_id = config.root_folder_id.clone();
    let drive = Arc::new(MemoryDrive::new());
    let state = Arc::new(AppState::new(config, drive.clone()));
    let server = TestServer::new(setup::build_router(state)).unwrap();
    TestApp {
        server,
        drive,
        root_id,
        staging,
    }
}

fn photo_form(pharmacy: &str, rate: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("pharmacy", pharmacy)
        .add_text("rate", rate)
        .add_part(
            "file",
            Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
                .file_name("capture.jpg")
                .mime_type("image/jpeg"),
        )
}

#[tokio::test]
async fn index_renders_the_form() {
    let app = setup_test_app();
    let response = app.server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Pharmacy 15"));
    assert!(html.contains("HOT"));
    assert!(html.contains("enctype='multipart/form-data'"));
}

#[tokio::test]
async fn healthz_answers_ok() {
    let app = setup_test_app();
    let response = app.server.get("/healthz").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn upload_confirms_month_pharmacy_and_filename() {
    let app = setup_test_app();
    let today = Local::now().date_naive();
    let month = naming::month_name(today);
    let expected_name = format!("Pharmacy 3_{}_HOT.jpg", today.format("%Y-%m-%d"));

    let response = app
        .server
        .post("/upload")
        .multipart(photo_form("Pharmacy 3", "HOT"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.text(),
        format!(
            "File successfully uploaded to {}/Pharmacy 3 as {}",
            month, expected_name
        )
    );

    // The photo landed under <root>/<Month>/<Pharmacy 3>/.
    let month_folder = app.drive.find_child(&app.root_id, month).await.unwrap();
    let pharmacy_folder = app
        .drive
        .find_child(&month_folder.id, "Pharmacy 3")
        .await
        .unwrap();
    assert!(app
        .drive
        .find_child(&pharmacy_folder.id, &expected_name)
        .await
        .is_some());

    // Staged copy removed after confirmed remote success.
    let leftovers: Vec<_> = std::fs::read_dir(app.staging.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn second_upload_reuses_the_folders() {
    let app = setup_test_app();

    app.server
        .post("/upload")
        .multipart(photo_form("Pharmacy 4", "REG"))
        .await
        .assert_status_ok();
    app.server
        .post("/upload")
        .multipart(photo_form("Pharmacy 4", "ECO"))
        .await
        .assert_status_ok();

    // One month folder and one pharmacy folder in total.
    assert_eq!(app.drive.create_folder_calls(), 2);
    assert_eq!(app.drive.upload_calls(), 2);
}

#[tokio::test]
async fn missing_fields_make_no_drive_calls() {
    let app = setup_test_app();

    let no_pharmacy = MultipartForm::new().add_text("rate", "HOT").add_part(
        "file",
        Part::bytes(vec![1, 2, 3])
            .file_name("capture.jpg")
            .mime_type("image/jpeg"),
    );
    let response = app.server.post("/upload").multipart(no_pharmacy).await;
    response.assert_status_bad_request();
    assert_eq!(response.text(), "Missing required fields");

    let no_file = MultipartForm::new()
        .add_text("pharmacy", "Pharmacy 1")
        .add_text("rate", "HOT");
    let response = app.server.post("/upload").multipart(no_file).await;
    response.assert_status_bad_request();

    assert_eq!(app.drive.total_calls(), 0);
}

#[tokio::test]
async fn empty_filename_is_rejected() {
    let app = setup_test_app();

    let form = MultipartForm::new()
        .add_text("pharmacy", "Pharmacy 1")
        .add_text("rate", "ECO")
        .add_part(
            "file",
            Part::bytes(vec![1, 2, 3])
                .file_name("")
                .mime_type("image/jpeg"),
        );

    let response = app.server.post("/upload").multipart(form).await;
    response.assert_status_bad_request();
    assert_eq!(response.text(), "No selected file");
    assert_eq!(app.drive.total_calls(), 0);
}

#[tokio::test]
async fn oversize_upload_is_rejected_as_too_large() {
    let app = setup_test_app();

    // One byte past 32 MiB once the other form parts are counted.
    let form = MultipartForm::new()
        .add_text("pharmacy", "Pharmacy 1")
        .add_text("rate", "ECO")
        .add_part(
            "file",
            Part::bytes(vec![0u8; 33 * 1024 * 1024])
                .file_name("capture.jpg")
                .mime_type("image/jpeg"),
        );

    let response = app.server.post("/upload").multipart(form).await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.text().starts_with("File too large"));

    assert_eq!(app.drive.total_calls(), 0);
    let leftovers: Vec<_> = std::fs::read_dir(app.staging.path()).unwrap().collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn unknown_enumeration_values_are_rejected() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/upload")
        .multipart(photo_form("Pharmacy 99", "HOT"))
        .await;
    response.assert_status_bad_request();

    let response = app
        .server
        .post("/upload")
        .multipart(photo_form("Pharmacy 1", "OVERNIGHT"))
        .await;
    response.assert_status_bad_request();

    assert_eq!(app.drive.total_calls(), 0);
}
