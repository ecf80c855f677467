//! End-to-end flows: capture from a file stream, attach to a task, and
//! fall back to local records when the tenant API misbehaves

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use field_task::application::ports::{ViewEvent, ViewSink};
use field_task::application::{
    AttachOutcome, RecordingController, RecordingError, StatusOutcome, TaskBoard,
};
use field_task::domain::task::TaskStatus;
use field_task::infrastructure::{FileCaptureDevice, HttpSyncClient};

struct NullSink;

#[async_trait]
impl ViewSink for NullSink {
    async fn publish(&self, _event: ViewEvent) {}
}

fn input_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

async fn server_with_task(id: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": id, "title": "Inspect machine", "status": "OPEN"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/media/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    server
}

async fn capture_from_file(
    file: &tempfile::NamedTempFile,
    task_id: u64,
) -> field_task::domain::media::MediaArtifact {
    let device = FileCaptureDevice::new(file.path()).with_chunk_size(4);
    let mut controller = RecordingController::new(device, NullSink);
    controller.start(task_id).await.unwrap();
    controller.begin().await.unwrap();
    controller.pump().await.unwrap();
    controller.stop().await.unwrap()
}

#[tokio::test]
async fn captured_file_uploads_and_appears_as_remote_media() {
    let server = server_with_task(1).await;
    Mock::given(method("POST"))
        .and(path("/api/media/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 90,
            "file": "https://example.com/m/90.webm",
            "title": "Recording for task #1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = input_file(&[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let artifact = capture_from_file(&file, 1).await;
    assert_eq!(artifact.payload(), &[1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let mut board = TaskBoard::new(HttpSyncClient::new(server.uri()), NullSink);
    board.refresh().await.unwrap();
    board.select(1).await.unwrap();

    let outcome = board.attach_recording(artifact).await.unwrap();
    assert_eq!(outcome, AttachOutcome::Uploaded);
    assert_eq!(board.media().len(), 1);
    assert!(!board.media()[0].is_local());
}

#[tokio::test]
async fn failed_upload_keeps_recording_as_local_record() {
    let server = server_with_task(1).await;
    Mock::given(method("POST"))
        .and(path("/api/media/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage offline"))
        .mount(&server)
        .await;

    // three deliveries of sizes 10, 0, 20 concatenate to 30 bytes
    let file = input_file(&[0u8; 30]);
    let device = FileCaptureDevice::new(file.path()).with_chunk_size(10);
    let mut controller = RecordingController::new(device, NullSink);
    controller.start(1).await.unwrap();
    controller.begin().await.unwrap();
    controller.push_chunk(vec![]);
    controller.pump().await.unwrap();
    let artifact = controller.stop().await.unwrap();
    assert_eq!(artifact.size_bytes(), 30);

    let mut board = TaskBoard::new(HttpSyncClient::new(server.uri()), NullSink);
    board.refresh().await.unwrap();
    board.select(1).await.unwrap();

    let outcome = board.attach_recording(artifact).await.unwrap();
    assert_eq!(outcome, AttachOutcome::LocalOnly);
    // the list grows by exactly one entry either way
    assert_eq!(board.media().len(), 1);
    assert!(board.media()[0].is_local());
}

#[tokio::test]
async fn status_survives_failed_patch() {
    let server = server_with_task(1).await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/1/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("db locked"))
        .mount(&server)
        .await;

    let mut board = TaskBoard::new(HttpSyncClient::new(server.uri()), NullSink);
    board.refresh().await.unwrap();
    board.select(1).await.unwrap();

    let outcome = board.set_status(TaskStatus::Close).await.unwrap();
    assert_eq!(outcome, StatusOutcome::LocalOnly);
    assert_eq!(board.selected().unwrap().status, TaskStatus::Close);
}

#[tokio::test]
async fn cancelling_a_new_session_leaves_an_upload_in_flight_alone() {
    let server = server_with_task(1).await;
    Mock::given(method("POST"))
        .and(path("/api/media/"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_delay(Duration::from_millis(200))
                .set_body_json(serde_json::json!({
                    "id": 91,
                    "file": "https://example.com/m/91.webm"
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let file = input_file(&[1, 2, 3, 4]);
    let artifact = capture_from_file(&file, 1).await;

    let mut board = TaskBoard::new(HttpSyncClient::new(server.uri()), NullSink);
    board.refresh().await.unwrap();
    board.select(1).await.unwrap();

    // a fresh capture attempt cancelled while the upload is still in flight
    let next_file = input_file(&[9, 9]);
    let device = FileCaptureDevice::new(next_file.path()).with_chunk_size(2);
    let mut controller = RecordingController::new(device, NullSink);

    let (outcome, _) = tokio::join!(board.attach_recording(artifact), async {
        controller.start(1).await.unwrap();
        controller.cancel().await;
    });

    assert_eq!(outcome.unwrap(), AttachOutcome::Uploaded);
    assert_eq!(board.media().len(), 1);
    assert!(!board.media()[0].is_local());
}

#[tokio::test]
async fn empty_input_produces_no_artifact() {
    let file = input_file(&[]);
    let device = FileCaptureDevice::new(file.path()).with_chunk_size(4);
    let mut controller = RecordingController::new(device, NullSink);

    controller.start(5).await.unwrap();
    controller.begin().await.unwrap();
    controller.pump().await.unwrap();

    let err = controller.stop().await.unwrap_err();
    assert!(matches!(err, RecordingError::Empty(_)));
}
