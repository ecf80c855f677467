//! Main app runner for the task and media commands

use std::path::PathBuf;
use std::process::ExitCode;

use async_trait::async_trait;
use colored::*;

use crate::application::ports::{ConfigStore, ViewEvent, ViewSink};
use crate::application::{
    AttachOutcome, RecordingController, StatusOutcome, StoreError, TaskBoard,
};
use crate::domain::config::AppConfig;
use crate::domain::media::VideoMimeType;
use crate::domain::task::TaskStatus;
use crate::infrastructure::{FileCaptureDevice, HttpSyncClient, XdgConfigStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// View sink that prints events to stderr as they happen
pub struct CliViewSink;

#[async_trait]
impl ViewSink for CliViewSink {
    async fn publish(&self, event: ViewEvent) {
        match event {
            ViewEvent::Notice(message) => {
                eprintln!("{} {}", "ℹ".cyan(), message);
            }
            ViewEvent::SessionState(state) => {
                eprintln!("{} session: {}", "●".cyan(), state);
            }
            // list/detail changes are rendered by the command handlers
            ViewEvent::TaskListChanged | ViewEvent::TaskChanged(_) | ViewEvent::MediaChanged(_) => {
            }
        }
    }
}

/// Options for the record command
pub struct RecordOptions {
    pub task_id: u64,
    pub input: PathBuf,
    pub mime_type: Option<VideoMimeType>,
    pub chunk_size: Option<usize>,
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Resolve the API base URL, from an explicit override or the tenant config
pub fn resolve_base_url(config: &AppConfig, override_url: Option<String>) -> Result<String, String> {
    if let Some(url) = override_url {
        return Ok(url.trim_end_matches('/').to_string());
    }
    config.base_url().ok_or_else(|| {
        "No tenant configured. Pass --tenant <domain>, set FIELD_TASK_TENANT, or run 'field-task config set tenant_domain <domain>'"
            .to_string()
    })
}

fn board_for(base_url: &str) -> TaskBoard<HttpSyncClient, CliViewSink> {
    TaskBoard::new(HttpSyncClient::new(base_url), CliViewSink)
}

/// List assigned tasks
pub async fn run_tasks(base_url: &str) -> ExitCode {
    let mut presenter = Presenter::new();
    let mut board = board_for(base_url);

    presenter.start_spinner("Fetching tasks...");
    if let Err(e) = board.refresh().await {
        presenter.stop_spinner();
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }
    presenter.stop_spinner();

    if board.tasks().is_empty() {
        presenter.info("No tasks assigned");
        return ExitCode::from(EXIT_SUCCESS);
    }
    for task in board.tasks() {
        presenter.task_line(task);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Show one task with its stages and media
pub async fn run_show(base_url: &str, task_id: u64) -> ExitCode {
    let presenter = Presenter::new();
    let mut board = board_for(base_url);

    if let Err(e) = refresh_and_select(&mut board, task_id).await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    // selection is guaranteed after refresh_and_select
    let task = match board.selected() {
        Some(t) => t.clone(),
        None => return ExitCode::from(EXIT_ERROR),
    };

    presenter.key_value("id", &task.id.to_string());
    presenter.key_value("title", &task.title);
    presenter.key_value("status", &presenter.status_badge(task.status));
    if let Some(display) = task.status_display.as_deref() {
        presenter.key_value("status_display", display);
    }
    if let Some(description) = task.description.as_deref() {
        presenter.key_value("description", description);
    }
    let total = task.total_minutes();
    if total > 0 {
        presenter.key_value("total_duration", &format!("{} min", total));
    }
    if !task.stages.is_empty() {
        presenter.output("stages:");
        for stage in &task.stages {
            let mark = if stage.is_completed { "✓" } else { " " };
            presenter.output(&format!(
                "  [{}] {} ({} min)",
                mark, stage.name, stage.duration_minutes
            ));
        }
    }
    presenter.key_value("media", &board.media().len().to_string());

    ExitCode::from(EXIT_SUCCESS)
}

/// Update a task's status optimistically
pub async fn run_status(base_url: &str, task_id: u64, status: TaskStatus) -> ExitCode {
    let presenter = Presenter::new();
    let mut board = board_for(base_url);

    if let Err(e) = refresh_and_select(&mut board, task_id).await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    match board.set_status(status).await {
        Ok(StatusOutcome::Confirmed) => {
            presenter.success(&format!("Task #{} is now {}", task_id, status.label()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(StatusOutcome::LocalOnly) => {
            presenter.warn(&format!(
                "Task #{} set to {} locally; the server did not confirm",
                task_id,
                status.label()
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// List media recorded for a task
pub async fn run_media(base_url: &str, task_id: u64) -> ExitCode {
    let presenter = Presenter::new();
    let mut board = board_for(base_url);

    if let Err(e) = refresh_and_select(&mut board, task_id).await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    if board.media().is_empty() {
        presenter.info(&format!("No media for task #{}", task_id));
        return ExitCode::from(EXIT_SUCCESS);
    }
    for record in board.media() {
        if record.is_local() {
            presenter.output(&record.label().yellow().to_string());
        } else {
            presenter.output(&record.label());
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Capture a recording from a file-backed stream and attach it to a task
pub async fn run_record(base_url: &str, config: &AppConfig, options: RecordOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let mut board = board_for(base_url);

    presenter.start_spinner(&format!("Loading task #{}...", options.task_id));
    if let Err(e) = refresh_and_select(&mut board, options.task_id).await {
        presenter.stop_spinner();
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }
    presenter.stop_spinner();

    let chunk_size = options.chunk_size.unwrap_or(config.chunk_size_or_default());
    let device = FileCaptureDevice::new(options.input).with_chunk_size(chunk_size);
    let mut controller = RecordingController::new(device, CliViewSink)
        .with_mime_type(options.mime_type.unwrap_or_default());

    let artifact = async {
        controller.start(options.task_id).await?;
        controller.begin().await?;
        controller.pump().await?;
        controller.stop().await
    }
    .await;

    let artifact = match artifact {
        Ok(artifact) => artifact,
        Err(e) => {
            controller.cancel().await;
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    presenter.info(&format!(
        "Captured {} as {}",
        artifact.human_readable_size(),
        artifact.filename()
    ));

    presenter.start_spinner("Uploading recording...");
    match board.attach_recording(artifact).await {
        Ok(AttachOutcome::Uploaded) => {
            presenter.spinner_success("Recording uploaded");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(AttachOutcome::LocalOnly) => {
            presenter.stop_spinner();
            presenter.warn("Upload failed; the recording is kept locally");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.stop_spinner();
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn refresh_and_select(
    board: &mut TaskBoard<HttpSyncClient, CliViewSink>,
    task_id: u64,
) -> Result<(), StoreError> {
    board.refresh().await?;
    board.select(task_id).await
}
