//! Test doubles for the request pipeline
//!
//! `ScriptedExtractor` plays a fixed answer per provider and writes the audio
//! file the way yt-dlp would; `RecordingSession` stands in for the chat.

#![allow(dead_code)] // not every test binary uses every helper

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tunefetch::core::error::{AppError, AppResult};
use tunefetch::download::{
    ChatSession, DownloadResult, MediaEntry, MediaExtractor, Provider, ProviderError, ProviderOptions, SearchOutcome,
};

/// What the fake extractor does for one provider
#[derive(Debug, Clone)]
pub enum Step {
    /// Downloads `title` and reports it as the first search hit
    Deliver { title: String, uploader: Option<String> },
    /// Downloads `title` but saves it as `<saved_as>.mp3`, so the predicted name misses
    DeliverRenamed { title: String, saved_as: String },
    /// Exits with this stderr
    Fail(String),
    /// Search finished with zero entries
    NoEntries,
}

impl Step {
    pub fn deliver(title: &str, uploader: &str) -> Self {
        Step::Deliver {
            title: title.to_string(),
            uploader: Some(uploader.to_string()),
        }
    }

    pub fn fail(stderr: &str) -> Self {
        Step::Fail(stderr.to_string())
    }
}

/// One recorded extractor invocation
#[derive(Debug, Clone)]
pub struct Call {
    pub provider: Provider,
    pub query: String,
    pub cookie_file: Option<PathBuf>,
    /// Whether the cookie file was on disk while the provider ran
    pub cookie_file_present: bool,
}

pub struct ScriptedExtractor {
    steps: HashMap<Provider, Step>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedExtractor {
    pub fn new(primary: Step, secondary: Step) -> Self {
        let steps = HashMap::from([(Provider::Primary, primary), (Provider::Secondary, secondary)]);
        Self {
            steps,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn providers_called(&self) -> Vec<Provider> {
        self.calls().into_iter().map(|c| c.provider).collect()
    }
}

fn output_dir(options: &ProviderOptions) -> PathBuf {
    options
        .output_template
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

#[async_trait]
impl MediaExtractor for ScriptedExtractor {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn extract(&self, query: &str, options: &ProviderOptions) -> Result<SearchOutcome, ProviderError> {
        self.calls.lock().unwrap().push(Call {
            provider: options.provider,
            query: query.to_string(),
            cookie_file: options.cookie_file.clone(),
            cookie_file_present: options.cookie_file.as_deref().is_some_and(Path::is_file),
        });

        let dir = output_dir(options);
        match self.steps[&options.provider].clone() {
            Step::Deliver { title, uploader } => {
                std::fs::write(dir.join(format!("{}.{}", title, options.audio_format)), b"ID3")?;
                Ok(SearchOutcome::EntryList {
                    entries: vec![Some(MediaEntry {
                        title: Some(title.clone()),
                        uploader,
                        predicted_filename: Some(dir.join(format!("{}.webm", title))),
                        ..Default::default()
                    })],
                })
            }
            Step::DeliverRenamed { title, saved_as } => {
                std::fs::write(dir.join(format!("{}.{}", saved_as, options.audio_format)), b"ID3")?;
                Ok(SearchOutcome::SingleEntry(MediaEntry {
                    title: Some(title.clone()),
                    predicted_filename: Some(dir.join(format!("{}.opus", title))),
                    ..Default::default()
                }))
            }
            Step::Fail(stderr) => Err(ProviderError::from_stderr(&stderr)),
            Step::NoEntries => Ok(SearchOutcome::EntryList { entries: vec![] }),
        }
    }
}

/// An uploaded track as the chat saw it
#[derive(Debug, Clone)]
pub struct SentAudio {
    pub title: String,
    pub performer: Option<String>,
    pub provider: Provider,
    pub path: PathBuf,
    /// Whether the file existed at upload time
    pub file_present: bool,
}

#[derive(Debug, Default)]
pub struct RecordingSession {
    pub replies: Vec<String>,
    pub statuses: Vec<String>,
    pub audio: Vec<SentAudio>,
    /// Makes `send_audio` fail with this reason
    pub upload_error: Option<String>,
}

impl RecordingSession {
    pub fn failing_upload(reason: &str) -> Self {
        Self {
            upload_error: Some(reason.to_string()),
            ..Default::default()
        }
    }

    pub fn last_status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }
}

#[async_trait]
impl ChatSession for RecordingSession {
    async fn reply(&mut self, text: &str) -> AppResult<()> {
        self.replies.push(text.to_string());
        Ok(())
    }

    async fn set_status(&mut self, text: &str) -> AppResult<()> {
        self.statuses.push(text.to_string());
        Ok(())
    }

    async fn send_audio(&mut self, track: &DownloadResult) -> AppResult<()> {
        self.audio.push(SentAudio {
            title: track.title.clone(),
            performer: track.performer.clone(),
            provider: track.provider,
            path: track.path.clone(),
            file_present: track.path.is_file(),
        });
        match &self.upload_error {
            Some(reason) => Err(AppError::Upload(reason.clone())),
            None => Ok(()),
        }
    }
}
