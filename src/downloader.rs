use std::io::{self, Stdout, Write};
use std::path::Path;
use std::time::Duration;
use futures::StreamExt;
use log::{debug, info};
use reqwest::{Client, Response};
use reqwest::header::USER_AGENT;
use crate::download_configuration::DownloadConfiguration;
use crate::download_progress::ProgressReporter;
use crate::download_session::DownloadSession;
use crate::error::DownloadError;
use crate::remote_file::RemoteFileInfo;
use crate::stream::Stream;

/// Outcome of a finished transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSummary {
    pub bytes_written: u64,
    pub expected_total_bytes: Option<u64>,
    pub progress_updates: usize,
    pub elapsed: Duration,
}

/// Streams one HTTP(S) body at a time to disk, drawing progress on `console`.
pub struct Downloader<W: Write> {
    client: Client,
    console: W,
}

impl Downloader<Stdout> {
    pub fn new() -> Downloader<Stdout> {
        Downloader::with_console(Client::new(), io::stdout())
    }
}

impl<W: Write> Downloader<W> {
    pub fn with_console(client: Client, console: W) -> Downloader<W> {
        Downloader {
            client,
            console,
        }
    }

    pub fn into_console(self) -> W {
        self.console
    }

    pub async fn download(&mut self, config: &DownloadConfiguration) -> crate::error::Result<DownloadSummary> {
        // the handle is closed on every return below, including request failures
        let mut stream = Stream::new(&config.path).await?;
        let mut session = DownloadSession::new(&config.url, &config.path);

        info!("Waiting for response from {}", session.url());
        let response = match self.client
            .get(session.url())
            .header(USER_AGENT, config.user_agent.as_str())
            .send()
            .await {
            Ok(response) => response,
            Err(e) => {
                return Err(DownloadError::DownloadFailed { url: config.url.clone(), source: e });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus { url: config.url.clone(), status });
        }

        let remote_file_info = RemoteFileInfo::new(response.headers());
        if let Some(last_modified) = remote_file_info.last_modified {
            debug!("{} last modified {}", session.url(), last_modified.to_rfc3339());
        }
        session.set_expected_total_bytes(remote_file_info.total_length);
        // throughput counts from the first header, not from connecting
        session.start_timer();

        info!("Downloading {} to {}", session.url(), session.path().display());

        let mut reporter = ProgressReporter::new(&mut self.console);
        let transferred = transfer(response, config, &mut stream, &mut session, &mut reporter).await;
        drop(stream);

        if let Err(e) = transferred {
            if reporter.updates() > 0 {
                if let Err(output_error) = reporter.finish() {
                    debug!("progress output failed: {}", output_error);
                }
            }
            return Err(e);
        }

        if let Err(e) = reporter.finish() {
            debug!("progress output failed: {}", e);
        }

        let summary = DownloadSummary {
            bytes_written: session.bytes_transferred(),
            expected_total_bytes: session.expected_total_bytes(),
            progress_updates: reporter.updates(),
            elapsed: session.elapsed(),
        };
        info!("Downloaded {} bytes to {}", summary.bytes_written, session.path().display());
        Ok(summary)
    }
}

impl Default for Downloader<Stdout> {
    fn default() -> Self {
        Downloader::new()
    }
}

async fn transfer<W: Write>(
    response: Response,
    config: &DownloadConfiguration,
    stream: &mut Stream,
    session: &mut DownloadSession,
    reporter: &mut ProgressReporter<W>,
) -> crate::error::Result<()> {
    match session.expected_total_bytes() {
        None => {
            // unknown length: single shot, nothing to measure progress against
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    return Err(DownloadError::DownloadFailed { url: config.url.clone(), source: e });
                }
            };
            stream.write_async(&body).await?;
            session.record(body.len());
        }
        Some(total_length) => {
            let chunk_size = config.chunk_size(total_length) as usize;
            debug!("{} bytes expected, progress every {} bytes", total_length, chunk_size);

            let mut body = response.bytes_stream();
            let mut pending: Vec<u8> = Vec::with_capacity(chunk_size);
            while let Some(item) = body.next().await {
                let bytes = match item {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        return Err(DownloadError::DownloadFailed { url: config.url.clone(), source: e });
                    }
                };
                pending.extend_from_slice(&bytes);
                while pending.len() >= chunk_size {
                    let rest = pending.split_off(chunk_size);
                    let chunk = std::mem::replace(&mut pending, rest);
                    write_chunk(&mut *stream, &mut *session, &mut *reporter, &chunk).await?;
                }
            }
            if !pending.is_empty() {
                write_chunk(&mut *stream, &mut *session, &mut *reporter, &pending).await?;
            }
        }
    }

    stream.flush_async().await
}

async fn write_chunk<W: Write>(
    stream: &mut Stream,
    session: &mut DownloadSession,
    reporter: &mut ProgressReporter<W>,
    chunk: &[u8],
) -> crate::error::Result<()> {
    session.record(chunk.len());
    stream.write_async(chunk).await?;
    if let Err(e) = reporter.report(session) {
        debug!("progress output failed: {}", e);
    }
    Ok(())
}

/// Downloads `url` to `path`, drawing progress on stdout.
pub async fn download(url: &str, path: impl AsRef<Path>, user_agent: &str) -> crate::error::Result<DownloadSummary> {
    let config = DownloadConfiguration::new()
        .set_url(url)
        .set_file_path(path)
        .set_user_agent(user_agent)
        .build()?;
    Downloader::new().download(&config).await
}
