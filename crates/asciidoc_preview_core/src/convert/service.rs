//! The conversion worker and its owning service handle.
//!
//! One long-lived worker task owns the converter for the lifetime of the
//! service. Requests travel over a channel and are processed strictly one at
//! a time, so a burst of dispatches queues up instead of clobbering an
//! in-flight conversion. Every dispatch is tagged with a correlation id and
//! answered on its own oneshot channel, which makes cross-delivery of
//! responses impossible.

use super::converter::{ConvertError, Converter, RawConversion};
use super::{build_request, fixups, ConversionRequest, ConversionResult};
use crate::assets::AssetRoot;
use crate::preferences::RenderPreferences;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::oneshot;

struct Job {
    id: u64,
    request: ConversionRequest,
    reply: oneshot::Sender<Result<RawConversion, ConvertError>>,
}

/// Owned handle to the conversion worker.
///
/// The worker is not ambient global state: whoever owns the rendering
/// pipeline opens a service and the worker stops when the handle is dropped.
pub struct ConversionService {
    job_tx: UnboundedSender<Job>,
    /// Correlation id of the next dispatch.
    next_id: AtomicU64,
    /// Correlation id of the most recently dispatched request, used to
    /// discard superseded responses on arrival.
    latest_id: AtomicU64,
    timeout: Duration,
    assets: AssetRoot,
}

impl ConversionService {
    /// Spawn the conversion worker and return its owning handle.
    pub fn open(converter: Arc<dyn Converter>, assets: AssetRoot, timeout: Duration) -> Self {
        let (job_tx, job_rx) = unbounded_channel();
        tokio::spawn(worker_loop(converter, job_rx));
        Self {
            job_tx,
            next_id: AtomicU64::new(0),
            latest_id: AtomicU64::new(0),
            timeout,
            assets,
        }
    }

    /// Asset root the service resolves theme stylesheets against.
    pub fn assets(&self) -> &AssetRoot {
        &self.assets
    }

    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn dispatch(
        &self,
        text: &str,
        doc_path: &Path,
        preferences: &RenderPreferences,
    ) -> Result<PendingConversion, ConvertError> {
        let stylesheet_url = self.assets.theme_css(&preferences.theme);
        let request = build_request(text, doc_path, preferences, &self.assets);
        let id = self.next_request_id();
        self.latest_id.store(id, Ordering::SeqCst);

        let (reply_tx, reply_rx) = oneshot::channel();
        self.job_tx
            .send(Job {
                id,
                request,
                reply: reply_tx,
            })
            .map_err(|_| ConvertError::WorkerGone)?;

        tracing::trace!(id, "Dispatched conversion request");

        Ok(PendingConversion {
            id,
            stylesheet_url,
            reply_rx,
        })
    }

    async fn await_reply(
        &self,
        pending: &mut PendingConversion,
    ) -> Result<RawConversion, ConvertError> {
        match tokio::time::timeout(self.timeout, &mut pending.reply_rx).await {
            Err(_elapsed) => Err(ConvertError::Timeout(self.timeout)),
            Ok(Err(_closed)) => Err(ConvertError::WorkerGone),
            Ok(Ok(outcome)) => outcome,
        }
    }

    /// Convert document text, waiting for this request's own result.
    ///
    /// The returned result always pairs with this call's request, even when
    /// other conversions are dispatched concurrently.
    pub async fn convert(
        &self,
        text: &str,
        doc_path: &Path,
        preferences: &RenderPreferences,
    ) -> Result<ConversionResult, ConvertError> {
        let mut pending = self.dispatch(text, doc_path, preferences)?;
        let raw = self.await_reply(&mut pending).await?;
        Ok(finish(raw, &pending.stylesheet_url))
    }

    /// Convert document text, discarding the result if a newer request has
    /// been dispatched in the meantime.
    ///
    /// Returns `Ok(None)` for a superseded request. There is no
    /// cancellation: the worker still performs the stale conversion, the
    /// dispatcher just drops its result on arrival.
    pub async fn convert_latest(
        &self,
        text: &str,
        doc_path: &Path,
        preferences: &RenderPreferences,
    ) -> Result<Option<ConversionResult>, ConvertError> {
        let mut pending = self.dispatch(text, doc_path, preferences)?;
        let outcome = self.await_reply(&mut pending).await;

        if self.latest_id.load(Ordering::SeqCst) != pending.id {
            tracing::trace!(id = pending.id, "Discarding superseded conversion result");
            return Ok(None);
        }

        outcome.map(|raw| Some(finish(raw, &pending.stylesheet_url)))
    }
}

struct PendingConversion {
    id: u64,
    stylesheet_url: String,
    reply_rx: oneshot::Receiver<Result<RawConversion, ConvertError>>,
}

/// Translate the wire-shaped response into a [`ConversionResult`], applying
/// the post-processing fixups.
fn finish(raw: RawConversion, stylesheet_url: &str) -> ConversionResult {
    let mut html = raw.html;
    if cfg!(windows) {
        html = fixups::fix_stylesheet_href(&html, stylesheet_url);
    }
    if raw.stem {
        html = fixups::escape_math_delimiters(&html);
    }
    ConversionResult {
        body_html: html,
        uses_math: raw.stem,
        diagnostic_messages: raw.messages,
    }
}

/// The worker: owns the converter, processes jobs one at a time.
async fn worker_loop(converter: Arc<dyn Converter>, mut job_rx: UnboundedReceiver<Job>) {
    while let Some(Job { id, request, reply }) = job_rx.recv().await {
        tracing::debug!(id, "Converting document");
        let converter = converter.clone();
        let outcome =
            match tokio::task::spawn_blocking(move || converter.convert(&request)).await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(ConvertError::Failed(join_error.to_string())),
            };

        if reply.send(outcome).is_err() {
            // The dispatcher gave up on this request (timeout or drop).
            tracing::debug!(id, "Conversion receiver dropped before delivery");
        }
    }

    tracing::debug!("Conversion worker stopped");
}
