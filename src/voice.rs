//! # Voice Input Module
//!
//! ## Purpose
//! Adapter between a speech-recognition source and the search session. Voice
//! is just another way to produce query text: recognized transcripts feed the
//! orchestrator exactly like typed input, so they get the same debouncing,
//! epoch tracking, and precedence rules.
//!
//! ## Input/Output Specification
//! - **Input**: Stream of recognized transcript strings
//! - **Output**: Query submissions on the session handle
//! - **Lifetime**: Runs until the transcript source closes

use crate::orchestrator::OrchestratorHandle;
use crate::utils::TextUtils;
use tokio::sync::mpsc;

/// Forward recognized transcripts into a search session until the source
/// channel closes. Interim and final transcripts are treated alike; the
/// orchestrator's debounce coalesces them.
pub async fn forward_transcripts(
    handle: OrchestratorHandle,
    mut transcripts: mpsc::UnboundedReceiver<String>,
) {
    while let Some(transcript) = transcripts.recv().await {
        tracing::debug!(
            transcript = %TextUtils::truncate(&transcript, 40),
            "voice transcript received"
        );
        handle.submit(&transcript);
    }
    tracing::debug!("voice transcript source closed");
}
