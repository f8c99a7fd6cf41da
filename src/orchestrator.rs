//! # Search Orchestrator Module
//!
//! ## Purpose
//! Owns the lifecycle of a search session: debounces raw input, tracks a
//! monotonically increasing query epoch, dispatches the instant local search
//! and the slow remote search, and enforces result precedence so the display
//! never shows results for anything but the latest query.
//!
//! ## Input/Output Specification
//! - **Input**: Raw query text submissions (typed or voice)
//! - **Output**: `DisplayState` snapshots published through a watch channel
//! - **Guarantees**: Stale completions are dropped; empty input clears the
//!   display immediately without waiting out the quiet period
//!
//! ## Precedence
//! Local results are provisional (`fallback = true` when non-empty) while
//! the remote search is in flight. A non-empty remote answer for the current
//! epoch is authoritative and replaces them. A remote failure or empty
//! remote answer settles the session on the local results.
//!
//! All session state lives on one task; the handle and the remote calls only
//! talk to it through channels.

use crate::errors::DiscoveryError;
use crate::local_index::LocalIndexSearch;
use crate::remote::RemoteSearch;
use crate::{Locale, SearchResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

/// What the user should currently see for this session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    /// Ranked results for the latest settled or provisional answer
    pub results: Vec<SearchResult>,
    /// Results are local keyword matches standing in for the remote answer
    pub fallback: bool,
    /// A query is debouncing or a remote search is in flight
    pub searching: bool,
    /// The latest query settled with nothing to show
    pub no_results: bool,
}

/// Where the session currently is in its query lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryPhase {
    /// No query text; display is clear
    Idle,
    /// Text received, waiting out the quiet period
    Debouncing,
    /// Local results shown, remote search in flight
    Dispatched,
    /// Remote answered or failed; nothing in flight
    Settled,
}

enum Command {
    Submit(String),
    Shutdown,
}

/// Cloneable handle to a running orchestrator session
#[derive(Clone)]
pub struct OrchestratorHandle {
    cmd_tx: mpsc::UnboundedSender<Command>,
    display_rx: watch::Receiver<DisplayState>,
}

impl OrchestratorHandle {
    /// Submit the latest raw input text. Rapid successive submissions
    /// coalesce; only the text standing after the quiet period dispatches.
    pub fn submit(&self, text: &str) {
        let _ = self.cmd_tx.send(Command::Submit(text.to_string()));
    }

    /// Subscribe to display state updates.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.display_rx.clone()
    }

    /// Stop the session task. Idempotent; pending work is abandoned.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(Command::Shutdown);
    }
}

/// Debouncing, epoch-tracking search session driver
pub struct SearchOrchestrator {
    local: Arc<LocalIndexSearch>,
    remote: Arc<dyn RemoteSearch>,
    locale: Locale,
    quiet_period: Duration,
    epoch: u64,
    phase: QueryPhase,
    pending: Option<String>,
    deadline: Option<Instant>,
    local_results: Vec<SearchResult>,
    display_tx: watch::Sender<DisplayState>,
    completion_tx: mpsc::UnboundedSender<(u64, std::result::Result<Vec<SearchResult>, DiscoveryError>)>,
}

impl SearchOrchestrator {
    /// Spawn a search session. The locale is fixed for the session lifetime.
    pub fn spawn(
        local: Arc<LocalIndexSearch>,
        remote: Arc<dyn RemoteSearch>,
        locale: Locale,
        quiet_period: Duration,
    ) -> OrchestratorHandle {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (display_tx, display_rx) = watch::channel(DisplayState::default());
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let orchestrator = Self {
            local,
            remote,
            locale,
            quiet_period,
            epoch: 0,
            phase: QueryPhase::Idle,
            pending: None,
            deadline: None,
            local_results: Vec::new(),
            display_tx,
            completion_tx,
        };

        tokio::spawn(orchestrator.run(cmd_rx, completion_rx));

        OrchestratorHandle { cmd_tx, display_rx }
    }

    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<Command>,
        mut completion_rx: mpsc::UnboundedReceiver<(
            u64,
            std::result::Result<Vec<SearchResult>, DiscoveryError>,
        )>,
    ) {
        loop {
            let deadline = self.deadline;
            tokio::select! {
                maybe_cmd = cmd_rx.recv() => {
                    match maybe_cmd {
                        Some(Command::Submit(text)) => self.on_submit(text),
                        Some(Command::Shutdown) | None => {
                            tracing::debug!(epoch = self.epoch, phase = ?self.phase, "search session stopped");
                            break;
                        }
                    }
                }
                _ = async {
                    match deadline {
                        Some(at) => tokio::time::sleep_until(at).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    self.on_quiet_period_elapsed();
                }
                Some((epoch, outcome)) = completion_rx.recv() => {
                    self.on_remote_completion(epoch, outcome);
                }
            }
        }
    }

    /// New input text: bump the epoch so anything in flight becomes stale,
    /// then either clear immediately (empty) or restart the quiet period.
    fn on_submit(&mut self, text: String) {
        self.epoch += 1;
        let trimmed = text.trim();

        if trimmed.is_empty() {
            self.phase = QueryPhase::Idle;
            self.pending = None;
            self.deadline = None;
            self.local_results.clear();
            self.publish(DisplayState::default());
            tracing::debug!(epoch = self.epoch, "input cleared");
            return;
        }

        self.phase = QueryPhase::Debouncing;
        self.pending = Some(trimmed.to_string());
        self.deadline = Some(Instant::now() + self.quiet_period);

        // Keep whatever is on screen while the user types; only flag that a
        // newer answer is coming.
        let mut state = self.display_tx.borrow().clone();
        state.searching = true;
        state.no_results = false;
        self.publish(state);
    }

    /// Quiet period over: run the instant local search, show it as the
    /// provisional answer, and fire the remote search tagged with the epoch.
    fn on_quiet_period_elapsed(&mut self) {
        self.deadline = None;
        let Some(query) = self.pending.take() else {
            return;
        };

        self.phase = QueryPhase::Dispatched;
        self.local_results = self.local.search(&query, self.locale);
        tracing::debug!(
            epoch = self.epoch,
            phase = ?self.phase,
            local_results = self.local_results.len(),
            "query dispatched"
        );

        self.publish(DisplayState {
            results: self.local_results.clone(),
            fallback: !self.local_results.is_empty(),
            searching: true,
            no_results: false,
        });

        let remote = Arc::clone(&self.remote);
        let completion_tx = self.completion_tx.clone();
        let epoch = self.epoch;
        let locale = self.locale;
        tokio::spawn(async move {
            let outcome = remote.search(&query, locale).await;
            let _ = completion_tx.send((epoch, outcome));
        });
    }

    /// Remote answer arrived. Drop it unless it belongs to the current epoch.
    fn on_remote_completion(
        &mut self,
        epoch: u64,
        outcome: std::result::Result<Vec<SearchResult>, DiscoveryError>,
    ) {
        if epoch != self.epoch {
            tracing::debug!(
                stale_epoch = epoch,
                current_epoch = self.epoch,
                "dropping stale remote completion"
            );
            return;
        }

        self.phase = QueryPhase::Settled;
        match outcome {
            Ok(results) if !results.is_empty() => {
                tracing::debug!(epoch, results = results.len(), "remote answer accepted");
                self.publish(DisplayState {
                    results,
                    fallback: false,
                    searching: false,
                    no_results: false,
                });
            }
            // An empty remote answer and a remote failure settle the same
            // way: the local fallback, if any, stays on screen unchanged.
            Ok(_) => {
                tracing::debug!(epoch, "remote answer empty, keeping local results");
                self.settle_on_local();
            }
            Err(err) => {
                tracing::warn!(epoch, error = %err, "remote search failed, keeping local results");
                self.settle_on_local();
            }
        }
    }

    fn settle_on_local(&self) {
        self.publish(DisplayState {
            results: self.local_results.clone(),
            fallback: !self.local_results.is_empty(),
            searching: false,
            no_results: self.local_results.is_empty(),
        });
    }

    fn publish(&self, state: DisplayState) {
        let _ = self.display_tx.send(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DocumentCatalog;
    use crate::normalize::QueryNormalizer;
    use crate::{DocTranslation, DocumentRecord, ResultSource};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    const QUIET: Duration = Duration::from_millis(300);

    fn doc(id: &str, name: &str, aliases: &[&str]) -> DocumentRecord {
        let mut translations = HashMap::new();
        translations.insert(
            Locale::En,
            DocTranslation {
                name: name.to_string(),
                description: String::new(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            },
        );
        DocumentRecord {
            id: id.to_string(),
            category: "Finance".to_string(),
            translations,
        }
    }

    fn local_index() -> Arc<LocalIndexSearch> {
        let catalog = DocumentCatalog::from_records(vec![
            doc("vehicle-bill-of-sale", "Vehicle Bill of Sale", &["used car"]),
            doc("lease-agreement", "Residential Lease Agreement", &[]),
        ])
        .unwrap();
        Arc::new(LocalIndexSearch::new(
            Arc::new(catalog),
            QueryNormalizer::new(500).unwrap(),
            10,
        ))
    }

    fn semantic_result(id: &str) -> SearchResult {
        SearchResult {
            document_id: id.to_string(),
            title: id.replace('-', " "),
            description: String::new(),
            confidence: 0.95,
            source: ResultSource::Semantic,
            category: "Finance".to_string(),
            tags: Vec::new(),
        }
    }

    /// Per-query scripted remote: records calls, sleeps, then answers.
    /// `None` means the remote is unavailable for that query.
    struct ScriptedRemote {
        calls: Mutex<Vec<String>>,
        script: HashMap<String, (Duration, Option<Vec<SearchResult>>)>,
    }

    impl ScriptedRemote {
        fn new(script: Vec<(&str, Duration, Option<Vec<SearchResult>>)>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                script: script
                    .into_iter()
                    .map(|(q, delay, outcome)| (q.to_string(), (delay, outcome)))
                    .collect(),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl RemoteSearch for ScriptedRemote {
        async fn search(
            &self,
            query: &str,
            _locale: Locale,
        ) -> crate::errors::Result<Vec<SearchResult>> {
            self.calls.lock().push(query.to_string());
            let (delay, outcome) = match self.script.get(query) {
                Some((delay, outcome)) => (*delay, outcome.clone()),
                None => (Duration::ZERO, Some(Vec::new())),
            };
            tokio::time::sleep(delay).await;
            outcome.ok_or_else(|| DiscoveryError::RemoteUnavailable {
                details: "scripted outage".to_string(),
            })
        }
    }

    async fn wait_for(
        rx: &mut watch::Receiver<DisplayState>,
        pred: impl Fn(&DisplayState) -> bool,
    ) -> DisplayState {
        loop {
            {
                let state = rx.borrow();
                if pred(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_coalesce_into_one_dispatch() {
        let remote = ScriptedRemote::new(vec![(
            "used car",
            Duration::from_millis(10),
            Some(vec![semantic_result("vehicle-bill-of-sale")]),
        )]);
        let handle = SearchOrchestrator::spawn(local_index(), remote.clone(), Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("u");
        tokio::time::advance(Duration::from_millis(100)).await;
        handle.submit("us");
        tokio::time::advance(Duration::from_millis(100)).await;
        handle.submit("used car");

        let settled = wait_for(&mut display, |s| !s.searching && !s.results.is_empty()).await;
        assert_eq!(remote.calls(), vec!["used car"]);
        assert_eq!(settled.results[0].source, ResultSource::Semantic);
    }

    #[tokio::test(start_paused = true)]
    async fn local_results_shown_as_fallback_while_remote_pending() {
        // Remote takes long enough that the provisional state is observable.
        let remote = ScriptedRemote::new(vec![(
            "used car",
            Duration::from_secs(60),
            Some(vec![semantic_result("vehicle-bill-of-sale")]),
        )]);
        let handle = SearchOrchestrator::spawn(local_index(), remote, Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("used car");
        let provisional =
            wait_for(&mut display, |s| s.fallback && !s.results.is_empty()).await;
        assert!(provisional.searching);
        assert_eq!(provisional.results[0].document_id, "vehicle-bill-of-sale");
        assert_eq!(provisional.results[0].source, ResultSource::Keyword);
    }

    #[tokio::test(start_paused = true)]
    async fn remote_success_is_authoritative() {
        let remote = ScriptedRemote::new(vec![(
            "used car",
            Duration::from_millis(50),
            Some(vec![semantic_result("vehicle-bill-of-sale")]),
        )]);
        let handle = SearchOrchestrator::spawn(local_index(), remote, Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("used car");
        let settled = wait_for(&mut display, |s| !s.searching && !s.results.is_empty()).await;
        assert!(!settled.fallback);
        assert!(!settled.no_results);
        assert_eq!(settled.results[0].source, ResultSource::Semantic);
    }

    #[tokio::test(start_paused = true)]
    async fn remote_failure_settles_on_local_fallback() {
        let remote = ScriptedRemote::new(vec![("used car", Duration::from_millis(50), None)]);
        let handle = SearchOrchestrator::spawn(local_index(), remote, Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("used car");
        let settled = wait_for(&mut display, |s| !s.searching && !s.results.is_empty()).await;
        assert!(settled.fallback);
        assert!(!settled.no_results);
        assert_eq!(settled.results[0].source, ResultSource::Keyword);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_remote_answer_preserves_local_fallback() {
        let remote = ScriptedRemote::new(vec![(
            "used car",
            Duration::from_millis(50),
            Some(Vec::new()),
        )]);
        let handle = SearchOrchestrator::spawn(local_index(), remote, Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("used car");
        let settled = wait_for(&mut display, |s| !s.searching && !s.results.is_empty()).await;
        assert!(settled.fallback);
        assert!(!settled.no_results);
        assert_eq!(settled.results[0].document_id, "vehicle-bill-of-sale");
        assert_eq!(settled.results[0].source, ResultSource::Keyword);
    }

    #[tokio::test(start_paused = true)]
    async fn both_sources_empty_reports_no_results() {
        let remote = ScriptedRemote::new(vec![(
            "gibberishquery",
            Duration::from_millis(50),
            Some(Vec::new()),
        )]);
        let handle = SearchOrchestrator::spawn(local_index(), remote, Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("gibberishquery");
        let settled = wait_for(&mut display, |s| !s.searching && s.no_results).await;
        assert!(settled.results.is_empty());
        assert!(!settled.fallback);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_remote_completion_is_dropped() {
        let remote = ScriptedRemote::new(vec![
            (
                "used car",
                Duration::from_secs(2),
                Some(vec![semantic_result("stale-answer")]),
            ),
            (
                "lease",
                Duration::from_millis(10),
                Some(vec![semantic_result("lease-agreement")]),
            ),
        ]);
        let handle = SearchOrchestrator::spawn(local_index(), remote.clone(), Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("used car");
        // Wait until the slow query is dispatched and its remote is in flight.
        wait_for(&mut display, |s| s.fallback && !s.results.is_empty()).await;

        handle.submit("lease");
        let settled = wait_for(&mut display, |s| {
            !s.searching && s.results.first().map(|r| r.document_id.as_str()) == Some("lease-agreement")
        })
        .await;
        assert!(!settled.fallback);

        // Let the slow first query complete; its answer must not surface.
        tokio::time::advance(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        let current = display.borrow().clone();
        assert_eq!(current, settled);
        assert_eq!(remote.calls(), vec!["used car", "lease"]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_clears_display_immediately() {
        let remote = ScriptedRemote::new(vec![(
            "used car",
            Duration::from_millis(10),
            Some(vec![semantic_result("vehicle-bill-of-sale")]),
        )]);
        let handle = SearchOrchestrator::spawn(local_index(), remote, Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("used car");
        wait_for(&mut display, |s| !s.searching && !s.results.is_empty()).await;

        handle.submit("   ");
        let cleared = wait_for(&mut display, |s| s.results.is_empty() && !s.searching).await;
        assert_eq!(cleared, DisplayState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_during_debounce_cancels_the_dispatch() {
        let remote = ScriptedRemote::new(vec![(
            "used car",
            Duration::from_millis(10),
            Some(vec![semantic_result("vehicle-bill-of-sale")]),
        )]);
        let handle = SearchOrchestrator::spawn(local_index(), remote.clone(), Locale::En, QUIET);
        let mut display = handle.subscribe();

        handle.submit("used car");
        tokio::time::advance(Duration::from_millis(100)).await;
        handle.submit("");

        wait_for(&mut display, |s| *s == DisplayState::default()).await;
        // Let any stray timer fire; nothing may dispatch.
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(remote.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_session() {
        let remote = ScriptedRemote::new(vec![]);
        let handle = SearchOrchestrator::spawn(local_index(), remote.clone(), Locale::En, QUIET);

        handle.shutdown();
        tokio::task::yield_now().await;

        // Submissions after shutdown are ignored.
        handle.submit("used car");
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(remote.calls().is_empty());
    }
}
