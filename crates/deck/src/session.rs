use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use charla_transcript::count_words;

use crate::events::{DeckEvent, DeckRuntime, DeckStatus};
use crate::types::{DeckRevision, DeckState};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// The slide-authoring oracle. Given the full transcript so far and the deck
/// as it currently stands, it returns either a wholesale replacement deck or
/// the explicit no-change sentinel.
pub trait SlideOracle: Send + Sync {
    fn revise(
        &self,
        transcript: String,
        current: DeckState,
    ) -> BoxFuture<Result<DeckRevision, BoxError>>;
}

#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// Quiet period after the last transcript delta before an oracle call is
    /// considered.
    pub debounce: Duration,
    /// Minimum number of words appended since the last completed call for a
    /// debounce expiry to actually trigger one.
    pub min_new_words: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(2500),
            min_new_words: 6,
        }
    }
}

/// One live deck-building session.
///
/// The session owns the accumulated transcript and the current deck. Deltas
/// arrive on a channel; the session debounces them, gates on minimum new
/// words, and keeps at most one oracle call in flight. A debounce expiry that
/// lands while a call is in flight is dropped, not queued — the next delta
/// re-arms the timer.
pub struct DeckSession {
    session_id: String,
    config: DeckConfig,
    oracle: Arc<dyn SlideOracle>,
    runtime: Arc<dyn DeckRuntime>,

    transcript: String,
    deck: DeckState,
    status: DeckStatus,
    /// Word count of the transcript at the moment the last completed oracle
    /// call was dispatched.
    last_processed_words: usize,
}

impl DeckSession {
    pub fn new(
        session_id: impl Into<String>,
        config: DeckConfig,
        oracle: Arc<dyn SlideOracle>,
        runtime: Arc<dyn DeckRuntime>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            config,
            oracle,
            runtime,
            transcript: String::new(),
            deck: DeckState::default(),
            status: DeckStatus::Idle,
            last_processed_words: 0,
        }
    }

    /// Drives the session until the delta channel closes, then returns the
    /// final deck. An oracle call still in flight at close time is abandoned.
    pub async fn run(mut self, mut deltas: mpsc::Receiver<String>) -> DeckState {
        let mut deadline: Option<Instant> = None;
        let mut in_flight: Option<JoinHandle<(usize, Result<DeckRevision, BoxError>)>> = None;

        loop {
            tokio::select! {
                delta = deltas.recv() => match delta {
                    Some(delta) => {
                        if !self.transcript.is_empty()
                            && !delta.starts_with(char::is_whitespace)
                        {
                            self.transcript.push(' ');
                        }
                        self.transcript.push_str(&delta);
                        deadline = Some(Instant::now() + self.config.debounce);
                        self.set_status(DeckStatus::Listening);
                    }
                    None => break,
                },

                _ = sleep_until_opt(deadline), if deadline.is_some() => {
                    deadline = None;
                    self.on_debounce_expired(&mut in_flight);
                }

                outcome = join_opt(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.on_call_finished(outcome);
                }
            }
        }

        if let Some(handle) = in_flight {
            handle.abort();
        }
        self.set_status(DeckStatus::Done);
        self.deck
    }

    fn on_debounce_expired(
        &mut self,
        in_flight: &mut Option<JoinHandle<(usize, Result<DeckRevision, BoxError>)>>,
    ) {
        if in_flight.is_some() {
            tracing::debug!(session_id = %self.session_id, "oracle call in flight, dropping tick");
            return;
        }

        let words = count_words(&self.transcript);
        if words.saturating_sub(self.last_processed_words) < self.config.min_new_words {
            tracing::trace!(
                session_id = %self.session_id,
                words,
                last_processed = self.last_processed_words,
                "below new-word threshold, skipping"
            );
            self.set_status(DeckStatus::Idle);
            return;
        }

        self.set_status(DeckStatus::Updating);
        let fut = self
            .oracle
            .revise(self.transcript.clone(), self.deck.clone());
        *in_flight = Some(tokio::spawn(async move { (words, fut.await) }));
    }

    fn on_call_finished(&mut self, outcome: (usize, Result<DeckRevision, BoxError>)) {
        let (words_at_call, result) = outcome;
        match result {
            Ok(revision) => {
                // The no-change sentinel still counts as having processed the
                // words it saw; otherwise the same quiet stretch would
                // retrigger forever.
                self.last_processed_words = words_at_call;
                if let DeckRevision::Replace(deck) = revision {
                    self.deck = deck;
                    self.runtime.emit(DeckEvent::DeckUpdated {
                        session_id: self.session_id.clone(),
                        deck: self.deck.clone(),
                    });
                }
                self.set_status(DeckStatus::Done);
            }
            Err(err) => {
                tracing::warn!(session_id = %self.session_id, %err, "slide oracle call failed");
                self.runtime.emit(DeckEvent::Failed {
                    session_id: self.session_id.clone(),
                    error: err.to_string(),
                });
                self.set_status(DeckStatus::Idle);
            }
        }
    }

    fn set_status(&mut self, status: DeckStatus) {
        if self.status == status {
            return;
        }
        self.status = status;
        self.runtime.emit(DeckEvent::StatusChanged {
            session_id: self.session_id.clone(),
            status,
        });
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn join_opt(
    handle: &mut Option<JoinHandle<(usize, Result<DeckRevision, BoxError>)>>,
) -> (usize, Result<DeckRevision, BoxError>) {
    match handle {
        Some(handle) => match handle.await {
            Ok(outcome) => outcome,
            Err(join_err) => (0, Err(Box::new(join_err))),
        },
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::types::{Slide, SlideLayout};

    struct RecordingRuntime {
        events: Mutex<Vec<DeckEvent>>,
    }

    impl RecordingRuntime {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<DeckEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl DeckRuntime for RecordingRuntime {
        fn emit(&self, event: DeckEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    /// Records every transcript it is called with, waits `delay`, then
    /// replays canned revisions in order (repeating the last one).
    struct ScriptedOracle {
        calls: Mutex<Vec<String>>,
        script: Mutex<Vec<Result<DeckRevision, String>>>,
        delay: Duration,
    }

    impl ScriptedOracle {
        fn new(script: Vec<Result<DeckRevision, String>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                script: Mutex::new(script),
                delay: Duration::ZERO,
            })
        }

        fn slow(script: Vec<Result<DeckRevision, String>>, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                script: Mutex::new(script),
                delay,
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SlideOracle for ScriptedOracle {
        fn revise(
            &self,
            transcript: String,
            _current: DeckState,
        ) -> BoxFuture<Result<DeckRevision, BoxError>> {
            self.calls.lock().unwrap().push(transcript);
            let mut script = self.script.lock().unwrap();
            let next = if script.len() > 1 {
                script.remove(0)
            } else {
                script[0].clone()
            };
            let delay = self.delay;
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                next.map_err(|msg| msg.into())
            })
        }
    }

    fn deck_with(title: &str) -> DeckState {
        DeckState {
            deck_title: title.to_string(),
            slides: vec![Slide {
                id: "slide_1".to_string(),
                layout: SlideLayout::Title,
                title: title.to_string(),
                bullets: vec![],
                accent: "#6366f1".to_string(),
            }],
        }
    }

    fn session(oracle: Arc<dyn SlideOracle>, runtime: Arc<dyn DeckRuntime>) -> DeckSession {
        DeckSession::new("s1", DeckConfig::default(), oracle, runtime)
    }

    #[tokio::test(start_paused = true)]
    async fn bursts_coalesce_into_one_call() {
        let oracle = ScriptedOracle::new(vec![Ok(DeckRevision::Replace(deck_with("AI")))]);
        let runtime = RecordingRuntime::new();
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session(oracle.clone(), runtime.clone()).run(rx));

        tx.send("so today I want".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send("to talk about".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send("artificial intelligence".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        drop(tx);

        let deck = handle.await.unwrap();
        let calls = oracle.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            "so today I want to talk about artificial intelligence"
        );
        assert_eq!(deck.deck_title, "AI");
    }

    #[tokio::test(start_paused = true)]
    async fn below_word_threshold_never_calls() {
        let oracle = ScriptedOracle::new(vec![Ok(DeckRevision::NoChange)]);
        let runtime = RecordingRuntime::new();
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session(oracle.clone(), runtime.clone()).run(rx));

        tx.send("just three words".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        drop(tx);

        let deck = handle.await.unwrap();
        assert!(oracle.calls().is_empty());
        assert!(deck.slides.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn tick_during_in_flight_call_is_dropped() {
        let oracle = ScriptedOracle::slow(
            vec![Ok(DeckRevision::NoChange)],
            Duration::from_secs(10),
        );
        let runtime = RecordingRuntime::new();
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session(oracle.clone(), runtime.clone()).run(rx));

        // First burst dispatches a call at ~2.5s that runs until ~12.5s.
        tx.send("one two three four five six".to_string())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;

        // This burst's debounce expires at ~5.5s, mid-flight: dropped.
        tx.send("seven eight nine ten eleven twelve".to_string())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(oracle.calls().len(), 1);

        // A fresh delta after completion re-arms the timer and the seven
        // unprocessed words clear the threshold.
        tx.send("thirteen".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        drop(tx);
        handle.await.unwrap();

        let calls = oracle.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].ends_with("thirteen"));
    }

    #[tokio::test(start_paused = true)]
    async fn no_change_keeps_deck_and_advances_watermark() {
        let oracle = ScriptedOracle::new(vec![Ok(DeckRevision::NoChange)]);
        let runtime = RecordingRuntime::new();
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session(oracle.clone(), runtime.clone()).run(rx));

        tx.send("one two three four five six".to_string())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;

        // Fewer than six words since the processed watermark: no second call.
        tx.send("seven eight".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        drop(tx);

        let deck = handle.await.unwrap();
        assert_eq!(oracle.calls().len(), 1);
        assert!(deck.slides.is_empty());
        assert!(
            !runtime
                .events()
                .iter()
                .any(|e| matches!(e, DeckEvent::DeckUpdated { .. }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn oracle_error_emits_failure_and_goes_idle() {
        let oracle = ScriptedOracle::new(vec![Err("oracle unreachable".to_string())]);
        let runtime = RecordingRuntime::new();
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session(oracle.clone(), runtime.clone()).run(rx));

        tx.send("one two three four five six".to_string())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        drop(tx);
        handle.await.unwrap();

        let events = runtime.events();
        assert!(events.iter().any(|e| matches!(
            e,
            DeckEvent::Failed { error, .. } if error.contains("unreachable")
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            DeckEvent::StatusChanged { status: DeckStatus::Idle, .. }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn replacement_deck_is_emitted_and_returned() {
        let oracle = ScriptedOracle::new(vec![
            Ok(DeckRevision::Replace(deck_with("v1"))),
            Ok(DeckRevision::Replace(deck_with("v2"))),
        ]);
        let runtime = RecordingRuntime::new();
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(session(oracle.clone(), runtime.clone()).run(rx));

        tx.send("one two three four five six".to_string())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        tx.send("seven eight nine ten eleven twelve".to_string())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;
        drop(tx);

        let deck = handle.await.unwrap();
        assert_eq!(oracle.calls().len(), 2);
        assert_eq!(deck.deck_title, "v2");

        let updates: Vec<_> = runtime
            .events()
            .into_iter()
            .filter(|e| matches!(e, DeckEvent::DeckUpdated { .. }))
            .collect();
        assert_eq!(updates.len(), 2);
    }
}
