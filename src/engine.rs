//! Turn-Taking State Machine
//!
//! The controller that sequences listening → thinking → speaking →
//! listening. It owns mute/unmute of the speech source, serializes reply
//! generation so at most one reply is ever in flight, and is the sole
//! writer of the conversation log.
//!
//! All transitions happen on one task consuming a typed event channel.
//! The oracle call and the sink call run in spawned tasks that post their
//! completion back onto the same channel, so event handling stays serial
//! and the mutual-exclusion check on entering `AwaitingReply` is enough to
//! rule out overlapping oracle invocations.

use crate::asr::{SpeechSource, Utterance, MIN_CONFIDENCE};
use crate::config::Config;
use crate::core::completion::CompletionConfig;
use crate::core::echo::{EchoConfig, EchoFilter};
use crate::core::normalizer;
use crate::error::VivaResult;
use crate::oracle::{fallback_reply, ReplyOracle};
use crate::scoring::{self, ScoreSnapshot};
use crate::session::{EmotionSample, SessionContext, SessionState};
use crate::tts::SpeechSink;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Machine states for one interview session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Capturing candidate speech
    Listening,
    /// Reply oracle call in flight
    AwaitingReply,
    /// Agent speech synthesis in flight
    Speaking,
    /// Post-speech grace period before transcription resumes
    MuteCooldown,
    /// Interview closed by external signal
    Ended,
}

/// Events driving the state machine
#[derive(Debug)]
pub enum SessionEvent {
    /// A recognized utterance from the speech source
    Heard(Utterance),
    /// An emotion sample from the emotion source
    Felt(EmotionSample),
    /// A completion timer fired; stale generations are ignored
    CompletionFired { generation: u64 },
    /// The reply oracle produced text (fallback already substituted)
    ReplyReady { text: String },
    /// The speech sink finished playback, successfully or not
    SpeechFinished,
    /// The mute cooldown elapsed; stale generations are ignored
    CooldownElapsed { generation: u64 },
    /// External stop signal
    Stop,
}

/// Shared view of the session buffers, readable while the engine runs
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Handle for feeding events into a running engine and reading scores
#[derive(Clone)]
pub struct SessionHandle {
    events: UnboundedSender<SessionEvent>,
    session: SharedSession,
}

impl SessionHandle {
    pub fn push_utterance(&self, utterance: Utterance) {
        let _ = self.events.send(SessionEvent::Heard(utterance));
    }

    pub fn push_emotion(&self, sample: EmotionSample) {
        let _ = self.events.send(SessionEvent::Felt(sample));
    }

    pub fn stop(&self) {
        let _ = self.events.send(SessionEvent::Stop);
    }

    /// Compute a score snapshot from the current buffers
    pub fn snapshot(&self) -> VivaResult<ScoreSnapshot> {
        let session = self.session.lock()?;
        Ok(scoring::compute(&session))
    }

    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }
}

pub struct InterviewEngine {
    state: EngineState,
    session: SharedSession,
    context: SessionContext,

    /// Accumulated accepted speech since the last agent reply
    pending_text: String,
    echo: EchoFilter,
    completion: CompletionConfig,
    mute_cooldown: Duration,

    completion_generation: u64,
    completion_timer: Option<JoinHandle<()>>,
    cooldown_generation: u64,

    events: UnboundedSender<SessionEvent>,
    source: Arc<dyn SpeechSource>,
    sink: Arc<dyn SpeechSink>,
    oracle: Arc<dyn ReplyOracle>,
}

impl InterviewEngine {
    /// Build an engine plus the channel endpoints it runs on
    pub fn new(
        config: &Config,
        source: Arc<dyn SpeechSource>,
        sink: Arc<dyn SpeechSink>,
        oracle: Arc<dyn ReplyOracle>,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            state: EngineState::Listening,
            session: Arc::new(Mutex::new(SessionState::new())),
            context: SessionContext {
                role: config.role.clone(),
                candidate_name: config.candidate_name.clone(),
            },
            pending_text: String::new(),
            echo: EchoFilter::new(EchoConfig::from_config(config)),
            completion: CompletionConfig::from_config(config),
            mute_cooldown: Duration::from_millis(config.mute_cooldown_ms),
            completion_generation: 0,
            completion_timer: None,
            cooldown_generation: 0,
            events,
            source,
            sink,
            oracle,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            events: self.events.clone(),
            session: self.session.clone(),
        }
    }

    /// Consume events until the session ends
    pub async fn run(mut self, mut rx: UnboundedReceiver<SessionEvent>) {
        if let Err(e) = self.source.start().await {
            warn!("Speech source failed to start: {}", e);
        }
        info!("🎤 Interview started ({})", self.context.role);

        while let Some(event) = rx.recv().await {
            if !self.handle_event(event).await {
                break;
            }
        }
        info!("🏁 Interview ended");
    }

    /// Apply one event to the machine. Returns false once the session ends.
    ///
    /// Public so tests can drive the machine without real timers.
    pub async fn handle_event(&mut self, event: SessionEvent) -> bool {
        if self.state == EngineState::Ended {
            return false;
        }

        match event {
            SessionEvent::Heard(utterance) => self.on_heard(utterance),
            SessionEvent::Felt(sample) => self.on_felt(sample),
            SessionEvent::CompletionFired { generation } => self.on_completion(generation),
            SessionEvent::ReplyReady { text } => self.on_reply(text).await,
            SessionEvent::SpeechFinished => self.on_speech_finished(),
            SessionEvent::CooldownElapsed { generation } => self.on_cooldown(generation).await,
            SessionEvent::Stop => {
                self.shutdown().await;
                return false;
            }
        }
        true
    }

    fn on_heard(&mut self, utterance: Utterance) {
        if !utterance.is_final || utterance.confidence < MIN_CONFIDENCE {
            return;
        }
        let normalized = normalizer::normalize(&utterance.text);
        if normalized.is_empty() {
            return;
        }
        if self.echo.check(&normalized, Instant::now()).is_err() {
            // Echo and duplicates are recognition noise, already logged
            return;
        }

        info!("📝 Heard: '{}'", normalized);
        if let Ok(mut session) = self.session.lock() {
            session.push_human(normalized.clone());
        }
        if !self.pending_text.is_empty() {
            self.pending_text.push(' ');
        }
        self.pending_text.push_str(&normalized);

        // Only schedule while listening; speech during a reply or agent
        // playback is buffered as later turns.
        if self.state == EngineState::Listening {
            self.schedule_completion();
        }
    }

    fn on_felt(&mut self, sample: EmotionSample) {
        if let Ok(mut session) = self.session.lock() {
            session.push_emotion(sample);
        }
    }

    /// Debounced completion scheduling: every accepted utterance cancels
    /// the previous timer and starts a fresh one.
    fn schedule_completion(&mut self) {
        let completion = match self.completion.classify(&self.pending_text) {
            Some(c) => c,
            None => return, // below the floor, wait for more speech
        };
        let delay = self.completion.delay(completion);

        if let Some(timer) = self.completion_timer.take() {
            timer.abort();
        }
        self.completion_generation += 1;
        let generation = self.completion_generation;
        let events = self.events.clone();

        debug!("⏲️ Completion {:?}, replying in {:?}", completion, delay);
        self.completion_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::CompletionFired { generation });
        }));
    }

    fn on_completion(&mut self, generation: u64) {
        // Mutual exclusion: ignore stale timers and any trigger while a
        // reply is already in flight.
        if self.state != EngineState::Listening || generation != self.completion_generation {
            debug!("Ignoring completion trigger in state {:?}", self.state);
            return;
        }

        let question = std::mem::take(&mut self.pending_text);
        self.state = EngineState::AwaitingReply;

        let (history, agent_turns) = match self.session.lock() {
            Ok(session) => (session.turns().to_vec(), session.agent_turn_count()),
            Err(_) => (Vec::new(), 0),
        };
        let oracle = self.oracle.clone();
        let context = self.context.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let text = match oracle.generate_reply(&question, &history, &context).await {
                Ok(reply) => reply,
                Err(e) => {
                    // Recovered locally; the human never sees an error
                    warn!("Reply oracle failed, using fallback: {}", e);
                    fallback_reply(agent_turns).to_string()
                }
            };
            let _ = events.send(SessionEvent::ReplyReady { text });
        });
    }

    async fn on_reply(&mut self, text: String) {
        if self.state != EngineState::AwaitingReply {
            debug!("Dropping reply delivered in state {:?}", self.state);
            return;
        }

        if let Ok(mut session) = self.session.lock() {
            session.push_agent(text.clone());
        }
        self.echo.agent_started(&text);
        self.state = EngineState::Speaking;

        // The engine is the only authorized mutator of the microphone
        if let Err(e) = self.source.stop().await {
            warn!("Speech source failed to stop: {}", e);
        }

        let sink = self.sink.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            if let Err(e) = sink.speak(&text).await {
                // Synthesis failure is treated as normal completion
                warn!("Speech sink error, forcing completion: {}", e);
            }
            let _ = events.send(SessionEvent::SpeechFinished);
        });
    }

    fn on_speech_finished(&mut self) {
        if self.state != EngineState::Speaking {
            return;
        }
        self.echo.agent_finished();
        self.state = EngineState::MuteCooldown;

        self.cooldown_generation += 1;
        let generation = self.cooldown_generation;
        let delay = self.mute_cooldown;
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::CooldownElapsed { generation });
        });
    }

    async fn on_cooldown(&mut self, generation: u64) {
        if self.state != EngineState::MuteCooldown || generation != self.cooldown_generation {
            return;
        }
        self.state = EngineState::Listening;
        if let Err(e) = self.source.start().await {
            warn!("Speech source failed to resume: {}", e);
        }

        // Speech that arrived while the agent was thinking or talking
        // becomes the seed of the next turn.
        if !self.pending_text.is_empty() {
            self.schedule_completion();
        }
    }

    async fn shutdown(&mut self) {
        self.state = EngineState::Ended;
        if let Some(timer) = self.completion_timer.take() {
            timer.abort();
        }
        // Bumping the generations invalidates any still-sleeping timer task
        self.completion_generation += 1;
        self.cooldown_generation += 1;

        if let Err(e) = self.source.stop().await {
            warn!("Speech source failed to stop on shutdown: {}", e);
        }
        self.sink.cancel_all().await;
    }
}
