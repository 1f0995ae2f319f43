//! Session worker that owns the authoritative [`mathgame_core::SessionState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies them
//! through [`GameSession`], runs scheduled continuations on tokio timers and
//! broadcasts [`GameEvent`]s.
use std::ops::ControlFlow;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, trace, warn};

use mathgame_core::{
    Applied, Continuation, DifficultyChange, GameSession, SessionEvent, SessionSnapshot,
    SessionState, Transition,
};

use crate::api::GameEvent;
use crate::rng::SessionRng;

/// Commands that can be sent to the session worker
pub enum Command {
    /// Apply a player event and reply with the resulting transition.
    Apply {
        event: SessionEvent,
        reply: oneshot::Sender<Transition>,
    },
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    QueryState {
        reply: oneshot::Sender<SessionState>,
    },
    /// Stop the worker, aborting pending continuations.
    Shutdown,
}

/// Background task that processes session commands.
///
/// The worker is the single writer of the session. Delays never block it:
/// each scheduled continuation sleeps in its own task inside `pending` and is
/// applied when it completes. The session drops continuations whose
/// generation is no longer live.
pub struct SessionWorker {
    session: GameSession<SessionRng>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GameEvent>,
    pending: JoinSet<Continuation>,
}

impl SessionWorker {
    pub fn new(
        session: GameSession<SessionRng>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<GameEvent>,
    ) -> Self {
        let state = session.state();
        info!(
            target: "mathgame::worker",
            tier = %state.difficulty.tier,
            problem = %state.problem.display_text(),
            "SessionWorker initialized"
        );

        Self {
            session,
            command_rx,
            event_tx,
            pending: JoinSet::new(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd).is_break() {
                            break;
                        }
                    }
                    None => break,
                },
                Some(joined) = self.pending.join_next(), if !self.pending.is_empty() => {
                    self.handle_continuation(joined);
                }
            }
        }

        if !self.pending.is_empty() {
            debug!(
                target: "mathgame::worker",
                pending = self.pending.len(),
                "Aborting pending continuations"
            );
        }
        self.pending.shutdown().await;

        let state = self.session.state();
        info!(
            target: "mathgame::worker",
            score = state.score,
            answered = state.total_answered,
            correct = state.total_correct,
            "SessionWorker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) -> ControlFlow<()> {
        match cmd {
            Command::Apply { event, reply } => {
                let transition = self.apply(event);
                if reply.send(transition).is_err() {
                    debug!("Apply reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.session.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.session.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn handle_continuation(&mut self, joined: Result<Continuation, JoinError>) {
        match joined {
            Ok(continuation) => {
                self.apply(SessionEvent::Resume(continuation));
            }
            Err(error) if error.is_cancelled() => {
                trace!(target: "mathgame::worker", "Continuation cancelled");
            }
            Err(error) => {
                warn!(target: "mathgame::worker", error = %error, "Continuation task failed");
            }
        }
    }

    fn apply(&mut self, event: SessionEvent) -> Transition {
        if event == SessionEvent::Restart && !self.pending.is_empty() {
            debug!(
                target: "mathgame::worker",
                pending = self.pending.len(),
                "Restart aborts pending continuations"
            );
            self.pending.abort_all();
        }

        let transition = self.session.apply(event);
        match transition {
            Transition::Ignored(reason) => {
                debug!(
                    target: "mathgame::worker",
                    event = ?event,
                    reason = %reason,
                    "Event ignored"
                );
            }
            Transition::Applied(applied) => self.publish_applied(applied),
        }
        transition
    }

    /// Schedules follow-up work and publishes the events of an applied transition.
    fn publish_applied(&mut self, applied: Applied) {
        if let Some(continuation) = applied.schedule {
            self.schedule(continuation);
        }

        if let Some(check) = applied.checked {
            info!(
                target: "mathgame::worker",
                correct = check.correct,
                given = check.given,
                expected = check.expected,
                points = check.points,
                "Answer checked"
            );
            self.publish(GameEvent::AnswerChecked { check });

            if let DifficultyChange::Advanced { from, to }
            | DifficultyChange::Retreated { from, to } = check.change
            {
                info!(target: "mathgame::worker", %from, %to, "Tier changed");
                self.publish(GameEvent::TierChanged { from, to });
            }
        }

        if let Some(presented) = applied.presented {
            debug!(
                target: "mathgame::worker",
                problem = %presented.problem.display_text(),
                forced_easy = presented.forced_easy,
                "Problem presented"
            );
            self.publish(GameEvent::ProblemPresented {
                problem: presented.problem,
                forced_easy: presented.forced_easy,
            });
        }

        self.publish(GameEvent::SnapshotUpdated {
            snapshot: self.session.snapshot(),
        });
    }

    fn schedule(&mut self, continuation: Continuation) {
        debug!(
            target: "mathgame::worker",
            kind = %continuation.kind,
            generation = continuation.generation,
            delay_ms = continuation.delay.as_millis() as u64,
            "Scheduling continuation"
        );
        self.pending.spawn(async move {
            tokio::time::sleep(continuation.delay).await;
            continuation
        });
    }

    fn publish(&self, event: GameEvent) {
        let name = event.name();
        if self.event_tx.send(event).is_err() {
            // No subscribers is normal, not an error
            trace!(target: "mathgame::worker", event = name, "No subscribers for event");
        }
    }
}
