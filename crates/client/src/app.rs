//! Line-oriented game loop.
//!
//! Reads commands from stdin, forwards them to the runtime and prints the
//! session as its events arrive.
use std::ops::ControlFlow;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use mathgame_core::IgnoreReason;
use mathgame_runtime::{GameEvent, Runtime, RuntimeConfig, RuntimeHandle};

use crate::input::{HELP, KeyAction, parse_line};
use crate::presentation::{render_event, render_snapshot, render_summary};

pub struct CliApp {
    runtime: Runtime,
    handle: RuntimeHandle,
    events: broadcast::Receiver<GameEvent>,
}

impl CliApp {
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        info!(
            level_up = config.game.required_correct_to_level_up,
            level_down = config.game.wrong_answers_to_level_down,
            auto_check = config.game.auto_check,
            seeded = config.seed.is_some(),
            "Starting session"
        );

        let runtime = Runtime::start(config).await?;
        let handle = runtime.handle();
        let events = handle.subscribe_events();

        Ok(Self {
            runtime,
            handle,
            events,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        println!("{HELP}\n");
        println!("{}", render_snapshot(&self.handle.snapshot().await?));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("stdin closed");
                        break;
                    };
                    match parse_line(&line) {
                        Ok(actions) => {
                            if self.dispatch(actions).await?.is_break() {
                                break;
                            }
                        }
                        Err(error) => println!("{error}"),
                    }
                }
                event = self.events.recv() => match event {
                    Ok(event) => self.render(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }

        self.finish().await
    }

    async fn dispatch(&self, actions: Vec<KeyAction>) -> Result<ControlFlow<()>> {
        for action in actions {
            let transition = match action {
                KeyAction::Digit(digit) => self.handle.digit(digit).await?,
                KeyAction::ToggleSign => self.handle.toggle_sign().await?,
                KeyAction::Delete => self.handle.delete().await?,
                KeyAction::Submit => self.handle.submit().await?,
                KeyAction::NextProblem => self.handle.next_problem().await?,
                KeyAction::Restart => self.handle.restart().await?,
                KeyAction::Help => {
                    println!("{HELP}");
                    continue;
                }
                KeyAction::Quit => return Ok(ControlFlow::Break(())),
            };

            if let Some(reason) = transition.ignored_reason() {
                debug!(?action, %reason, "Input ignored");
                if reason == IgnoreReason::CheckInProgress {
                    println!("Checking your answer...");
                    break;
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn render(&self, event: &GameEvent) {
        match event {
            // Only the latest snapshot in a burst is worth drawing
            GameEvent::SnapshotUpdated { snapshot } => {
                if self.events.is_empty() {
                    println!("{}", render_snapshot(snapshot));
                }
            }
            other => {
                if let Some(line) = render_event(other) {
                    println!("{line}");
                }
            }
        }
    }

    async fn finish(self) -> Result<()> {
        let snapshot = self.handle.snapshot().await?;
        let summary = serde_json::to_string(&snapshot)?;
        info!(summary = %summary, "Session finished");
        println!("{}", render_summary(&snapshot));

        self.runtime.shutdown().await?;
        Ok(())
    }
}
