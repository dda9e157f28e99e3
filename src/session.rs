//! Planner Session
//!
//! Async front of the [`Planner`]. One task owns the planner; actions come in
//! over an mpsc channel, every fetch cycle runs as its own spawned task, and
//! a fresh [`PlannerSnapshot`] is published on a watch channel after each
//! state change. When a gating change supersedes a running cycle, that
//! cycle's task is aborted.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::DisplayModel;
use crate::orchestrator::FetchOrchestrator;
use crate::planner::{Action, FetchTicket, Planner, PlannerSnapshot};
use crate::{Result, TravelPlannerError};

const COMMAND_BUFFER: usize = 32;

struct Command {
    action: Action,
    reply: oneshot::Sender<Result<Option<u64>>>,
}

type Completion = (FetchTicket, Result<DisplayModel>);

pub struct PlannerSession {
    planner: Planner,
    orchestrator: FetchOrchestrator,
    commands: mpsc::Receiver<Command>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    snapshots: watch::Sender<PlannerSnapshot>,
    in_flight: Option<(u64, JoinHandle<()>)>,
}

/// Client side of a running session
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<PlannerSnapshot>,
    task: JoinHandle<Planner>,
}

impl PlannerSession {
    /// Move `planner` onto its own task and return a handle to it
    pub fn spawn(planner: Planner, orchestrator: FetchOrchestrator) -> SessionHandle {
        let (command_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (completion_tx, completions) = mpsc::unbounded_channel();
        let (snapshots, snapshot_rx) = watch::channel(planner.snapshot());

        let session = Self {
            planner,
            orchestrator,
            commands,
            completions,
            completion_tx,
            snapshots,
            in_flight: None,
        };

        SessionHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            task: tokio::spawn(session.run()),
        }
    }

    async fn run(mut self) -> Planner {
        debug!("Planner session started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command { action, reply }) => {
                        let outcome = self.apply(action);
                        // the caller may have given up waiting
                        let _ = reply.send(outcome);
                    }
                    None => break,
                },
                Some((ticket, outcome)) = self.completions.recv() => {
                    if self.planner.complete(&ticket, outcome) {
                        self.in_flight = None;
                        self.publish();
                    }
                }
            }
        }

        if let Some((generation, task)) = self.in_flight.take() {
            debug!("Aborting fetch cycle {} on shutdown", generation);
            task.abort();
        }
        debug!("Planner session stopped");
        self.planner
    }

    fn apply(&mut self, action: Action) -> Result<Option<u64>> {
        let ticket = self.planner.dispatch(action)?;

        if let Some((generation, task)) = &self.in_flight {
            if *generation != self.planner.generation() {
                debug!("Fetch cycle {} superseded, aborting", generation);
                task.abort();
                self.in_flight = None;
            }
        }

        let started = ticket.map(|ticket| {
            let generation = ticket.generation();
            self.start(ticket);
            generation
        });

        self.publish();
        Ok(started)
    }

    fn start(&mut self, ticket: FetchTicket) {
        let generation = ticket.generation();
        let orchestrator = self.orchestrator.clone();
        let completions = self.completion_tx.clone();

        let task = tokio::spawn(async move {
            let outcome = orchestrator.execute(ticket.request()).await;
            if completions.send((ticket, outcome)).is_err() {
                warn!("Planner session gone before fetch cycle finished");
            }
        });

        info!("Fetch cycle {} spawned", generation);
        self.in_flight = Some((generation, task));
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.planner.snapshot());
    }
}

impl SessionHandle {
    /// Apply an action; returns the generation of the cycle it started, if any
    pub async fn dispatch(&self, action: Action) -> Result<Option<u64>> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command { action, reply })
            .await
            .map_err(|_| TravelPlannerError::session("command channel closed"))?;
        response
            .await
            .map_err(|_| TravelPlannerError::session("no reply to action"))?
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> PlannerSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlannerSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until no fetch cycle is loading
    pub async fn settled(&self) -> Result<PlannerSnapshot> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|snapshot| !snapshot.status.is_loading())
            .await
            .map_err(|_| TravelPlannerError::session("snapshot channel closed"))?;
        Ok(snapshot.clone())
    }

    /// Stop the session and take the planner back
    pub async fn shutdown(self) -> Result<Planner> {
        drop(self.commands);
        self.task
            .await
            .map_err(|e| TravelPlannerError::session(format!("session task failed: {e}")))
    }
}
