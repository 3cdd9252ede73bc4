//! Background search thread.
//!
//! The worker owns a private copy of the position and the engine for the
//! duration of one search, then hands both the engine and its answer back
//! over a channel. The interactive side never shares mutable state with it.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::trace;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{SearchError, SessionError, SessionResult};
use crate::game_state::chess_types::*;

pub struct WorkerReply {
    pub engine: Box<dyn Engine>,
    pub result: Result<EngineOutput, SearchError>,
}

pub struct SearchWorker {
    handle: Option<JoinHandle<()>>,
    receiver: Receiver<WorkerReply>,
    ready: Option<WorkerReply>,
    finished: bool,
}

impl SearchWorker {
    pub fn spawn(game_state: GameState, mut engine: Box<dyn Engine>) -> SessionResult<Self> {
        let (sender, receiver) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("search-worker".to_owned())
            .spawn(move || {
                trace!(engine = engine.name(), side = %game_state.side_to_move(), "search started");
                let result = engine.choose_move(&game_state);
                trace!(ok = result.is_ok(), "search finished");
                if sender.send(WorkerReply { engine, result }).is_err() {
                    trace!("session dropped before the result arrived");
                }
            })
            .map_err(SessionError::WorkerSpawn)?;

        Ok(Self {
            handle: Some(handle),
            receiver,
            ready: None,
            finished: false,
        })
    }

    /// Non-blocking. True once a reply arrived or the thread hung up.
    pub fn is_done(&mut self) -> bool {
        if self.ready.is_some() || self.finished {
            return true;
        }
        match self.receiver.try_recv() {
            Ok(reply) => {
                self.ready = Some(reply);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                true
            }
        }
    }

    /// `None` while the search is still running.
    pub fn try_result(&mut self) -> Option<SessionResult<WorkerReply>> {
        if !self.is_done() {
            return None;
        }
        Some(self.finish())
    }

    /// Blocks until the search ends.
    pub fn wait(mut self) -> SessionResult<WorkerReply> {
        if self.ready.is_none() {
            if let Ok(reply) = self.receiver.recv() {
                self.ready = Some(reply);
            }
        }
        self.finish()
    }

    fn finish(&mut self) -> SessionResult<WorkerReply> {
        self.finished = true;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                return Err(SessionError::WorkerPanicked);
            }
        }
        self.ready.take().ok_or(SessionError::WorkerDisconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::search::alpha_beta::SearchConfig;

    struct PanickingEngine;

    impl Engine for PanickingEngine {
        fn name(&self) -> &str {
            "panics"
        }

        fn choose_move(&mut self, _game_state: &GameState) -> Result<EngineOutput, SearchError> {
            panic!("engine blew up");
        }
    }

    #[test]
    fn worker_returns_engine_and_move() {
        let engine = Box::new(MinimaxEngine::new(SearchConfig { depth: 1 }));
        let worker = SearchWorker::spawn(GameState::new_game(), engine).expect("spawn");
        let reply = worker.wait().expect("search completes");
        assert_eq!(reply.engine.name(), "minimax");
        assert!(reply.result.is_ok());
    }

    #[test]
    fn polling_eventually_yields_a_result() {
        let engine = Box::new(MinimaxEngine::new(SearchConfig { depth: 1 }));
        let mut worker = SearchWorker::spawn(GameState::new_game(), engine).expect("spawn");
        let reply = loop {
            if let Some(reply) = worker.try_result() {
                break reply;
            }
            thread::yield_now();
        };
        assert!(reply.expect("search completes").result.is_ok());
    }

    #[test]
    fn panic_is_reported() {
        let worker = SearchWorker::spawn(GameState::new_game(), Box::new(PanickingEngine)).expect("spawn");
        assert!(matches!(worker.wait(), Err(SessionError::WorkerPanicked)));
    }
}
