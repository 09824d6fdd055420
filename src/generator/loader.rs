//! Background level requests with a bounded wait.
//!
//! The generator call runs on a small tokio runtime, never on the tick path.
//! Each request owns a write-once slot (a oneshot channel) that always ends
//! up holding a descriptor: the generated one, or the offline level on any
//! error, panic or timeout.

use super::{LevelGenerator, LevelRequest};
use crate::models::level::{GameMode, LevelDescriptor};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

pub struct LevelLoader {
    runtime: Option<Runtime>,
    generator: Arc<dyn LevelGenerator>,
    timeout: Duration,
}

impl LevelLoader {
    pub fn new(generator: Arc<dyn LevelGenerator>, timeout: Duration) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("Generator Thread")
            .enable_time()
            .build()?;

        Ok(Self {
            runtime: Some(runtime),
            generator,
            timeout,
        })
    }

    /// Starts a request and returns immediately.
    pub fn request(&self, request: LevelRequest) -> PendingLevel {
        let (tx, rx) = oneshot::channel();
        let mode = request.mode;

        let Some(runtime) = &self.runtime else {
            // Dropping `tx` makes the pending level resolve to the fallback.
            return PendingLevel { rx, mode };
        };

        let generator = Arc::clone(&self.generator);
        let limit = self.timeout;

        runtime.spawn(async move {
            let job = tokio::task::spawn_blocking(move || generator.generate(&request));

            let level = match tokio::time::timeout(limit, job).await {
                Ok(Ok(Ok(level))) => level,
                Ok(Ok(Err(e))) => {
                    log::warn!("GEN: Generation failed, using offline level: {}", e);
                    LevelDescriptor::fallback(mode)
                }
                Ok(Err(e)) => {
                    log::error!("GEN: Generator task failed: {}", e);
                    LevelDescriptor::fallback(mode)
                }
                Err(_) => {
                    log::warn!("GEN: Generation exceeded {:?}, using offline level", limit);
                    LevelDescriptor::fallback(mode)
                }
            };

            if tx.send(level).is_err() {
                log::debug!("GEN: Level arrived after the request was abandoned");
            }
        });

        PendingLevel { rx, mode }
    }
}

impl Drop for LevelLoader {
    fn drop(&mut self) {
        // A generator call may still be blocked on the network; don't wait for it.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Handle to a level that is being generated.
#[derive(Debug)]
pub struct PendingLevel {
    rx: oneshot::Receiver<LevelDescriptor>,
    mode: GameMode,
}

impl PendingLevel {
    /// Non-blocking check. `Some` once the level (or its fallback) is ready.
    pub fn poll(&mut self) -> Option<LevelDescriptor> {
        match self.rx.try_recv() {
            Ok(level) => Some(level),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(LevelDescriptor::fallback(self.mode)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GenerationError, OfflineGenerator};
    use std::time::Instant;

    struct Slow(Duration);

    impl LevelGenerator for Slow {
        fn generate(&self, request: &LevelRequest) -> Result<LevelDescriptor, GenerationError> {
            std::thread::sleep(self.0);
            let mut level = LevelDescriptor::fallback(request.mode);
            level.name = "Slow World".to_string();
            level.tempo_bpm = 90;
            Ok(level)
        }
    }

    struct Broken;

    impl LevelGenerator for Broken {
        fn generate(&self, _request: &LevelRequest) -> Result<LevelDescriptor, GenerationError> {
            Err(GenerationError::Malformed("garbage".to_string()))
        }
    }

    fn request(mode: GameMode) -> LevelRequest {
        LevelRequest {
            theme: "storm".to_string(),
            mode,
            model: "mistral".to_string(),
        }
    }

    fn wait(pending: &mut PendingLevel) -> LevelDescriptor {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(level) = pending.poll() {
                return level;
            }
            assert!(Instant::now() < deadline, "level never arrived");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn delivers_generated_level() {
        let loader =
            LevelLoader::new(Arc::new(Slow(Duration::from_millis(20))), Duration::from_secs(2))
                .unwrap();
        let level = wait(&mut loader.request(request(GameMode::Lanes4)));
        assert_eq!(level.name, "Slow World");
        assert_eq!(level.tempo_bpm, 90);
    }

    #[test]
    fn timeout_yields_fallback() {
        let loader =
            LevelLoader::new(Arc::new(Slow(Duration::from_secs(3))), Duration::from_millis(50))
                .unwrap();
        let started = Instant::now();
        let level = wait(&mut loader.request(request(GameMode::FreePlace)));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(level, LevelDescriptor::fallback(GameMode::FreePlace));
    }

    #[test]
    fn errors_yield_fallback() {
        let loader = LevelLoader::new(Arc::new(Broken), Duration::from_secs(1)).unwrap();
        let level = wait(&mut loader.request(request(GameMode::Lanes2)));
        assert_eq!(level, LevelDescriptor::fallback(GameMode::Lanes2));
    }

    #[test]
    fn first_poll_may_be_pending() {
        let loader =
            LevelLoader::new(Arc::new(Slow(Duration::from_millis(200))), Duration::from_secs(2))
                .unwrap();
        let mut pending = loader.request(request(GameMode::Lanes2));
        assert!(pending.poll().is_none());
        let _ = wait(&mut pending);
    }

    #[test]
    fn offline_generator_is_immediate() {
        let loader = LevelLoader::new(Arc::new(OfflineGenerator), Duration::from_secs(1)).unwrap();
        let level = wait(&mut loader.request(request(GameMode::Lanes4)));
        assert_eq!(level.tempo_bpm, 120);
    }
}
