//! Launches async work and routes failures to a single error handler, so
//! command code can just use `?`.

use std::{future::Future, sync::Arc};

use tokio::task::JoinSet;

use crate::error::AppError;

pub trait ErrorHandler: Send + Sync + 'static {
    fn handle_error(&self, error: &AppError);
}

/// Default handler: log and move on.
#[derive(Debug, Default)]
pub struct LogErrors;

impl ErrorHandler for LogErrors {
    fn handle_error(&self, error: &AppError) {
        tracing::error!("{error}");
    }
}

pub struct TaskScope<H: ErrorHandler> {
    tasks: JoinSet<bool>,
    handler: Arc<H>,
}

impl<H: ErrorHandler> TaskScope<H> {
    pub fn new(handler: H) -> Self {
        Self {
            tasks: JoinSet::new(),
            handler: Arc::new(handler),
        }
    }

    /// Spawn `work`; an `Err` is passed to the handler instead of being
    /// returned.
    pub fn launch<F>(&mut self, work: F)
    where
        F: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        let handler = Arc::clone(&self.handler);
        self.tasks.spawn(async move {
            match work.await {
                Ok(()) => true,
                Err(err) => {
                    handler.handle_error(&err);
                    false
                }
            }
        });
    }

    /// Wait for every launched task. Returns `true` when all of them
    /// succeeded.
    pub async fn join(mut self) -> bool {
        let mut all_ok = true;
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(ok) => all_ok &= ok,
                Err(err) => {
                    tracing::error!("task aborted: {err}");
                    all_ok = false;
                }
            }
        }
        all_ok
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl ErrorHandler for Arc<Collect> {
        fn handle_error(&self, error: &AppError) {
            self.0.lock().unwrap().push(error.to_string());
        }
    }

    async fn explode() -> Result<(), AppError> {
        panic!("boom")
    }

    #[tokio::test]
    async fn successful_work_reports_ok() {
        let mut scope = TaskScope::new(LogErrors);
        scope.launch(async { Ok(()) });
        scope.launch(async { Ok(()) });
        assert!(scope.join().await);
    }

    #[tokio::test]
    async fn failures_reach_the_handler() {
        let collected = Arc::new(Collect::default());
        let mut scope = TaskScope::new(Arc::clone(&collected));
        scope.launch(async { Ok(()) });
        scope.launch(async { Err(AppError::InvalidTimezone("Mars/Olympus".to_string())) });

        assert!(!scope.join().await);
        assert_eq!(
            *collected.0.lock().unwrap(),
            vec!["unknown time zone: Mars/Olympus".to_string()]
        );
    }

    #[tokio::test]
    async fn panics_count_as_failures() {
        let mut scope = TaskScope::new(LogErrors);
        scope.launch(explode());
        assert!(!scope.join().await);
    }
}
