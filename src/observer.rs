//! Pipeline observability
//!
//! The analyzer never touches global logging state. It reports progress to a
//! [`PipelineObserver`] handed to it by the caller; the binary plugs in
//! [`TracingObserver`], tests use [`RecordingObserver`].

use std::cell::RefCell;
use std::path::PathBuf;

/// Something that happened during a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    PipelineStarted,
    ReadingInput { path: PathBuf },
    ValidationPassed { records: usize, drivers: usize },
    TransformStarted,
    TransformComplete { top_driver: String, average_time: f64 },
    TopNRetrieved { requested: usize, returned: usize },
    OutputWritten { path: PathBuf },
    PipelineCompleted,
    PipelineFailed { message: String },
}

/// Receives pipeline events
pub trait PipelineObserver {
    fn on_event(&self, event: &PipelineEvent);
}

impl<T: PipelineObserver + ?Sized> PipelineObserver for &T {
    fn on_event(&self, event: &PipelineEvent) {
        (**self).on_event(event);
    }
}

impl<T: PipelineObserver + ?Sized> PipelineObserver for Box<T> {
    fn on_event(&self, event: &PipelineEvent) {
        (**self).on_event(event);
    }
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        match event {
            PipelineEvent::PipelineStarted => {
                tracing::info!("Starting lap times pipeline");
            }
            PipelineEvent::ReadingInput { path } => {
                tracing::info!(path = %path.display(), "Reading data");
            }
            PipelineEvent::ValidationPassed { records, drivers } => {
                tracing::info!(
                    records,
                    drivers,
                    "Data validation passed: {} records, {} unique drivers",
                    records,
                    drivers
                );
            }
            PipelineEvent::TransformStarted => {
                tracing::info!("Calculating average lap times per driver");
            }
            PipelineEvent::TransformComplete {
                top_driver,
                average_time,
            } => {
                tracing::info!(
                    "Transformation complete. Top driver: {} with average time {}",
                    top_driver,
                    average_time
                );
            }
            PipelineEvent::TopNRetrieved {
                requested,
                returned,
            } => {
                tracing::debug!(requested, returned, "Top {} drivers retrieved", requested);
            }
            PipelineEvent::OutputWritten { path } => {
                tracing::info!("Results saved to {}", path.display());
            }
            PipelineEvent::PipelineCompleted => {
                tracing::info!("Pipeline completed successfully");
            }
            PipelineEvent::PipelineFailed { message } => {
                tracing::error!("Pipeline failed: {}", message);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {
    fn on_event(&self, _event: &PipelineEvent) {}
}

/// Keeps every event in memory, in order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<PipelineEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.borrow().clone()
    }

    pub fn contains(&self, event: &PipelineEvent) -> bool {
        self.events.borrow().iter().any(|e| e == event)
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_event(&self, event: &PipelineEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
