//! # Ringtime Core Library
//!
//! Scheduling core for a 24-hour circular timeline (the "ring") on which
//! time-boxed tasks are placed, resized and moved with drag gestures.
//!
//! ## Architecture
//!
//! - **Ring**: pure angle <-> time conversion and day-bound constraints
//! - **Overlap**: tolerance-aware overlap checks, free-slot search and
//!   local conflict resolution
//! - **Drag**: gesture state machines for edge drags and whole-arc drags,
//!   wired to the host through injected [`TaskRepository`] and
//!   [`FeedbackSink`] implementations
//! - **Config**: TOML-backed zero position and scheduling rules
//!
//! Everything is synchronous and single-threaded: each gesture callback
//! computes a complete candidate task before anything is published.
//!
//! ## Key Components
//!
//! - [`RingGestureController`]: entry point for UI drag callbacks
//! - [`OverlapResolver`]: overlap detection and conflict resolution
//! - [`RingConfig`]: zero position and selected date
//! - [`Config`]: persisted configuration

pub mod config;
pub mod drag;
pub mod error;
pub mod overlap;
pub mod ring;
pub mod store;
pub mod task;

pub use config::Config;
pub use drag::{
    CommitOutcome, DragKind, DragOutcome, DragSession, DragUpdate, EdgeDragController,
    EdgeDragState, FeedbackKind, FeedbackSink, Handle, RejectReason, RingGestureController,
    TaskRepository, TracingFeedback, WholeArcDragController, WholeArcState,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use overlap::{overlaps, NeighborAdjustment, OverlapResolver, Relocation};
pub use ring::{Point, RingConfig, RingContext, RingRules};
pub use store::InMemoryTaskStore;
pub use task::{ArcPhase, Boundary, Task, TaskId, TimeRange};
