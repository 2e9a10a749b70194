//! Core types and service wiring for Affaldsafhentning, the household waste pickup calendar.

/// Image compositing for multi-category pictures.
pub mod compositor;
/// Holiday override parsing and lookup.
pub mod exceptions;
/// Waste category label to icon identifier mapping.
pub mod icons;
/// Domain models shared by the scheduler, the registry and callers.
pub mod model;
/// Asset loading seam and error types.
pub mod ports;
/// Week-aligned candidate dates and the recurrence predicate.
pub mod recurrence;
/// Explicit set of configured pickup sensors.
pub mod registry;
/// Next pickup computation.
pub mod scheduler;
/// High-level service facade used by callers.
pub mod service;

pub use compositor::*;
pub use exceptions::*;
pub use icons::*;
pub use model::*;
pub use ports::*;
pub use recurrence::*;
pub use registry::*;
pub use scheduler::*;
pub use service::*;
