// Adapters layer: concrete implementations for external systems (remote model, storage, timers).

pub mod gemini;
pub mod sleeper;
pub mod storage;
