use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// The taxonomy is narrow by design: configuration is validated once at
/// construction and never mid-simulation, so everything after
/// `Simulation::new` is infallible. Capacity exhaustion during activation
/// is a silent cap, not an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Vessel geometry rejected at construction (e.g. neck not narrower
    /// than the top profile, or an empty vertical span).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Non-geometry parameter out of its documented bounds.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Slot-level activation requested on a slot that is already live.
    #[error("slot {slot} is already occupied")]
    SlotOccupied { slot: usize },
}
