use thiserror::Error;

/// Failure modes of the modeling core.
///
/// Transport and configuration problems are handled with `anyhow` at the
/// call sites in `pipeline` and `main`; this enum only covers conditions the
/// pipeline has to react to per competition or per fixture.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A Poisson rate (expected goals) reached the model at zero or below.
    /// Skips the fixture, never the run.
    #[error("expected goals must be positive, got {0}")]
    NonPositiveRate(f64),

    /// No finished matches were available to estimate from.
    /// Skips the competition, never the run.
    #[error("no finished matches to estimate team strengths from")]
    InsufficientHistory,

    /// A fixture references a team with no entry in the historical window.
    /// Skips the fixture; strengths are never fabricated.
    #[error("no strength entry for team {id} ({name})")]
    UnknownTeam { id: u32, name: String },
}
