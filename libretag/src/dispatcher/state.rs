use derive_more::Display;

/// Session state of the dispatcher.
///
/// `Idle -> SessionActive -> PatchInfoFetched -> Executing -> Completed | Failed`,
/// with a single detour through `RecoveringOnce` when the tag reports empty
/// patch info. A terminal state returns to `Idle` once the reading is out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    /// No action in flight
    #[default]
    Idle,
    /// Connecting to a tag
    SessionActive,
    /// Variant and region known
    PatchInfoFetched,
    /// Running the action sequence
    Executing,
    /// Empty patch info seen, recovery in progress
    RecoveringOnce,
    /// Action finished successfully
    Completed,
    /// Action aborted with an error
    Failed,
}
