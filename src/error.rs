use thiserror::Error;

/// Errors reported by the fallible table operations.
///
/// Both kinds are local to the call that produced them: a failed `insert`
/// touches no slot and a failed `get` mutates nothing, so the table stays
/// usable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// `insert` walked a full probe cycle without finding a free or removed
    /// slot. Only the open-addressing variants can report this; chaining
    /// always finds room.
    #[error("unable to insert: no free or removed slot within a full probe cycle")]
    CapacityExhausted,

    /// `get` was called for a key with no live entry.
    #[error("no value stored under this key")]
    KeyNotFound,
}
