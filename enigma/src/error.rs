#[derive(thiserror::Error)]
pub enum Error {
    // dependency errors
    #[error("enum conversion: {0}")]
    Strum(#[from] strum::ParseError),

    // crate errors
    #[error("got {0}, which is not a letter index")]
    Letter(u8),

    #[error("wiring {id:?} is not a permutation of the alphabet")]
    InvalidPermutation { id: String },

    #[error("no wheel {0:?} in the searched sets")]
    UnknownWheel(String),

    #[error("no editable pair slot {0}")]
    PairSlot(usize),

    #[error("machine is in encipher mode, settings are locked")]
    Locked,

    #[error("machine is not in encipher mode")]
    NotLocked,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
