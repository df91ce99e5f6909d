use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("ring could not be closed: endpoints {first} and {last} have no counterpart")]
    UnclosedRing { first: i64, last: i64 },

    #[error("rings share no common endpoint")]
    DisjointRings,

    #[error("geometry requested on an unclosed ring")]
    RingNotClosed,

    #[error("fragment has no node references")]
    EmptyFragment,
}

pub type Result<T> = std::result::Result<T, BuildError>;
