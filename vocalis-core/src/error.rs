use thiserror::Error;

/// All errors produced by vocalis-core.
#[derive(Debug, Error)]
pub enum VocalisError {
    #[error("frame window must span at least one sample")]
    EmptyFrameWindow,

    #[error("feature histogram must have at least one bin")]
    EmptyHistogram,
}

pub type Result<T> = std::result::Result<T, VocalisError>;
