use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// Input line is not valid JSON, decodes to an empty event batch, or a
    /// tile notation string is malformed.
    ProtocolParse { message: String },
    /// A snapshot-gated accessor was queried before the data it reports
    /// exists. Indicates a buggy policy, not a protocol condition.
    Precondition { message: String },
    /// The rules engine rejected an event or query as inconsistent with its
    /// tracked state.
    EngineRejection { message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::ProtocolParse { message } => {
                write!(f, "Protocol parse error: {}", message)
            }
            ClientError::Precondition { message } => {
                write!(f, "Precondition violated: {}", message)
            }
            ClientError::EngineRejection { message } => {
                write!(f, "Engine rejected: {}", message)
            }
        }
    }
}

impl std::error::Error for ClientError {}

pub type ClientResult<T> = Result<T, ClientError>;
