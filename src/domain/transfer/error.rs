use crate::error::AppError;
use crate::infrastructure::clients::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("failed to fetch saved items: {0}")]
    Source(#[source] ClientError),
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::Source(e) => AppError::SourceUnavailable(e.to_string()),
        }
    }
}
