use crate::accel::NativeError;
use crate::heap::{BufferId, ContextId, ImageId};

/// Errors returned across the bridge boundary.
///
/// Accelerator-native status codes never appear here; they are translated
/// via [`BridgeError::from_native`] before crossing to the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("invalid image {0}")]
    InvalidImage(ImageId),

    #[error("invalid surface")]
    InvalidSurface,

    #[error("invalid buffer {0}")]
    InvalidBuffer(BufferId),

    #[error("invalid context {0}")]
    InvalidContext(ContextId),

    #[error("allocation failed: {0}")]
    AllocationFailed(&'static str),

    #[error("operation failed: {0}")]
    OperationFailed(&'static str),
}

impl BridgeError {
    /// Translate an accelerator-native status into the generic taxonomy.
    ///
    /// Resource exhaustion maps to [`AllocationFailed`]; everything else is
    /// a rejected request, i.e. [`OperationFailed`].
    ///
    /// [`AllocationFailed`]: BridgeError::AllocationFailed
    /// [`OperationFailed`]: BridgeError::OperationFailed
    pub fn from_native(err: NativeError) -> Self {
        match err {
            NativeError::OutOfMemory => BridgeError::AllocationFailed("accelerator out of memory"),
            NativeError::Resources => BridgeError::AllocationFailed("accelerator out of resources"),
            NativeError::InvalidHandle => {
                BridgeError::OperationFailed("invalid accelerator handle")
            }
            NativeError::InvalidSize => BridgeError::OperationFailed("invalid surface size"),
            NativeError::InvalidValue => BridgeError::OperationFailed("invalid accelerator value"),
            NativeError::Error => BridgeError::OperationFailed("accelerator error"),
        }
    }
}

impl From<NativeError> for BridgeError {
    fn from(err: NativeError) -> Self {
        BridgeError::from_native(err)
    }
}
