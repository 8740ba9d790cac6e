use {ash::vk, thiserror::Error};

/// A renderer method was called out of sequence.
///
/// These always indicate a bug in the calling application.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ContractViolation {
    #[error("Can't call begin_frame while a frame is already in progress")]
    FrameAlreadyInProgress,

    #[error("Can't call {operation} while a frame isn't in progress")]
    FrameNotInProgress { operation: &'static str },

    #[error("Can't call {operation} with a command buffer from a different frame")]
    ForeignCommandBuffer { operation: &'static str },
}

/// The swapchain operation which failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentationOperation {
    Acquire,
    Present,
}

impl std::fmt::Display for PresentationOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresentationOperation::Acquire => f.write_str("acquire"),
            PresentationOperation::Present => f.write_str("present"),
        }
    }
}

/// The command recording step which failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RecordingStage {
    Begin,
    End,
}

impl std::fmt::Display for RecordingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingStage::Begin => f.write_str("begin"),
            RecordingStage::End => f.write_str("finish"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RendererError {
    #[error(transparent)]
    PreconditionViolation(#[from] ContractViolation),

    #[error("Failed to {operation} the swapchain image!")]
    PresentationFailure {
        operation: PresentationOperation,
        #[source]
        source: vk::Result,
    },

    #[error("Failed to {stage} recording the command buffer for frame {frame_index}!")]
    RecordingFailure {
        stage: RecordingStage,
        frame_index: usize,
        #[source]
        source: vk::Result,
    },

    #[error("Failed to allocate {expected} command buffers!")]
    ResourceAllocationFailure {
        expected: usize,
        #[source]
        source: vk::Result,
    },

    #[error("Expected {expected} command buffers but the device allocated {actual}")]
    UnexpectedCommandBufferCount { expected: usize, actual: usize },

    #[error("The swapchain must allow at least one frame in flight")]
    NoFramesInFlight,

    #[error("Swap chain image/depth format has changed!")]
    SwapchainIncompatible,

    #[error("Unable to create the swapchain")]
    SwapchainCreationFailure(#[source] anyhow::Error),

    #[error("Unable to wait for the device to idle")]
    DeviceWaitIdleFailure(#[source] vk::Result),
}

impl RendererError {
    /// True when the error was caused by calling the renderer out of
    /// sequence rather than by the device or the presentation engine.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, RendererError::PreconditionViolation(_))
    }
}
