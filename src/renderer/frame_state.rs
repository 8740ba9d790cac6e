use {crate::renderer::ContractViolation, ash::vk};

/// Tracks whether the renderer is currently recording a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FrameState {
    /// No frame is open.
    #[default]
    Idle,

    /// A frame was started and has not been ended yet.
    Recording {
        /// The swapchain image targeted by the open frame.
        image_index: u32,
    },
}

impl FrameState {
    pub fn is_recording(&self) -> bool {
        matches!(self, FrameState::Recording { .. })
    }

    /// The targeted swapchain image, or a violation naming `operation` when
    /// no frame is open.
    pub fn image_index(
        &self,
        operation: &'static str,
    ) -> Result<u32, ContractViolation> {
        match *self {
            FrameState::Recording { image_index } => Ok(image_index),
            FrameState::Idle => {
                Err(ContractViolation::FrameNotInProgress { operation })
            }
        }
    }

    /// Transition from Idle to Recording.
    pub fn start(&mut self, image_index: u32) -> Result<(), ContractViolation> {
        self.ensure_idle()?;
        *self = FrameState::Recording { image_index };
        Ok(())
    }

    /// Transition from Recording back to Idle.
    pub fn finish(&mut self) {
        *self = FrameState::Idle;
    }

    pub fn ensure_idle(&self) -> Result<(), ContractViolation> {
        if self.is_recording() {
            return Err(ContractViolation::FrameAlreadyInProgress);
        }
        Ok(())
    }
}

/// Check that `command_buffer` is the buffer bound to the open frame.
pub fn ensure_current_buffer(
    command_buffer: vk::CommandBuffer,
    current: vk::CommandBuffer,
    operation: &'static str,
) -> Result<(), ContractViolation> {
    if command_buffer != current {
        return Err(ContractViolation::ForeignCommandBuffer { operation });
    }
    Ok(())
}
