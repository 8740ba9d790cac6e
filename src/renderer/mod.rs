//! The frame lifecycle: acquire a swapchain image, record commands into the
//! current frame's command buffer, then submit and present.
//!
//! # Example
//!
//! ```ignore
//! let mut renderer = Renderer::<_, MySwapchain>::new(window, device)?;
//! while !renderer.window().should_close() {
//!     if let Some(cmd) = renderer.begin_frame()? {
//!         renderer.begin_swapchain_render_pass(cmd)?;
//!         // record draw commands
//!         renderer.end_swapchain_render_pass(cmd)?;
//!         renderer.end_frame()?;
//!     }
//! }
//! ```

mod command_buffers;
mod error;
mod frame_state;
mod recreate;
mod render_pass;

#[cfg(test)]
mod mock;

use {
    self::frame_state::FrameState,
    crate::vulkan::{Device, Swapchain, SwapchainStatus, Window},
    ash::vk,
    std::sync::Arc,
};

pub use self::{
    command_buffers::CommandBuffers,
    error::{
        ContractViolation, PresentationOperation, RecordingStage,
        RendererError,
    },
};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Owns the swapchain and the per-frame command buffers and drives them
/// through the frame lifecycle.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> Idle
///     Idle --> Idle: begin_frame / swapchain out of date, rebuild
///     Idle --> Recording: begin_frame
///     Recording --> Idle: end_frame
/// ```
///
/// The swapchain is rebuilt whenever the presentation engine reports that it
/// is out of date or suboptimal, or when the window reports a resize. Command
/// buffers are allocated once and are never rebuilt with the swapchain.
pub struct Renderer<W: Window, S: Swapchain> {
    window: W,
    device: Arc<S::Device>,
    swapchain: S,
    command_buffers: CommandBuffers,
    frame_state: FrameState,
    current_frame_index: usize,
}

// Public API
// ----------

impl<W: Window, S: Swapchain> Renderer<W, S> {
    /// Build the initial swapchain and allocate one command buffer per
    /// in-flight frame.
    ///
    /// Blocks while the window is minimized.
    pub fn new(
        mut window: W,
        device: Arc<S::Device>,
    ) -> Result<Self, RendererError> {
        if S::MAX_FRAMES_IN_FLIGHT == 0 {
            return Err(RendererError::NoFramesInFlight);
        }
        let swapchain: S =
            recreate::build_swapchain(&mut window, &device, None)?;
        let mut command_buffers = CommandBuffers::default();
        command_buffers.allocate(device.as_ref(), S::MAX_FRAMES_IN_FLIGHT)?;

        Ok(Self {
            window,
            device,
            swapchain,
            command_buffers,
            frame_state: FrameState::Idle,
            current_frame_index: 0,
        })
    }

    /// Begin a new frame.
    ///
    /// # Returns
    ///
    /// The command buffer for the frame, already in the recording state, or
    /// `None` when the swapchain had to be rebuilt. `None` is not an error:
    /// the application should skip rendering for this iteration and try
    /// again.
    pub fn begin_frame(
        &mut self,
    ) -> Result<Option<vk::CommandBuffer>, RendererError> {
        self.frame_state.ensure_idle()?;

        let image_index = match self.swapchain.acquire_next_image().map_err(
            |source| RendererError::PresentationFailure {
                operation: PresentationOperation::Acquire,
                source,
            },
        )? {
            SwapchainStatus::OutOfDate => {
                log::debug!("Swapchain out of date at begin_frame");
                self.recreate_swapchain()?;
                return Ok(None);
            }
            SwapchainStatus::Optimal(index)
            | SwapchainStatus::Suboptimal(index) => index,
        };

        let command_buffer = self.command_buffers[self.current_frame_index];
        let begin_info = vk::CommandBufferBeginInfo::default();
        unsafe {
            // SAFE because the swapchain waits for this slot's previous
            // submission before handing out the image.
            self.device
                .begin_command_buffer(command_buffer, &begin_info)
                .map_err(|source| RendererError::RecordingFailure {
                    stage: RecordingStage::Begin,
                    frame_index: self.current_frame_index,
                    source,
                })?;
        }

        self.frame_state.start(image_index)?;
        log::trace!(
            "Frame {} started on swapchain image {}",
            self.current_frame_index,
            image_index
        );
        Ok(Some(command_buffer))
    }

    /// End the current frame, then submit its commands and schedule the
    /// swapchain image for presentation.
    ///
    /// The frame is closed as soon as this is called, so a failed end_frame
    /// is never retried against the same command buffer. The frame index
    /// advances once the buffer has been handed to the swapchain, even when
    /// the swapchain had to be rebuilt.
    ///
    /// A pending window resize takes precedence over a present failure: the
    /// swapchain is rebuilt and the frame completes.
    pub fn end_frame(&mut self) -> Result<(), RendererError> {
        let image_index = self.frame_state.image_index("end_frame")?;
        let frame_index = self.current_frame_index;
        let command_buffer = self.command_buffers[frame_index];
        self.frame_state.finish();

        unsafe {
            // SAFE because the buffer was started by begin_frame and the frame
            // was closed above, so it is ended exactly once.
            self.device.end_command_buffer(command_buffer).map_err(
                |source| RendererError::RecordingFailure {
                    stage: RecordingStage::End,
                    frame_index,
                    source,
                },
            )?;
        }

        let result = self
            .swapchain
            .submit_command_buffers(command_buffer, image_index);
        self.current_frame_index =
            (frame_index + 1) % S::MAX_FRAMES_IN_FLIGHT;

        let resized = self.window.was_resized();
        let needs_rebuild =
            matches!(&result, Ok(status) if status.needs_rebuild());
        if needs_rebuild || resized {
            match &result {
                Ok(status) => log::debug!(
                    "Rebuilding swapchain at end_frame (status: {:?}, resized: {})",
                    status,
                    resized
                ),
                Err(source) => log::warn!(
                    "Present failed with {:?} while a resize was pending, rebuilding the swapchain",
                    source
                ),
            }
            self.window.reset_resized_flag();
            return self.recreate_swapchain();
        }

        result
            .map(|_| ())
            .map_err(|source| RendererError::PresentationFailure {
                operation: PresentationOperation::Present,
                source,
            })
    }

    /// The command buffer bound to the frame in progress.
    pub fn current_command_buffer(
        &self,
    ) -> Result<vk::CommandBuffer, RendererError> {
        self.frame_state.image_index("current_command_buffer")?;
        Ok(self.command_buffers[self.current_frame_index])
    }

    /// The index of the frame in progress. Always in the range
    /// `[0, MAX_FRAMES_IN_FLIGHT)`.
    pub fn frame_index(&self) -> Result<usize, RendererError> {
        self.frame_state.image_index("frame_index")?;
        Ok(self.current_frame_index)
    }

    /// True between a successful `begin_frame` and the matching `end_frame`.
    pub fn is_frame_in_progress(&self) -> bool {
        self.frame_state.is_recording()
    }

    /// The render pass used to draw into the swapchain images.
    ///
    /// This value can change every time the swapchain is rebuilt.
    pub fn swapchain_render_pass(&self) -> vk::RenderPass {
        self.swapchain.render_pass()
    }

    /// The width of the swapchain images divided by their height.
    pub fn aspect_ratio(&self) -> f32 {
        let extent = self.swapchain.extent();
        extent.width as f32 / extent.height as f32
    }

    /// The current swapchain.
    pub fn swapchain(&self) -> &S {
        &self.swapchain
    }

    /// The device used to record and free the frame command buffers.
    pub fn device(&self) -> &Arc<S::Device> {
        &self.device
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }
}

impl<W: Window, S: Swapchain> Drop for Renderer<W, S> {
    /// # Safety
    ///
    /// The application must wait for the device to idle before dropping the
    /// renderer. The command buffers are freed immediately.
    fn drop(&mut self) {
        self.command_buffers.free(self.device.as_ref());
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
