use {
    crate::vulkan::Device,
    ash::{prelude::VkResult, vk},
    std::sync::Arc,
};

/// Indicates whether a swapchain operation succeeded and whether the
/// swapchain still matches the presentation surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwapchainStatus<T> {
    /// Completed the operation and the swapchain is optimal for the surface.
    Optimal(T),

    /// Completed the operation, but the swapchain no longer matches the
    /// surface exactly and should be rebuilt.
    Suboptimal(T),

    /// The swapchain is unusable and must be rebuilt before it can be used
    /// again.
    OutOfDate,
}

impl<T> SwapchainStatus<T> {
    /// True when the swapchain should be rebuilt.
    pub fn needs_rebuild(&self) -> bool {
        !matches!(self, SwapchainStatus::Optimal(_))
    }
}

impl SwapchainStatus<u32> {
    /// Classify the raw result of `vkAcquireNextImageKHR`.
    ///
    /// `ERROR_OUT_OF_DATE_KHR` becomes `OutOfDate`. Every other error is
    /// returned unchanged.
    pub fn from_acquire_result(result: VkResult<(u32, bool)>) -> VkResult<Self> {
        match result {
            Ok((index, false)) => Ok(SwapchainStatus::Optimal(index)),
            Ok((index, true)) => {
                log::debug!("Acquire Image: Swapchain suboptimal.");
                Ok(SwapchainStatus::Suboptimal(index))
            }
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("Acquire Image: Swapchain lost, needs rebuild.");
                Ok(SwapchainStatus::OutOfDate)
            }
            Err(err) => Err(err),
        }
    }
}

impl SwapchainStatus<()> {
    /// Classify the raw result of `vkQueuePresentKHR`.
    pub fn from_present_result(result: VkResult<bool>) -> VkResult<Self> {
        match result {
            Ok(false) => Ok(SwapchainStatus::Optimal(())),
            Ok(true) => {
                log::debug!(
                    "Present Image: Swapchain is suboptimal and needs rebuild"
                );
                Ok(SwapchainStatus::Suboptimal(()))
            }
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("Present Image: Swapchain lost, needs rebuild.");
                Ok(SwapchainStatus::OutOfDate)
            }
            Err(err) => Err(err),
        }
    }
}

/// A presentation chain along with its render pass and per-image
/// framebuffers.
///
/// Swapchains are never mutated in place when the surface changes. A new
/// swapchain is created from the old one and the old one is dropped.
pub trait Swapchain: Sized {
    /// The device type used to create the swapchain.
    type Device: Device;

    /// The number of frames which can be recorded before the renderer must
    /// wait for the GPU to finish with an older frame.
    ///
    /// Must be at least 1. The renderer refuses to build otherwise.
    const MAX_FRAMES_IN_FLIGHT: usize = 2;

    /// Create a new swapchain.
    ///
    /// # Params
    ///
    /// * `device` - the device used to create all swapchain resources
    /// * `extent` - the window's drawable size in pixels, never zero
    /// * `previous` - the swapchain being replaced, if any. Implementations
    ///   may recycle its resources but must not keep the reference.
    fn new(
        device: &Arc<Self::Device>,
        extent: vk::Extent2D,
        previous: Option<&Self>,
    ) -> anyhow::Result<Self>;

    /// Acquire the next presentable image.
    ///
    /// Returns the image's index on success.
    fn acquire_next_image(&mut self) -> VkResult<SwapchainStatus<u32>>;

    /// Submit the command buffer for execution and queue the image for
    /// presentation once it completes.
    fn submit_command_buffers(
        &mut self,
        command_buffer: vk::CommandBuffer,
        image_index: u32,
    ) -> VkResult<SwapchainStatus<()>>;

    /// The render pass which targets the swapchain images.
    fn render_pass(&self) -> vk::RenderPass;

    /// The framebuffer for the swapchain image at `image_index`.
    fn framebuffer(&self, image_index: u32) -> vk::Framebuffer;

    /// The size of the swapchain images.
    fn extent(&self) -> vk::Extent2D;

    /// True when both swapchains use the same image and depth formats.
    fn compare_swapchain_formats(&self, other: &Self) -> bool;
}
