use ash::{prelude::VkResult, vk};

/// The logical device used to allocate and record the renderer's command
/// buffers.
///
/// The methods mirror their `ash::Device` counterparts so an ash-backed
/// device can implement this trait by forwarding each call.
pub trait Device {
    /// The pool which owns the renderer's command buffers.
    fn command_pool(&self) -> vk::CommandPool;

    /// Stall the thread until the GPU is done with all operations.
    fn wait_idle(&self) -> VkResult<()>;

    /// # Safety
    ///
    /// The caller must free the buffers before the command pool is destroyed.
    unsafe fn allocate_command_buffers(
        &self,
        allocate_info: &vk::CommandBufferAllocateInfo,
    ) -> VkResult<Vec<vk::CommandBuffer>>;

    /// # Safety
    ///
    /// The buffers must not be pending execution on the GPU.
    unsafe fn free_command_buffers(
        &self,
        command_pool: vk::CommandPool,
        command_buffers: &[vk::CommandBuffer],
    );

    /// # Safety
    ///
    /// The buffer must not be recording or pending execution.
    unsafe fn begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        begin_info: &vk::CommandBufferBeginInfo,
    ) -> VkResult<()>;

    /// # Safety
    ///
    /// The buffer must be in the recording state.
    unsafe fn end_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()>;

    /// # Safety
    ///
    /// The buffer must be recording and outside of any render pass.
    unsafe fn cmd_begin_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
        begin_info: &vk::RenderPassBeginInfo,
        contents: vk::SubpassContents,
    );

    /// # Safety
    ///
    /// The buffer must be recording.
    unsafe fn cmd_set_viewport(
        &self,
        command_buffer: vk::CommandBuffer,
        first_viewport: u32,
        viewports: &[vk::Viewport],
    );

    /// # Safety
    ///
    /// The buffer must be recording.
    unsafe fn cmd_set_scissor(
        &self,
        command_buffer: vk::CommandBuffer,
        first_scissor: u32,
        scissors: &[vk::Rect2D],
    );

    /// # Safety
    ///
    /// The buffer must be recording inside of a render pass.
    unsafe fn cmd_end_render_pass(&self, command_buffer: vk::CommandBuffer);
}
