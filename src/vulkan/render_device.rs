use {
    crate::vulkan::Device,
    ash::{prelude::VkResult, vk},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum RenderDeviceError {
    #[error("Unable to create the graphics command pool")]
    UnableToCreateCommandPool(#[source] vk::Result),
}

/// The ash-backed implementation of the renderer's Device.
///
/// The RenderDevice borrows a logical device created elsewhere and owns a
/// single command pool for the graphics queue family.
pub struct RenderDevice {
    logical_device: ash::Device,
    command_pool: vk::CommandPool,
}

impl RenderDevice {
    /// Create a render device and its graphics command pool.
    ///
    /// # Params
    ///
    /// * `logical_device` - the Vulkan logical device. The caller remains
    ///   responsible for destroying it after this RenderDevice is dropped.
    /// * `graphics_queue_family_index` - the queue family used to submit the
    ///   renderer's command buffers.
    pub fn new(
        logical_device: ash::Device,
        graphics_queue_family_index: u32,
    ) -> Result<Self, RenderDeviceError> {
        let create_info = vk::CommandPoolCreateInfo {
            queue_family_index: graphics_queue_family_index,
            flags: vk::CommandPoolCreateFlags::TRANSIENT
                | vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER,
            ..Default::default()
        };
        let command_pool = unsafe {
            logical_device
                .create_command_pool(&create_info, None)
                .map_err(RenderDeviceError::UnableToCreateCommandPool)?
        };
        log::debug!(
            "Created graphics command pool for queue family {}",
            graphics_queue_family_index
        );
        Ok(Self {
            logical_device,
            command_pool,
        })
    }

    /// The raw ash logical device.
    pub fn logical_device(&self) -> &ash::Device {
        &self.logical_device
    }
}

impl Device for RenderDevice {
    fn command_pool(&self) -> vk::CommandPool {
        self.command_pool
    }

    fn wait_idle(&self) -> VkResult<()> {
        unsafe { self.logical_device.device_wait_idle() }
    }

    unsafe fn allocate_command_buffers(
        &self,
        allocate_info: &vk::CommandBufferAllocateInfo,
    ) -> VkResult<Vec<vk::CommandBuffer>> {
        self.logical_device.allocate_command_buffers(allocate_info)
    }

    unsafe fn free_command_buffers(
        &self,
        command_pool: vk::CommandPool,
        command_buffers: &[vk::CommandBuffer],
    ) {
        self.logical_device
            .free_command_buffers(command_pool, command_buffers)
    }

    unsafe fn begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        begin_info: &vk::CommandBufferBeginInfo,
    ) -> VkResult<()> {
        self.logical_device
            .begin_command_buffer(command_buffer, begin_info)
    }

    unsafe fn end_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        self.logical_device.end_command_buffer(command_buffer)
    }

    unsafe fn cmd_begin_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
        begin_info: &vk::RenderPassBeginInfo,
        contents: vk::SubpassContents,
    ) {
        self.logical_device
            .cmd_begin_render_pass(command_buffer, begin_info, contents)
    }

    unsafe fn cmd_set_viewport(
        &self,
        command_buffer: vk::CommandBuffer,
        first_viewport: u32,
        viewports: &[vk::Viewport],
    ) {
        self.logical_device.cmd_set_viewport(
            command_buffer,
            first_viewport,
            viewports,
        )
    }

    unsafe fn cmd_set_scissor(
        &self,
        command_buffer: vk::CommandBuffer,
        first_scissor: u32,
        scissors: &[vk::Rect2D],
    ) {
        self.logical_device
            .cmd_set_scissor(command_buffer, first_scissor, scissors)
    }

    unsafe fn cmd_end_render_pass(&self, command_buffer: vk::CommandBuffer) {
        self.logical_device.cmd_end_render_pass(command_buffer)
    }
}

impl Drop for RenderDevice {
    /// # Safety
    ///
    /// The application must wait for the device to idle and free every
    /// command buffer allocated from the pool before dropping.
    fn drop(&mut self) {
        unsafe {
            self.logical_device
                .destroy_command_pool(self.command_pool, None);
        }
    }
}
