use {
    crate::{renderer::RendererError, vulkan::Device},
    ash::vk,
};

/// One primary command buffer per in-flight frame slot.
///
/// Slot `i` is reused every N frames, where N is the number of slots. The
/// swapchain's synchronization guarantees that the previous submission from a
/// slot has completed before the slot is recorded again.
#[derive(Debug, Default)]
pub struct CommandBuffers {
    buffers: Vec<vk::CommandBuffer>,
}

impl CommandBuffers {
    /// Allocate `count` primary command buffers from the device's pool.
    ///
    /// Any previously allocated buffers are freed first.
    pub fn allocate<D: Device>(
        &mut self,
        device: &D,
        count: usize,
    ) -> Result<(), RendererError> {
        self.free(device);

        let allocate_info = vk::CommandBufferAllocateInfo {
            command_pool: device.command_pool(),
            level: vk::CommandBufferLevel::PRIMARY,
            command_buffer_count: count as u32,
            ..Default::default()
        };
        let buffers = unsafe {
            // SAFE because the buffers are always freed by this struct before
            // the renderer releases the device.
            device.allocate_command_buffers(&allocate_info).map_err(
                |source| RendererError::ResourceAllocationFailure {
                    expected: count,
                    source,
                },
            )?
        };
        if buffers.len() != count {
            let actual = buffers.len();
            unsafe {
                device.free_command_buffers(device.command_pool(), &buffers);
            }
            return Err(RendererError::UnexpectedCommandBufferCount {
                expected: count,
                actual,
            });
        }

        log::debug!("Allocated {} frame command buffers", count);
        self.buffers = buffers;
        Ok(())
    }

    /// Return every buffer to the device's pool and clear the slots.
    ///
    /// The caller must ensure none of the buffers are still pending execution.
    pub fn free<D: Device>(&mut self, device: &D) {
        if self.buffers.is_empty() {
            return;
        }
        unsafe {
            device.free_command_buffers(device.command_pool(), &self.buffers);
        }
        log::debug!("Freed {} frame command buffers", self.buffers.len());
        self.buffers.clear();
    }

    /// The command buffer bound to the given frame slot.
    pub fn get(&self, slot: usize) -> Option<vk::CommandBuffer> {
        self.buffers.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl std::ops::Index<usize> for CommandBuffers {
    type Output = vk::CommandBuffer;

    fn index(&self, slot: usize) -> &Self::Output {
        &self.buffers[slot]
    }
}

#[cfg(test)]
#[path = "command_buffers_tests.rs"]
mod tests;
