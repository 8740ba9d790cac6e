use {
    super::{frame_state, Renderer},
    crate::{
        renderer::RendererError,
        vulkan::{Device, Swapchain, Window},
    },
    ash::vk,
};

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const CLEAR_DEPTH: f32 = 1.0;
const CLEAR_STENCIL: u32 = 0;

impl<W: Window, S: Swapchain> Renderer<W, S> {
    /// Begin the swapchain render pass on the current frame's command buffer.
    ///
    /// The color attachment is cleared to opaque black, depth is cleared to
    /// the far plane, and the viewport and scissor are set to cover the whole
    /// swapchain image.
    pub fn begin_swapchain_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> Result<(), RendererError> {
        let image_index = self.validate_render_pass_buffer(
            command_buffer,
            "begin_swapchain_render_pass",
        )?;

        let extent = self.swapchain.extent();
        let clear_values = clear_values();
        let begin_info = vk::RenderPassBeginInfo {
            render_pass: self.swapchain.render_pass(),
            framebuffer: self.swapchain.framebuffer(image_index),
            render_area: full_scissor(extent),
            clear_value_count: clear_values.len() as u32,
            p_clear_values: clear_values.as_ptr(),
            ..Default::default()
        };
        unsafe {
            // SAFE because the buffer is recording and belongs to the current
            // frame.
            self.device.cmd_begin_render_pass(
                command_buffer,
                &begin_info,
                vk::SubpassContents::INLINE,
            );
            self.device
                .cmd_set_viewport(command_buffer, 0, &[full_viewport(extent)]);
            self.device
                .cmd_set_scissor(command_buffer, 0, &[full_scissor(extent)]);
        }
        Ok(())
    }

    /// End the swapchain render pass started by
    /// `begin_swapchain_render_pass`.
    pub fn end_swapchain_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> Result<(), RendererError> {
        self.validate_render_pass_buffer(
            command_buffer,
            "end_swapchain_render_pass",
        )?;
        unsafe {
            self.device.cmd_end_render_pass(command_buffer);
        }
        Ok(())
    }
}

impl<W: Window, S: Swapchain> Renderer<W, S> {
    /// Returns the targeted swapchain image index when a frame is open and
    /// `command_buffer` belongs to it.
    fn validate_render_pass_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        operation: &'static str,
    ) -> Result<u32, RendererError> {
        let image_index = self.frame_state.image_index(operation)?;
        frame_state::ensure_current_buffer(
            command_buffer,
            self.command_buffers[self.current_frame_index],
            operation,
        )?;
        Ok(image_index)
    }
}

fn clear_values() -> [vk::ClearValue; 2] {
    [
        vk::ClearValue {
            color: vk::ClearColorValue {
                float32: CLEAR_COLOR,
            },
        },
        vk::ClearValue {
            depth_stencil: vk::ClearDepthStencilValue {
                depth: CLEAR_DEPTH,
                stencil: CLEAR_STENCIL,
            },
        },
    ]
}

fn full_viewport(extent: vk::Extent2D) -> vk::Viewport {
    vk::Viewport {
        x: 0.0,
        y: 0.0,
        width: extent.width as f32,
        height: extent.height as f32,
        min_depth: 0.0,
        max_depth: 1.0,
    }
}

fn full_scissor(extent: vk::Extent2D) -> vk::Rect2D {
    vk::Rect2D {
        offset: vk::Offset2D { x: 0, y: 0 },
        extent,
    }
}
