//! Mock collaborators for exercising the renderer without a GPU.
//!
//! Every mock appends to one shared call log so tests can assert on the
//! ordering of calls across the window, the device, and the swapchains.

use {
    crate::{
        renderer::Renderer,
        vulkan::{Device, Swapchain, SwapchainStatus, Window},
    },
    ash::{
        prelude::VkResult,
        vk::{self, Handle},
    },
    std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    },
};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub type MockRenderer = Renderer<MockWindow, MockSwapchain>;

/// Build a renderer with a window of the given size.
pub fn mock_renderer(width: u32, height: u32) -> (MockRenderer, Arc<MockDevice>) {
    let device = Arc::new(MockDevice::default());
    let window = MockWindow::new(&device.log, width, height);
    let renderer = Renderer::new(window, device.clone())
        .expect("the mock renderer should build");
    (renderer, device)
}

// ============================================================================
// Mock Window
// ============================================================================

pub struct MockWindow {
    extent: vk::Extent2D,
    resized: bool,

    /// Each call to wait_events applies the next extent in the queue.
    pending_extents: VecDeque<vk::Extent2D>,
    log: CallLog,
}

impl MockWindow {
    pub fn new(log: &CallLog, width: u32, height: u32) -> Self {
        Self {
            extent: vk::Extent2D { width, height },
            resized: false,
            pending_extents: VecDeque::new(),
            log: log.clone(),
        }
    }

    /// Queue extents which the window reports after successive events.
    pub fn push_event_extents(&mut self, extents: &[(u32, u32)]) {
        self.pending_extents.extend(
            extents
                .iter()
                .map(|&(width, height)| vk::Extent2D { width, height }),
        );
    }

    /// Change the framebuffer size and raise the resized flag.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.extent = vk::Extent2D { width, height };
        self.resized = true;
    }
}

impl Window for MockWindow {
    fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    fn was_resized(&self) -> bool {
        self.resized
    }

    fn reset_resized_flag(&mut self) {
        self.log.lock().unwrap().push("reset_resized_flag".to_string());
        self.resized = false;
    }

    fn wait_events(&mut self) {
        self.log.lock().unwrap().push("wait_events".to_string());
        self.extent = self
            .pending_extents
            .pop_front()
            .expect("wait_events was called but no more events are queued");
    }
}

// ============================================================================
// Mock Device
// ============================================================================

/// Scripted results for the device and every swapchain created from it.
#[derive(Default)]
pub struct DeviceScript {
    /// Raw acquire results, defaults to `Ok((0, false))` when empty.
    pub acquire_results: VecDeque<VkResult<(u32, bool)>>,

    /// Raw present results, defaults to `Ok(false)` when empty.
    pub present_results: VecDeque<VkResult<bool>>,

    /// Formats for newly created swapchains, defaults to B8G8R8A8_SRGB.
    pub swapchain_formats: VecDeque<vk::Format>,

    pub allocate_error: Option<vk::Result>,
    pub allocate_short: bool,
    pub begin_error: Option<vk::Result>,
    pub end_error: Option<vk::Result>,
    pub wait_idle_error: Option<vk::Result>,
    pub fail_swapchain_creation: bool,
}

/// A render pass begin as observed by the device.
#[derive(Debug, Copy, Clone)]
pub struct RecordedRenderPass {
    pub command_buffer: vk::CommandBuffer,
    pub render_pass: vk::RenderPass,
    pub framebuffer: vk::Framebuffer,
    pub render_area: vk::Rect2D,
    pub clear_color: [f32; 4],
    pub clear_depth_stencil: vk::ClearDepthStencilValue,
    pub contents: vk::SubpassContents,
}

pub struct MockDevice {
    pub log: CallLog,
    pub script: Mutex<DeviceScript>,
    pub render_passes: Mutex<Vec<RecordedRenderPass>>,
    pub viewports: Mutex<Vec<vk::Viewport>>,
    pub scissors: Mutex<Vec<vk::Rect2D>>,
    pub live_command_buffers: Mutex<Vec<vk::CommandBuffer>>,
    next_handle: Mutex<u64>,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            script: Mutex::new(DeviceScript::default()),
            render_passes: Mutex::new(Vec::new()),
            viewports: Mutex::new(Vec::new()),
            scissors: Mutex::new(Vec::new()),
            live_command_buffers: Mutex::new(Vec::new()),
            next_handle: Mutex::new(1),
        }
    }
}

impl MockDevice {
    pub fn record(&self, call: impl Into<String>) {
        self.log.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// The number of logged calls which start with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    /// The index of the first logged call which starts with `prefix`.
    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls().iter().position(|call| call.starts_with(prefix))
    }

    pub fn clear_log(&self) {
        self.log.lock().unwrap().clear();
    }

    fn next_handle(&self) -> u64 {
        let mut next = self.next_handle.lock().unwrap();
        let handle = *next;
        *next += 1;
        handle
    }
}

impl Device for MockDevice {
    fn command_pool(&self) -> vk::CommandPool {
        vk::CommandPool::from_raw(0xC0)
    }

    fn wait_idle(&self) -> VkResult<()> {
        self.record("wait_idle");
        match self.script.lock().unwrap().wait_idle_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    unsafe fn allocate_command_buffers(
        &self,
        allocate_info: &vk::CommandBufferAllocateInfo,
    ) -> VkResult<Vec<vk::CommandBuffer>> {
        assert_eq!(allocate_info.command_pool, self.command_pool());
        assert_eq!(allocate_info.level, vk::CommandBufferLevel::PRIMARY);
        self.record(format!(
            "allocate_command_buffers({})",
            allocate_info.command_buffer_count
        ));

        let (allocate_error, allocate_short) = {
            let script = self.script.lock().unwrap();
            (script.allocate_error, script.allocate_short)
        };
        if let Some(err) = allocate_error {
            return Err(err);
        }

        let mut count = allocate_info.command_buffer_count as usize;
        if allocate_short {
            count -= 1;
        }
        let buffers: Vec<vk::CommandBuffer> = (0..count)
            .map(|_| vk::CommandBuffer::from_raw(self.next_handle()))
            .collect();
        self.live_command_buffers
            .lock()
            .unwrap()
            .extend_from_slice(&buffers);
        Ok(buffers)
    }

    unsafe fn free_command_buffers(
        &self,
        command_pool: vk::CommandPool,
        command_buffers: &[vk::CommandBuffer],
    ) {
        assert_eq!(command_pool, self.command_pool());
        self.record(format!("free_command_buffers({})", command_buffers.len()));
        self.live_command_buffers
            .lock()
            .unwrap()
            .retain(|buffer| !command_buffers.contains(buffer));
    }

    unsafe fn begin_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
        _begin_info: &vk::CommandBufferBeginInfo,
    ) -> VkResult<()> {
        self.record(format!(
            "begin_command_buffer({})",
            command_buffer.as_raw()
        ));
        match self.script.lock().unwrap().begin_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    unsafe fn end_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> VkResult<()> {
        self.record(format!("end_command_buffer({})", command_buffer.as_raw()));
        match self.script.lock().unwrap().end_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    unsafe fn cmd_begin_render_pass(
        &self,
        command_buffer: vk::CommandBuffer,
        begin_info: &vk::RenderPassBeginInfo,
        contents: vk::SubpassContents,
    ) {
        self.record(format!(
            "cmd_begin_render_pass({})",
            command_buffer.as_raw()
        ));
        let clear_values = std::slice::from_raw_parts(
            begin_info.p_clear_values,
            begin_info.clear_value_count as usize,
        );
        assert_eq!(clear_values.len(), 2);
        self.render_passes.lock().unwrap().push(RecordedRenderPass {
            command_buffer,
            render_pass: begin_info.render_pass,
            framebuffer: begin_info.framebuffer,
            render_area: begin_info.render_area,
            clear_color: clear_values[0].color.float32,
            clear_depth_stencil: clear_values[1].depth_stencil,
            contents,
        });
    }

    unsafe fn cmd_set_viewport(
        &self,
        command_buffer: vk::CommandBuffer,
        first_viewport: u32,
        viewports: &[vk::Viewport],
    ) {
        assert_eq!(first_viewport, 0);
        self.record(format!("cmd_set_viewport({})", command_buffer.as_raw()));
        self.viewports.lock().unwrap().extend_from_slice(viewports);
    }

    unsafe fn cmd_set_scissor(
        &self,
        command_buffer: vk::CommandBuffer,
        first_scissor: u32,
        scissors: &[vk::Rect2D],
    ) {
        assert_eq!(first_scissor, 0);
        self.record(format!("cmd_set_scissor({})", command_buffer.as_raw()));
        self.scissors.lock().unwrap().extend_from_slice(scissors);
    }

    unsafe fn cmd_end_render_pass(&self, command_buffer: vk::CommandBuffer) {
        self.record(format!(
            "cmd_end_render_pass({})",
            command_buffer.as_raw()
        ));
    }
}

// ============================================================================
// Mock Swapchain
// ============================================================================

pub struct MockSwapchain {
    pub id: u64,
    pub extent: vk::Extent2D,
    pub format: vk::Format,
    pub previous_id: Option<u64>,
    device: Arc<MockDevice>,
}

impl Swapchain for MockSwapchain {
    type Device = MockDevice;

    fn new(
        device: &Arc<MockDevice>,
        extent: vk::Extent2D,
        previous: Option<&Self>,
    ) -> anyhow::Result<Self> {
        let (fail, format) = {
            let mut script = device.script.lock().unwrap();
            (
                script.fail_swapchain_creation,
                script
                    .swapchain_formats
                    .pop_front()
                    .unwrap_or(vk::Format::B8G8R8A8_SRGB),
            )
        };
        if fail {
            anyhow::bail!("the surface was lost");
        }

        let id = device.next_handle();
        let previous_id = previous.map(|swapchain| swapchain.id);
        device.record(format!(
            "swapchain_new({}, {}x{}, previous={:?})",
            id, extent.width, extent.height, previous_id
        ));
        Ok(Self {
            id,
            extent,
            format,
            previous_id,
            device: device.clone(),
        })
    }

    fn acquire_next_image(&mut self) -> VkResult<SwapchainStatus<u32>> {
        self.device.record(format!("acquire_next_image({})", self.id));
        let result = self
            .device
            .script
            .lock()
            .unwrap()
            .acquire_results
            .pop_front()
            .unwrap_or(Ok((0, false)));
        SwapchainStatus::<u32>::from_acquire_result(result)
    }

    fn submit_command_buffers(
        &mut self,
        command_buffer: vk::CommandBuffer,
        image_index: u32,
    ) -> VkResult<SwapchainStatus<()>> {
        self.device.record(format!(
            "submit_command_buffers({}, {}, {})",
            self.id,
            command_buffer.as_raw(),
            image_index
        ));
        let result = self
            .device
            .script
            .lock()
            .unwrap()
            .present_results
            .pop_front()
            .unwrap_or(Ok(false));
        SwapchainStatus::<()>::from_present_result(result)
    }

    fn render_pass(&self) -> vk::RenderPass {
        vk::RenderPass::from_raw(0x1000 + self.id)
    }

    fn framebuffer(&self, image_index: u32) -> vk::Framebuffer {
        vk::Framebuffer::from_raw(0x2000 + self.id * 0x10 + image_index as u64)
    }

    fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    fn compare_swapchain_formats(&self, other: &Self) -> bool {
        self.device.record(format!(
            "compare_swapchain_formats({}, {})",
            self.id, other.id
        ));
        self.format == other.format
    }
}

impl Drop for MockSwapchain {
    fn drop(&mut self) {
        self.device.record(format!("drop_swapchain({})", self.id));
    }
}
