use {
    crate::{glfw_window::WindowError, vulkan::Window},
    ash::vk,
    glfw::{ClientApiHint, WindowEvent, WindowHint, WindowMode},
};

/// GLFW sends window events through a receiver. This alias is more
/// convenient to read than the full name.
pub type EventReceiver = glfw::GlfwReceiver<(f64, WindowEvent)>;

/// A single resizable GLFW window without a client API, ready for a Vulkan
/// surface.
///
/// Resizes are recorded as a flag which the renderer reads at the end of
/// every frame and clears once the swapchain has been rebuilt.
pub struct GlfwWindow {
    /// The glfw library instance
    pub glfw: glfw::Glfw,

    window_handle: glfw::PWindow,
    event_receiver: Option<EventReceiver>,
    framebuffer_resized: bool,
}

impl GlfwWindow {
    /// Initialize the GLFW library and create a new window.
    ///
    /// # Params
    ///
    /// * `width` - the initial window width in screen coordinates
    /// * `height` - the initial window height in screen coordinates
    /// * `window_title` - the title shown on the window's top bar
    pub fn new(
        width: u32,
        height: u32,
        window_title: impl AsRef<str>,
    ) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)?;

        if !glfw.vulkan_supported() {
            return Err(WindowError::VulkanNotSupported);
        }

        // Tell GLFW not to bother setting up the OpenGL API
        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        glfw.window_hint(WindowHint::Resizable(true));

        let (mut window_handle, event_receiver) = glfw
            .create_window(
                width,
                height,
                window_title.as_ref(),
                WindowMode::Windowed,
            )
            .ok_or(WindowError::WindowCreateFailed)?;
        window_handle.set_framebuffer_size_polling(true);

        Ok(Self {
            glfw,
            window_handle,
            event_receiver: Some(event_receiver),
            framebuffer_resized: false,
        })
    }

    /// Poll GLFW for events.
    ///
    /// Framebuffer size events raise the resized flag. Every event, including
    /// those, is returned for the application loop to handle.
    pub fn flush_events(
        &mut self,
    ) -> Result<Vec<(f64, WindowEvent)>, WindowError> {
        self.glfw.poll_events();
        self.drain_events()
    }

    /// Take ownership of the event receiver.
    ///
    /// Once taken, `flush_events` and `wait_events` no longer observe
    /// resizes, so the application must call `mark_resized` itself.
    pub fn take_event_receiver(
        &mut self,
    ) -> Result<EventReceiver, WindowError> {
        self.event_receiver
            .take()
            .ok_or(WindowError::EventReceiverLost)
    }

    /// Raise the resized flag.
    pub fn mark_resized(&mut self) {
        self.framebuffer_resized = true;
    }

    pub fn should_close(&self) -> bool {
        self.window_handle.should_close()
    }

    fn drain_events(&mut self) -> Result<Vec<(f64, WindowEvent)>, WindowError> {
        let event_receiver = self
            .event_receiver
            .as_ref()
            .ok_or(WindowError::EventReceiverLost)?;
        let events: Vec<(f64, WindowEvent)> =
            glfw::flush_messages(event_receiver).collect();
        if events
            .iter()
            .any(|(_, event)| matches!(event, WindowEvent::FramebufferSize(..)))
        {
            log::trace!("Framebuffer resized");
            self.framebuffer_resized = true;
        }
        Ok(events)
    }
}

impl Window for GlfwWindow {
    fn extent(&self) -> vk::Extent2D {
        let (width, height) = self.window_handle.get_framebuffer_size();
        vk::Extent2D {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    fn was_resized(&self) -> bool {
        self.framebuffer_resized
    }

    fn reset_resized_flag(&mut self) {
        self.framebuffer_resized = false;
    }

    fn wait_events(&mut self) {
        self.glfw.wait_events();
        // Only the resize flag is kept, the drained events are discarded.
        if let Err(err) = self.drain_events() {
            log::warn!("Unable to observe resizes while waiting: {}", err);
        }
    }
}

impl std::ops::Deref for GlfwWindow {
    type Target = glfw::Window;

    fn deref(&self) -> &Self::Target {
        &self.window_handle
    }
}

impl std::ops::DerefMut for GlfwWindow {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.window_handle
    }
}
