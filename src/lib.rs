//! Frame orchestration for a Vulkan renderer.
//!
//! The [renderer::Renderer] drives a swapchain and one command buffer per
//! in-flight frame through the begin/end frame cycle, rebuilding the
//! swapchain whenever the window or the presentation engine asks for it.
//! Windows, devices, and swapchains are supplied by the application through
//! the traits in [vulkan].

pub mod logging;
pub mod renderer;
pub mod vulkan;

#[cfg(feature = "glfw")]
pub mod glfw_window;
