//! The collaborators consumed by the renderer.
//!
//! The renderer never creates a window, a logical device, or a swapchain on
//! its own. Instead it is handed implementations of the traits in this module
//! and drives them through the frame lifecycle.

mod device;
mod render_device;
mod swapchain;
mod window;

pub use self::{
    device::Device,
    render_device::{RenderDevice, RenderDeviceError},
    swapchain::{Swapchain, SwapchainStatus},
    window::Window,
};
