//! Rebuilding the swapchain when the presentation surface changes.

use {
    super::Renderer,
    crate::{
        renderer::RendererError,
        vulkan::{Device, Swapchain, Window},
    },
    ash::vk,
    std::sync::Arc,
};

impl<W: Window, S: Swapchain> Renderer<W, S> {
    /// Replace the swapchain with a new one which matches the window.
    ///
    /// The old swapchain is passed to the new swapchain's constructor and is
    /// kept alive until the two have been compared. A change in the image or
    /// depth format is fatal because render passes and pipelines built
    /// against the old formats would be invalid.
    pub(super) fn recreate_swapchain(&mut self) -> Result<(), RendererError> {
        let swapchain = build_swapchain(
            &mut self.window,
            &self.device,
            Some(&self.swapchain),
        )?;
        let old_swapchain = std::mem::replace(&mut self.swapchain, swapchain);

        let compatible =
            old_swapchain.compare_swapchain_formats(&self.swapchain);
        drop(old_swapchain);

        if !compatible {
            log::error!("Swapchain formats changed after rebuild");
            return Err(RendererError::SwapchainIncompatible);
        }

        log::info!(
            "Swapchain rebuilt with extent {:?}",
            self.swapchain.extent()
        );
        Ok(())
    }
}

/// Wait for a drawable window, wait for the device to idle, then create a
/// swapchain.
pub(super) fn build_swapchain<W: Window, S: Swapchain>(
    window: &mut W,
    device: &Arc<S::Device>,
    previous: Option<&S>,
) -> Result<S, RendererError> {
    let extent = wait_for_drawable_extent(window);
    device
        .wait_idle()
        .map_err(RendererError::DeviceWaitIdleFailure)?;
    S::new(device, extent, previous)
        .map_err(RendererError::SwapchainCreationFailure)
}

/// Block until both of the window's dimensions are nonzero.
///
/// Minimized windows report a zero extent, so this only returns once the
/// window is restored.
fn wait_for_drawable_extent<W: Window>(window: &mut W) -> vk::Extent2D {
    let mut extent = window.extent();
    if is_degenerate(extent) {
        log::warn!("Window is minimized, waiting for a drawable extent");
    }
    while is_degenerate(extent) {
        window.wait_events();
        extent = window.extent();
    }
    extent
}

fn is_degenerate(extent: vk::Extent2D) -> bool {
    extent.width == 0 || extent.height == 0
}
