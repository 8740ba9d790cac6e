use ash::vk;

/// The window which owns the presentation surface.
///
/// Resizes are observed rather than pushed: the window records that a resize
/// happened and the renderer polls (and clears) the flag at the end of every
/// frame.
pub trait Window {
    /// The current size of the window's drawable area in pixels.
    ///
    /// Either dimension is zero while the window is minimized.
    fn extent(&self) -> vk::Extent2D;

    /// True when the framebuffer has been resized since the flag was last
    /// reset.
    fn was_resized(&self) -> bool;

    /// Clear the resized flag.
    fn reset_resized_flag(&mut self);

    /// Block the calling thread until the next window or input event arrives.
    ///
    /// Only used while waiting for a minimized window to become drawable
    /// again.
    fn wait_events(&mut self);
}
