//! A GLFW implementation of the renderer's window collaborator.

mod glfw_window;
mod window_error;

pub use self::{
    glfw_window::{EventReceiver, GlfwWindow},
    window_error::WindowError,
};
