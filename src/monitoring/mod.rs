pub mod capture;

pub use capture::{start_capture, CaptureHandle, CaptureScheduler, CaptureState, CaptureUpdate};
