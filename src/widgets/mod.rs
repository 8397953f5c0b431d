pub mod resize_handle;
pub mod toast;

pub use resize_handle::{paint_handle, ResizeHandle};
pub use toast::{Toast, ToastKind, Toasts, TOAST_DURATION};
