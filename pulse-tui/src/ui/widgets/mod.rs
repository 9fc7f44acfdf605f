mod dialog;
mod footer;
mod header;
mod spinner;
mod toast;

pub use dialog::{ConfirmDialog, DialogButton, DialogResult, DialogState};
pub use footer::render_footer;
pub use header::render_header;
pub use spinner::Spinner;
pub use toast::{render_toasts, Toast, ToastLevel, ToastManager};
