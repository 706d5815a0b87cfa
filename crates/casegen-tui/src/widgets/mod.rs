//! Widgets for the casegen TUI

mod documents;
mod editor_form;
mod generated;
mod header;
mod overlays;
mod preview;
mod signin;

pub use documents::{DocumentItem, DocumentList};
pub use editor_form::EditorForm;
pub use generated::GeneratedList;
pub use header::MainHeader;
pub use overlays::{centered_rect, ConfirmDiscardModal, InputModal, NoticeModal};
pub use preview::TestcasePreview;
pub use signin::{SignInScreen, UnconfiguredScreen};
