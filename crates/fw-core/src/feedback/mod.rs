mod area;
mod change_kind;
mod draft;
mod entry;
mod id;
mod priority;

pub use area::SiteArea;
pub use change_kind::ChangeKind;
pub use draft::{FeedbackDraft, MISSING_REQUIRED_FIELDS};
pub use entry::FeedbackEntry;
pub use id::FeedbackId;
pub use priority::Priority;
