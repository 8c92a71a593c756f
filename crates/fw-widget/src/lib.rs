pub mod api_client;
pub mod controller;
pub mod local_store;
pub mod pipeline;

pub use api_client::ApiClient;
pub use controller::{WidgetController, WidgetView};
pub use local_store::WidgetStorage;
pub use pipeline::{FeedbackForm, SubmissionContext, SubmissionPipeline};
