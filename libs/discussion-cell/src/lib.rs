pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{CreateDiscussionRequest, GroupDiscussion, PostDiscussionMessageRequest};
pub use router::discussion_routes;
