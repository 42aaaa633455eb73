mod draft_loader;
mod http_submission_gateway;
mod summary;

pub use draft_loader::load_draft;
pub use http_submission_gateway::HttpSubmissionGateway;
pub use summary::render_summary;
