mod submission_gateway;

pub use submission_gateway::{MockSubmissionGateway, QuoteSubmission, SubmissionGateway};
