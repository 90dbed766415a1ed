pub mod feedback;
pub mod session;

pub use feedback::Feedback;
pub use session::{EditSession, EditSettings, SaveError};
