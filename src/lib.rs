// Library surface for the binary, headless/integration tests and reuse.
pub mod achievements;
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod distractors;
pub mod error;
pub mod generator;
pub mod grade;
pub mod logging;
pub mod question;
pub mod randomizer;
pub mod runtime;
pub mod session;
pub mod timer;
pub mod topic;
pub mod ui;

pub use error::{MathFunError, Result};
pub use question::Question;
pub use session::{Notification, Session, SessionEvent};
