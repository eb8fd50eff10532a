pub mod domain;
pub mod plan;
pub mod ports;

pub use domain::{AuthSession, Credential, Focus, Grade, LessonDuration, ParseError, PlanRequest, Subject};
pub use plan::{PlanGenerator, DEFAULT_SCHOOL, TEACHING_MEDIA};
pub use ports::{CredentialStore, PortError, PortResult, SessionStore};
