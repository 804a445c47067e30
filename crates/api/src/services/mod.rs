//! Application services: telemetry recorders, user administration, and
//! clients for external collaborator systems.

pub mod administration;
pub mod collaborators;
pub mod recorder;

pub use administration::{BanError, UserAdministration};
pub use collaborators::{AuthClient, CollaboratorError, FunctionsClient};
pub use recorder::{ActivityRecorder, RecordingFailure};
