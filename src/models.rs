pub mod api_response;
pub mod applications;
pub mod defaults;
pub mod field_update;
pub mod jobs;
pub mod pagination;
pub mod users;

pub use self::api_response::ErrorBody;
pub use self::applications::{Application, ApplicationId, ApplicationView};
pub use self::field_update::FieldUpdate;
pub use self::jobs::{Job, JobId, JobView};
pub use self::pagination::Take;
pub use self::users::{Role, User, UserId, UserView};
