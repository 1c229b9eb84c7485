pub mod applications;
pub mod jobs;
pub mod misc;
pub mod users;
