pub mod dispatch;
pub mod project;
pub mod provision;
pub mod read;
pub mod seed;
pub mod verify;
