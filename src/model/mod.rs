pub mod attendance;
pub mod role;
pub mod theme;
pub mod user;
