pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::permissions;
pub use domain::session;
pub use domain::user;
pub use outbound::repositories;
