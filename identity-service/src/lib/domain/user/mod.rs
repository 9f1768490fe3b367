pub mod errors;
pub mod models;

pub use errors::EmailError;
pub use errors::RoleError;
pub use errors::UserIdError;
pub use errors::UsernameError;
pub use models::EmailAddress;
pub use models::RegisterUserCommand;
pub use models::Role;
pub use models::User;
pub use models::UserId;
pub use models::UserProfile;
pub use models::Username;
