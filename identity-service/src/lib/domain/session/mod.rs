pub mod models;
pub mod registry;

pub use models::RefreshTokenId;
pub use models::SessionRecord;
pub use registry::SessionRegistry;
