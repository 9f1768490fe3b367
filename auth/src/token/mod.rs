pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::AccessClaims;
pub use claims::RefreshClaims;
pub use codec::IssuedRefresh;
pub use codec::TokenCodec;
pub use errors::TokenError;
