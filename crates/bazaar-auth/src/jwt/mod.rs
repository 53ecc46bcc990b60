//! Identity token encoding, decoding, and claims.

pub mod authority;
pub mod claims;
pub mod decoder;
pub mod encoder;

pub use authority::TokenAuthority;
pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
