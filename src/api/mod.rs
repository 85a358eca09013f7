pub mod client;
pub mod error;
pub mod types;

pub use client::BoardClient;
pub use error::ApiError;
pub use types::{ErrorEnvelope, ErrorObject, MoveStatusRequest};

/// The single inbound contract the engine consumes: perform one remote
/// status transition for one card. The host decides transport, auth, and
/// endpoint shape; [`BoardClient`] is the shipped implementation and tests
/// supply mocks.
pub trait Mover {
    async fn move_status(&self, card_id: &str, target_status: &str) -> Result<(), ApiError>;
}
