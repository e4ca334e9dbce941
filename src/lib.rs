pub mod amount;
pub mod csv;
pub mod engine;
pub mod model;
pub mod seed;

pub use amount::Amount;
pub use engine::Engine;
pub use model::{CustomerId, Intent, RequestId, TxId};
