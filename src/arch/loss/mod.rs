mod cross_entropy;
mod loss_fn;
mod mae;
mod mse;
mod objective;

pub use cross_entropy::CrossEntropy;
pub use loss_fn::LossFn;
pub use mae::Mae;
pub use mse::Mse;
pub use objective::{Loss, LossKind};
