pub mod clock;
pub(crate) mod retry_decorator;
