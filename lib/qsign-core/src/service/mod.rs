pub mod credential;
pub mod error;
pub mod session;
pub mod sign;

#[cfg(test)]
pub(crate) mod test_utilities;
