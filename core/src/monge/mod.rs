//! Consistency checks for projections drawn in the Monge views.

pub mod validator;
pub use validator::ProjectionValidator;

#[cfg(test)]
mod tests_validator;
