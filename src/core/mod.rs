pub mod errors;
pub mod interfaces;
pub mod models;
pub mod orchestrators;
pub mod services;

#[cfg(test)]
pub mod test_support;
