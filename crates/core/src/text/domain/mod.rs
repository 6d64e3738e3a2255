pub mod normalizer;
pub mod reference_token;
