pub mod serve;
pub mod submit;
