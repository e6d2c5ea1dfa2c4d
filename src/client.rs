pub mod cve;
pub mod openai;
