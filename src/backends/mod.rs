//! Remote model backends.

pub mod groq;
