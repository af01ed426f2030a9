pub mod rules;
pub mod webhook;
