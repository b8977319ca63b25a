// Library interface for the age calculator
pub mod age;
pub mod clock;
pub mod config;
pub mod i18n;
pub mod server;
pub mod validation;
