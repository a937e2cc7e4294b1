pub mod formatters;
pub mod usecases;
