
/// Conditional reservation update under concurrent callers
pub mod reservation_tests;
