pub mod debounce;
pub mod usecase;
