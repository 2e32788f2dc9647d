//! Shared helpers that sit below the handlers.
pub mod child_process;
pub mod modmask_lookup;
pub mod xkeysym_lookup;
