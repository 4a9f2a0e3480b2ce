pub mod ease_registry;

pub use ease_registry::EaseRegistry;
