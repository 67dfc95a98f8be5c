//! Anything that has to wait on the outside world. For now that is only image loading.

pub mod image_loader;
