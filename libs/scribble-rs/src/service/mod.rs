pub mod card_image;
pub mod logging;
pub mod session;
