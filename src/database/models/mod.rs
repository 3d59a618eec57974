pub mod image;
pub mod introduce;

pub use image::ImageDocument;
pub use introduce::{IntroduceDocument, ParseStatusError, Status};
