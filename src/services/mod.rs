pub mod image_service;
pub mod introduce_service;

pub use image_service::{FileUpload, ImageService};
pub use introduce_service::{IntroduceCreateRequest, IntroduceService, IntroduceUpdateRequest};
