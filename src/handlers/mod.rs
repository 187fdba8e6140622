mod health;
mod metrics;
mod generate;
mod video;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use generate::{generate_image_handler, generate_video_handler, inpaint_image_handler};
pub use video::check_video_handler;
