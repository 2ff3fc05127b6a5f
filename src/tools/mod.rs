mod ffprobe_info;
mod output_name;
mod path_validator;
mod timestamp;

pub use ffprobe_info::{VideoInfo, get_video_info};
pub use output_name::derive_output_path;
pub use path_validator::{ensure_directory_exists, ensure_parent_exists, validate_file_exists};
pub use timestamp::Timestamp;
