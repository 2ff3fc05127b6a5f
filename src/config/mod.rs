pub mod load;
pub mod types;

pub use types::{
    Config, ContactSheetSettings, DEFAULT_ROW_SIZE, DEFAULT_SETTINGS_FILE, DEFAULT_THUMBNAIL_COUNT,
    DEFAULT_THUMBNAIL_SIZE, LabelPosition,
};
