//! The staging pipeline steps, in execution order

mod ringtones;
mod runtime_files;
mod stamp;
mod translations;

pub use ringtones::copy_ringtones;
pub use runtime_files::copy_runtime_files;
pub use stamp::{current_revision, is_up_to_date, write_stamp};
pub use translations::release_and_copy_translations;
