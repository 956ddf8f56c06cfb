mod save_file;

pub use save_file::{load_list, save_list, save_path};
