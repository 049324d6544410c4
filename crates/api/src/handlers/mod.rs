mod models;
mod state;
mod files;
mod sanitize;
mod uploads;

#[cfg(test)]
mod test_support;

pub use models::AppState;
pub use files::{
    chgrp_path, chmod_path, chown_path, delete_path, exists_path, list_path, make_dir, read_file,
    rename_path, route_path,
    stat_path, touch_path, write_file,
};
pub use sanitize::sanitize_filename;
pub use uploads::upload_file;
