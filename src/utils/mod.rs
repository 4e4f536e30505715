pub mod file_operations;

pub use file_operations::{
    copy_file_overwrite, ensure_parent_dir, join_relative, write_file_overwrite,
};
