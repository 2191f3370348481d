pub use dry_mustache_macros::dry_mustache_directory as directory;
pub use dry_mustache_macros::dry_mustache_file as file;
pub use dry_mustache_macros::dry_mustache_str as str;

pub use dry_mustache_parser::*;
