pub mod files;
pub mod metadata;
pub mod storage;
pub mod transfer;

pub use files::{ensure_todos_dir, init_local_todos, log_file, meta_file, EXPORT_FILE_NAME};
pub use metadata::{load_metadata, save_metadata, AppMetadata};
pub use storage::{load_tasks, save_tasks, FileStore, KeyValueStore, MemoryStore, TASKS_KEY};
pub use transfer::{export_to_file, import_from_file};
