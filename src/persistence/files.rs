use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Environment variable that overrides the data directory
pub const HOME_ENV: &str = "TODOS_HOME";

/// Name of the per-project data directory
const LOCAL_DIR_NAME: &str = ".todos";

const LOG_FILE_NAME: &str = "todos.log";

/// Default file name for exports
pub const EXPORT_FILE_NAME: &str = "tasks.json";

/// Get the data directory - $TODOS_HOME, then a local .todos, then ~/.todos
pub fn get_todos_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_todos(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(LOCAL_DIR_NAME))
}

/// Find local .todos directory by walking up the directory tree
fn find_local_todos(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(LOCAL_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_todos_dir() -> Result<PathBuf> {
    let dir = get_todos_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .todos directory in the current directory
pub fn init_local_todos() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let todos_dir = current_dir.join(LOCAL_DIR_NAME);

    if todos_dir.exists() {
        anyhow::bail!("Todos directory already exists: {}", todos_dir.display());
    }

    fs::create_dir_all(&todos_dir)
        .with_context(|| format!("Failed to create directory: {}", todos_dir.display()))?;

    Ok(todos_dir)
}

/// Get path to meta.json (stores view settings between sessions)
pub fn meta_file() -> Result<PathBuf> {
    Ok(ensure_todos_dir()?.join("meta.json"))
}

/// Get path to the TUI log file. Ephemeral sessions log to the system
/// temp dir and leave the data directory untouched.
pub fn log_file(ephemeral: bool) -> Result<PathBuf> {
    if ephemeral {
        return Ok(env::temp_dir().join(LOG_FILE_NAME));
    }
    Ok(ensure_todos_dir()?.join(LOG_FILE_NAME))
}

/// Write via temp file + fsync + rename so readers never see a partial file
pub fn write_atomically(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    write_atomically(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Copy a file aside with a timestamp suffix, returning the backup path
pub fn backup_file<P: AsRef<Path>>(path: P) -> std::io::Result<PathBuf> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = path.with_extension(format!("bak.{}.json", timestamp));

    fs::copy(path, &backup_path)?;
    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_local_todos_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let local = temp_dir.path().join(".todos");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&local).unwrap();
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_todos(&nested), Some(local));
    }

    #[test]
    fn test_ephemeral_log_file_stays_out_of_data_dir() {
        let path = log_file(true).unwrap();

        assert!(path.starts_with(env::temp_dir()));
        assert_eq!(path.file_name().unwrap(), "todos.log");
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        atomic_write(&test_file, "[]").unwrap();
        assert_eq!(read_file(&test_file).unwrap(), "[]");

        atomic_write(&test_file, "[1]").unwrap();
        assert_eq!(read_file(&test_file).unwrap(), "[1]");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = read_file(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn test_backup_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("tasks.json");

        atomic_write(&test_file, "not json").unwrap();
        let backup_path = backup_file(&test_file).unwrap();

        assert_ne!(backup_path, test_file);
        assert_eq!(read_file(&backup_path).unwrap(), "not json");
    }
}
