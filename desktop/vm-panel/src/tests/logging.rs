use crate::{LOG_FILE_PREFIX, current_log_path};

use std::path::Path;

#[test]
fn given_log_dir_when_current_log_path_then_dated_file_inside_dir() {
    let log_dir = Path::new("/var/tmp/video-manager/logs");

    let path = current_log_path(log_dir);

    assert_eq!(path.parent(), Some(log_dir));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with(&format!("{LOG_FILE_PREFIX}.")));
    assert!(name.ends_with(".log"));
    // prefix, yyyy-mm-dd, suffix
    assert_eq!(name.len(), LOG_FILE_PREFIX.len() + 1 + 10 + 4);
}

#[test]
fn given_log_dir_when_current_log_path_then_named_by_utc_date() {
    let path = current_log_path(Path::new("logs"));

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    assert_eq!(
        path,
        Path::new("logs").join(format!("{LOG_FILE_PREFIX}.{today}.log"))
    );
}
