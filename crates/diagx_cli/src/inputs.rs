use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use diagx_engine::Upload;
use diagx_logging::{diagx_debug, diagx_info};

use crate::classify::classify;

/// Read every recognized input file into an upload, in argument order.
/// Directory entries are taken one level deep, sorted by name.
pub fn collect_uploads(inputs: &[PathBuf]) -> io::Result<Vec<Upload>> {
    let mut uploads = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|entry| entry.path())
                .collect();
            entries.sort();
            for path in entries {
                push_upload(&path, &mut uploads)?;
            }
        } else {
            push_upload(input, &mut uploads)?;
        }
    }
    Ok(uploads)
}

fn push_upload(path: &Path, uploads: &mut Vec<Upload>) -> io::Result<()> {
    let name = path.to_string_lossy().into_owned();
    let Some(category) = classify(&name) else {
        diagx_info!("Ignoring unrecognized file {:?}", path);
        return Ok(());
    };
    let bytes = fs::read(path)?;
    diagx_debug!("Queued {:?} as {:?} ({} bytes)", path, category, bytes.len());
    uploads.push(Upload::new(name, bytes, category));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::collect_uploads;
    use diagx_core::Category;
    use std::fs;

    #[test]
    fn directories_are_read_sorted_and_filtered() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(temp.path().join("b_core.log"), "b").unwrap();
        fs::write(temp.path().join("a.html"), "a").unwrap();
        fs::write(temp.path().join("notes.md"), "skip").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("c.txt"), "c").unwrap();

        let uploads = collect_uploads(&[temp.path().to_path_buf()]).unwrap();

        let cats: Vec<_> = uploads.iter().map(|u| u.category).collect();
        assert_eq!(cats, vec![Category::Html, Category::Log]);
        assert_eq!(uploads[1].bytes, b"b".to_vec());
        assert!(uploads[0].filename.ends_with("a.html"));
    }
}
