use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::output::success_message;
use crate::storage::CourseStore;

#[derive(Args)]
pub struct ImportArgs {
    /// Course record JSON file (`id`, `title`, `commentList`)
    pub file: PathBuf,
}

pub fn handle_import(data_dir: PathBuf, args: ImportArgs) -> Result<()> {
    let mut store = CourseStore::open(&data_dir).or_else(|_| CourseStore::init(&data_dir))?;
    let course = store.import_course(&args.file)?;

    println!(
        "{}",
        success_message(&format!(
            "Imported course {} ({}) with {} review{}",
            course.id,
            course.title,
            course.comment_list.len(),
            if course.comment_list.len() == 1 { "" } else { "s" }
        ))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_import_command_initializes_store() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_path_buf();
        let file = data_dir.join("course.json");
        fs::write(
            &file,
            r#"{"id": "rust-101", "title": "Rust", "commentList": [
                {"id": 1, "authorId": "7", "authorName": "Minh", "createdAtDisplay": "2/1/2024", "body": "Good", "rating": 4}
            ]}"#,
        )
        .unwrap();

        handle_import(data_dir.clone(), ImportArgs { file }).expect("Import should succeed");

        let course = CourseStore::open(&data_dir)
            .unwrap()
            .get_course("rust-101")
            .unwrap();
        assert_eq!(course.comment_list.len(), 1);
        assert_eq!(course.comment_list[0].author_name, "Minh");
    }

    #[test]
    fn test_import_command_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_path_buf();
        let file = data_dir.join("broken.json");
        fs::write(&file, "{ not json").unwrap();

        assert!(handle_import(data_dir, ImportArgs { file }).is_err());
    }
}
