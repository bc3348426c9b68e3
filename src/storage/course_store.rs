use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use super::config::StoreConfig;
use super::errors::{StorageError, StorageResult};
use super::gateway::PersistenceGateway;
use crate::common::{CourseId, CourseRecord, ReviewEntry, ReviewId};

const STORE_DIR: &str = ".edumart";
const COURSES_DIR: &str = "courses";
const CONFIG_FILE: &str = "config.yaml";

/// File-backed course records
///
/// `CourseStore` keeps one JSON document per course, shaped like the
/// marketplace's course record (`id`, `title`, `commentList`), and serves as the
/// [`PersistenceGateway`] for review mutations.
///
/// ## Layout
///
/// - **Courses**: `{data_dir}/.edumart/courses/{course_id}.json`
/// - **Config**: `{data_dir}/.edumart/config.yaml` (see [`StoreConfig`])
/// - **Writes**: each update goes to a temporary file in the same directory
///   which is then renamed over the record
///
/// ## Example Usage
///
/// ```rust,no_run
/// use edumart_reviews::storage::{CourseStore, PersistenceGateway};
/// use edumart_reviews::common::{CourseRecord, Identity, Rating, ReviewEntry};
///
/// let mut store = CourseStore::init(".")?;
/// store.create_course(CourseRecord::new("rust-101", "Rust for beginners"))?;
///
/// let author = Identity::new("42", "Lan");
/// let entry = ReviewEntry::new(1, &author, "5/3/2024".into(), "Great".into(), Rating::Five);
/// store.create_review("rust-101", &entry)?;
///
/// let course = store.get_course("rust-101")?;
/// println!("{} has {} reviews", course.title, course.comment_list.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CourseStore {
    root: PathBuf,
}

impl CourseStore {
    /// Open an existing store under `path`
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let root = path.as_ref().join(STORE_DIR);
        if !root.join(COURSES_DIR).is_dir() {
            return Err(StorageError::NotInitialized {
                path: root.display().to_string(),
            });
        }
        Ok(Self { root })
    }

    /// Create the store directories under `path`, keeping any existing data
    pub fn init<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let root = path.as_ref().join(STORE_DIR);
        fs::create_dir_all(root.join(COURSES_DIR))?;
        debug!("Initialized course store at {}", root.display());
        Ok(Self { root })
    }

    /// Store a new course record. Fails if the id is taken.
    pub fn create_course(&mut self, course: CourseRecord) -> StorageResult<()> {
        if self.course_exists(&course.id)? {
            return Err(StorageError::course_exists(&course.id));
        }
        self.write_course(&course)
    }

    /// Store a course record read from a JSON file, replacing any existing one
    pub fn import_course<P: AsRef<Path>>(&mut self, file: P) -> StorageResult<CourseRecord> {
        let data = fs::read(file.as_ref())?;
        let course: CourseRecord = serde_json::from_slice(&data)?;
        self.write_course(&course)?;
        debug!(
            "Imported course {} with {} reviews",
            course.id,
            course.comment_list.len()
        );
        Ok(course)
    }

    pub fn get_course(&self, course_id: &str) -> StorageResult<CourseRecord> {
        let path = self.course_path(course_id)?;
        if !path.is_file() {
            return Err(StorageError::course_not_found(course_id));
        }
        let data = fs::read(&path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn course_exists(&self, course_id: &str) -> StorageResult<bool> {
        Ok(self.course_path(course_id)?.is_file())
    }

    /// All stored course ids, sorted
    pub fn list_course_ids(&self) -> StorageResult<Vec<CourseId>> {
        let mut ids = Vec::new();
        for dir_entry in fs::read_dir(self.root.join(COURSES_DIR))? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn list_courses(&self) -> StorageResult<Vec<CourseRecord>> {
        self.list_course_ids()?
            .iter()
            .map(|id| self.get_course(id))
            .collect()
    }

    /// Read `config.yaml`; a missing file yields the default config
    pub fn config(&self) -> StorageResult<StoreConfig> {
        let path = self.root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(StoreConfig::default());
        }
        let yaml = fs::read_to_string(path)?;
        Ok(StoreConfig::from_yaml(&yaml)?)
    }

    /// Get the store's root directory
    pub fn path(&self) -> &Path {
        &self.root
    }

    // Private helper methods

    fn course_path(&self, course_id: &str) -> StorageResult<PathBuf> {
        let valid = !course_id.is_empty()
            && course_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::invalid_course_id(course_id));
        }
        Ok(self
            .root
            .join(COURSES_DIR)
            .join(format!("{}.json", course_id)))
    }

    fn write_course(&self, course: &CourseRecord) -> StorageResult<()> {
        let path = self.course_path(&course.id)?;
        let dir = self.root.join(COURSES_DIR);

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut temp, course)?;
        temp.flush()?;
        temp.persist(&path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    fn modify_course<F>(&mut self, course_id: &str, change: F) -> StorageResult<()>
    where
        F: FnOnce(&mut CourseRecord) -> StorageResult<()>,
    {
        let mut course = self.get_course(course_id)?;
        change(&mut course)?;
        self.write_course(&course)
    }
}

impl PersistenceGateway for CourseStore {
    fn create_review(&mut self, course_id: &str, entry: &ReviewEntry) -> StorageResult<()> {
        self.modify_course(course_id, |course| {
            if course.comment_list.iter().any(|e| e.id == entry.id) {
                return Err(StorageError::review_conflict(course_id, entry.id));
            }
            course.comment_list.insert(0, entry.clone());
            Ok(())
        })
    }

    fn update_review(&mut self, course_id: &str, entry: &ReviewEntry) -> StorageResult<()> {
        self.modify_course(course_id, |course| {
            let stored = course
                .comment_list
                .iter_mut()
                .find(|e| e.id == entry.id)
                .ok_or_else(|| StorageError::review_not_found(course_id, entry.id))?;
            stored.body = entry.body.clone();
            stored.rating = entry.rating;
            Ok(())
        })
    }

    fn delete_review(&mut self, course_id: &str, review_id: ReviewId) -> StorageResult<()> {
        self.modify_course(course_id, |course| {
            let index = course
                .comment_list
                .iter()
                .position(|e| e.id == review_id)
                .ok_or_else(|| StorageError::review_not_found(course_id, review_id))?;
            course.comment_list.remove(index);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::*;
    use tempfile::TempDir;

    fn setup_temp_store() -> (TempDir, CourseStore) {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let store = CourseStore::init(temp_dir.path()).expect("Failed to initialize course store");
        (temp_dir, store)
    }

    #[test]
    fn test_open_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            CourseStore::open(temp_dir.path()),
            Err(StorageError::NotInitialized { .. })
        ));

        CourseStore::init(temp_dir.path()).unwrap();
        let store = CourseStore::open(temp_dir.path()).expect("Should open after init");
        assert!(store.path().ends_with(".edumart"));
    }

    #[test]
    fn test_create_and_get_course() {
        let (_temp_dir, mut store) = setup_temp_store();
        let course = create_test_course("rust-101", &[(1, 5), (2, 3)]);

        store.create_course(course.clone()).unwrap();

        assert!(store.course_exists("rust-101").unwrap());
        assert_eq!(store.get_course("rust-101").unwrap(), course);
        assert!(matches!(
            store.create_course(course),
            Err(StorageError::CourseExists { .. })
        ));
    }

    #[test]
    fn test_missing_and_invalid_course_ids() {
        let (_temp_dir, store) = setup_temp_store();

        assert!(matches!(
            store.get_course("nope"),
            Err(StorageError::CourseNotFound { .. })
        ));
        assert!(matches!(
            store.get_course("../escape"),
            Err(StorageError::InvalidCourseId { .. })
        ));
        assert!(matches!(
            store.get_course(""),
            Err(StorageError::InvalidCourseId { .. })
        ));
    }

    #[test]
    fn test_list_courses_sorted() {
        let (_temp_dir, mut store) = setup_temp_store();
        store.create_course(CourseRecord::new("b-course", "B")).unwrap();
        store.create_course(CourseRecord::new("a-course", "A")).unwrap();

        assert_eq!(
            store.list_course_ids().unwrap(),
            vec!["a-course".to_string(), "b-course".to_string()]
        );
        assert_eq!(store.list_courses().unwrap().len(), 2);
    }

    #[test]
    fn test_import_course_from_file() {
        let (temp_dir, mut store) = setup_temp_store();
        let file = temp_dir.path().join("course.json");
        let course = create_test_course("go-201", &[(10, 4)]);
        fs::write(&file, serde_json::to_string(&course).unwrap()).unwrap();

        let imported = store.import_course(&file).unwrap();

        assert_eq!(imported, course);
        assert_eq!(store.get_course("go-201").unwrap(), course);
    }

    #[test]
    fn test_review_gateway_operations() {
        let (_temp_dir, mut store) = setup_temp_store();
        store
            .create_course(create_test_course("rust-101", &[(1, 5)]))
            .unwrap();

        let mut entry = create_test_review(2, 3);
        store.create_review("rust-101", &entry).unwrap();
        let course = store.get_course("rust-101").unwrap();
        assert_eq!(course.comment_list[0].id, 2);
        assert_eq!(course.comment_list.len(), 2);

        entry.body = "Updated".to_string();
        entry.rating = 4;
        store.update_review("rust-101", &entry).unwrap();
        let stored = store.get_course("rust-101").unwrap().comment_list[0].clone();
        assert_eq!(stored.body, "Updated");
        assert_eq!(stored.rating, 4);

        store.delete_review("rust-101", 2).unwrap();
        let course = store.get_course("rust-101").unwrap();
        assert_eq!(course.comment_list.len(), 1);
        assert_eq!(course.comment_list[0].id, 1);
    }

    #[test]
    fn test_review_gateway_errors() {
        let (_temp_dir, mut store) = setup_temp_store();
        store
            .create_course(create_test_course("rust-101", &[(1, 5)]))
            .unwrap();

        assert!(matches!(
            store.create_review("rust-101", &create_test_review(1, 2)),
            Err(StorageError::ReviewConflict { review_id: 1, .. })
        ));
        assert!(matches!(
            store.update_review("rust-101", &create_test_review(9, 2)),
            Err(StorageError::ReviewNotFound { review_id: 9, .. })
        ));
        assert!(matches!(
            store.delete_review("rust-101", 9),
            Err(StorageError::ReviewNotFound { review_id: 9, .. })
        ));
        assert!(matches!(
            store.create_review("missing", &create_test_review(3, 2)),
            Err(StorageError::CourseNotFound { .. })
        ));

        // Failed operations leave the record alone
        assert_eq!(store.get_course("rust-101").unwrap().comment_list.len(), 1);
    }

    #[test]
    fn test_config_defaults_and_reads_file() {
        let (_temp_dir, store) = setup_temp_store();
        assert_eq!(store.config().unwrap(), StoreConfig::default());

        fs::write(
            store.path().join("config.yaml"),
            "user:\n  id: \"42\"\n  name: Lan\n",
        )
        .unwrap();
        let config = store.config().unwrap();
        assert_eq!(config.user.id.as_deref(), Some("42"));
        assert_eq!(config.user.name.as_deref(), Some("Lan"));
    }
}
