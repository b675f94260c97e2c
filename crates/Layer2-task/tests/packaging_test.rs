//! Packaging integration tests - layout and byte-for-byte reproducibility
//!
//! `cargo test -p sashimono-task --test packaging_test`

use sashimono_foundation::{Coordinate, JAR};
use sashimono_task::{ClassesDirectoryTask, JarResult, JarTask, Pipeline};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn write_class(root: &Path, rel: &str, data: &[u8], mtime: SystemTime) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, data).unwrap();
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

fn package(classes: &Path, output: &Path, parallel: bool) -> JarResult {
    let mut pipeline = Pipeline::new();
    pipeline.run(&ClassesDirectoryTask::new(classes)).unwrap();
    let task = JarTask::new(output, Coordinate::new("com.example", "app", "1.0"))
        .with_parallel_reads(parallel);
    pipeline.run(&task).unwrap().clone()
}

#[test]
fn test_scenario_two_classes() {
    let classes = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let now = SystemTime::now();
    write_class(classes.path(), "A.class", b"class A", now);
    write_class(classes.path(), "pkg/B.class", b"class B", now);

    let result = package(classes.path(), output.path(), true);

    let expected = output.path().join("com/example/app/1.0/app-1.0.jar");
    assert_eq!(result.path(), expected.as_path());
    assert_eq!(result.dependency.packaging_kind, JAR);
    assert_eq!(result.dependency.coordinate.to_string(), "com.example:app:1.0");
    assert!(result.dependency.classifier.is_none());

    let mut archive = zip::ZipArchive::new(fs::File::open(&expected).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);

    let mut names = Vec::new();
    for i in 0..archive.len() {
        let file = archive.by_index(i).unwrap();
        let ts = file.last_modified();
        assert_eq!(
            (ts.year(), ts.month(), ts.day(), ts.hour(), ts.minute(), ts.second()),
            (1980, 1, 1, 0, 0, 0),
            "entry {} must carry the fixed timestamp",
            file.name()
        );
        names.push(file.name().to_string());
    }
    assert_eq!(names, vec!["A.class", "pkg/B.class"]);
}

#[test]
fn test_identical_inputs_give_identical_bytes() {
    let first_classes = TempDir::new().unwrap();
    let second_classes = TempDir::new().unwrap();
    let first_out = TempDir::new().unwrap();
    let second_out = TempDir::new().unwrap();

    let early = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
    let late = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    // Same content, created in a different order and with different mtimes
    write_class(first_classes.path(), "A.class", b"alpha", early);
    write_class(first_classes.path(), "pkg/B.class", b"beta", early);
    write_class(first_classes.path(), "pkg/sub/C.class", b"gamma", early);
    write_class(second_classes.path(), "pkg/sub/C.class", b"gamma", late);
    write_class(second_classes.path(), "pkg/B.class", b"beta", late);
    write_class(second_classes.path(), "A.class", b"alpha", late);

    let first = package(first_classes.path(), first_out.path(), true);
    let second = package(second_classes.path(), second_out.path(), false);

    let first_bytes = fs::read(first.path()).unwrap();
    let second_bytes = fs::read(second.path()).unwrap();
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_repackaging_overwrites_in_place() {
    let classes = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let now = SystemTime::now();
    write_class(classes.path(), "A.class", b"v1", now);
    let first = package(classes.path(), output.path(), true);

    write_class(classes.path(), "A.class", b"v2 with more bytes", now);
    let second = package(classes.path(), output.path(), true);

    assert_eq!(first.path(), second.path());
    let version_dir = second.path().parent().unwrap();
    let files: Vec<_> = fs::read_dir(version_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files, vec!["app-1.0.jar"]);

    let mut archive = zip::ZipArchive::new(fs::File::open(second.path()).unwrap()).unwrap();
    let mut entry = archive.by_name("A.class").unwrap();
    let mut content = String::new();
    std::io::Read::read_to_string(&mut entry, &mut content).unwrap();
    assert_eq!(content, "v2 with more bytes");
}

#[test]
fn test_published_jar_result_is_readable_downstream() {
    let classes = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_class(classes.path(), "A.class", b"a", SystemTime::now());

    let mut pipeline = Pipeline::new();
    pipeline.run(&ClassesDirectoryTask::new(classes.path())).unwrap();
    pipeline
        .run(&JarTask::new(output.path(), Coordinate::new("g", "a", "1")))
        .unwrap();

    let results = pipeline.into_results();
    let kinds: Vec<_> = results.kinds().collect();
    assert_eq!(kinds, vec!["CompileResult", "JarResult"]);
    assert!(results.first::<JarResult>().unwrap().path().exists());
}

#[cfg(unix)]
#[test]
fn test_archive_is_readable_by_other_users() {
    use std::os::unix::fs::PermissionsExt;

    let classes = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_class(classes.path(), "A.class", b"a", SystemTime::now());

    let result = package(classes.path(), output.path(), true);
    let mode = fs::metadata(result.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
