mod common;

use serde_json::json;

use weeklog::models::Day;
use weeklog::repositories::{JsonFileRepository, WorkoutStore};

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_missing_file_reads_as_empty_week() {
    let dir = common::temp_dir();
    let path = dir.join("week.json");
    let repo = JsonFileRepository::new(&path);

    let record = repo.get_by_day(Day::Monday).await.unwrap();
    assert!(!record.is_rest_day);
    assert!(record.exercises.is_empty());
    assert!(repo.ping().await.is_ok());

    // Reading never creates the file
    assert!(!path.exists());
}

#[tokio::test]
async fn test_file_is_keyed_by_day_name() {
    let dir = common::temp_dir();
    let path = dir.join("week.json");
    let repo = JsonFileRepository::new(&path);

    repo.set_rest_day(Day::Monday).await.unwrap();
    repo.append_exercise(Day::Tuesday, "run 5k").await.unwrap();

    assert_eq!(
        read_json(&path),
        json!({
            "monday": { "rest": true, "exercises": [] },
            "tuesday": { "rest": false, "exercises": ["run 5k"] }
        })
    );
}

#[tokio::test]
async fn test_existing_file_is_loaded() {
    let dir = common::temp_dir();
    let path = dir.join("week.json");
    std::fs::write(
        &path,
        r#"{"friday": {"rest": false, "exercises": ["pullups", "dips"]}}"#,
    )
    .unwrap();

    let repo = JsonFileRepository::new(&path);
    let record = repo.get_by_day(Day::Friday).await.unwrap();
    assert_eq!(record.exercises, vec!["pullups", "dips"]);

    repo.append_exercise(Day::Friday, "rows").await.unwrap();
    assert_eq!(
        read_json(&path)["friday"]["exercises"],
        json!(["pullups", "dips", "rows"])
    );
}

#[tokio::test]
async fn test_writes_leave_no_temporary_files() {
    let dir = common::temp_dir();
    let path = dir.join("week.json");
    let repo = JsonFileRepository::new(&path);

    for i in 0..5 {
        repo.append_exercise(Day::Sunday, &format!("lap {i}"))
            .await
            .unwrap();
    }

    let entries: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["week.json".to_string()]);
}

#[tokio::test]
async fn test_corrupt_file_is_store_unavailable() {
    let dir = common::temp_dir();
    let path = dir.join("week.json");
    std::fs::write(&path, "{ not json").unwrap();

    let repo = JsonFileRepository::new(&path);

    let err = repo.get_by_day(Day::Monday).await.unwrap_err();
    assert!(err.is_store_unavailable());
    assert!(repo.ping().await.is_err());

    // A failed write must not replace the corrupt file with a partial week
    assert!(repo.set_rest_day(Day::Monday).await.is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn test_unreachable_directory_is_store_unavailable() {
    let dir = common::temp_dir();
    let path = dir.join("missing").join("week.json");
    let repo = JsonFileRepository::new(&path);

    let err = repo.append_exercise(Day::Monday, "squats").await.unwrap_err();
    assert!(err.is_store_unavailable());
}

#[tokio::test]
async fn test_non_lowercase_key_fails_whole_file() {
    let dir = common::temp_dir();
    let path = dir.join("week.json");
    std::fs::write(
        &path,
        r#"{"Monday": {"rest": true, "exercises": []}, "tuesday": {"rest": false, "exercises": ["rows"]}}"#,
    )
    .unwrap();

    let repo = JsonFileRepository::new(&path);

    let err = repo.get_by_day(Day::Tuesday).await.unwrap_err();
    assert!(err.is_store_unavailable());
    assert!(repo.append_exercise(Day::Tuesday, "dips").await.is_err());
}

#[tokio::test]
async fn test_temp_dir_is_removed_on_drop() {
    let dir = common::temp_dir();
    let root = dir.to_path_buf();
    let repo = JsonFileRepository::new(dir.join("week.json"));
    repo.set_rest_day(Day::Monday).await.unwrap();
    assert!(root.join("week.json").exists());

    drop(dir);
    assert!(!root.exists());
}
