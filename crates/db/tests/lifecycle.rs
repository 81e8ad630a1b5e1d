//! Repository-level tests for the project lifecycle:
//! creation, preview-code lookup, status transitions with feedback history,
//! and the single recommended/final version pointers.

use sqlx::PgPool;

use harmonia_core::status::ProjectStatus;
use harmonia_db::models::project::CreateProject;
use harmonia_db::models::version::CreateVersion;
use harmonia_db::repositories::{FeedbackRepo, ProjectRepo, VersionRepo};

fn new_project(code: Option<&str>) -> CreateProject {
    CreateProject {
        preview_code: code.map(str::to_string),
        client_name: "Helena Duarte".to_string(),
        client_email: "helena@example.com".to_string(),
        package_type: "single".to_string(),
        briefing_id: None,
        order_id: None,
        expires_at: None,
    }
}

fn new_version(name: &str) -> CreateVersion {
    CreateVersion {
        name: name.to_string(),
        description: None,
        audio_url: format!("https://audio.example.com/{name}.mp3"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_project_starts_waiting(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(Some("HAR-2025-001")))
        .await
        .unwrap();

    assert_eq!(project.status, ProjectStatus::Waiting);
    assert_eq!(project.preview_code.as_deref(), Some("HAR-2025-001"));
    assert!(project.recommended_version_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_by_preview_code(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project(Some("HAR-2025-001")))
        .await
        .unwrap();

    let found = ProjectRepo::find_by_preview_code(&pool, "HAR-2025-001")
        .await
        .unwrap()
        .expect("project should resolve by its code");
    assert_eq!(found.id, created.id);

    let missing = ProjectRepo::find_by_preview_code(&pool, "HAR-2025-999")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_preview_code_rejected(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project(Some("HAR-2025-001")))
        .await
        .unwrap();
    let result = ProjectRepo::create(&pool, &new_project(Some("HAR-2025-001"))).await;
    assert!(result.is_err(), "unique constraint should reject the code");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_feedback_transition_appends_one_entry(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(Some("HAR-2025-002")))
        .await
        .unwrap();

    let (updated, entry) = ProjectRepo::set_status_with_feedback(
        &pool,
        project.id,
        ProjectStatus::Feedback,
        "ajustar refrão",
    )
    .await
    .unwrap();

    assert_eq!(updated.status, ProjectStatus::Feedback);
    assert_eq!(entry.content, "ajustar refrão");

    let history = FeedbackRepo::list_for_project(&pool, project.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "ajustar refrão");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_versions_keep_insertion_order(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(None)).await.unwrap();

    VersionRepo::create(&pool, project.id, &new_version("v1")).await.unwrap();
    VersionRepo::create(&pool, project.id, &new_version("v2")).await.unwrap();
    VersionRepo::create(&pool, project.id, &new_version("v3")).await.unwrap();

    let versions = VersionRepo::list_for_project(&pool, project.id)
        .await
        .unwrap();
    let names: Vec<&str> = versions.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["v1", "v2", "v3"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_attach_version_updates_status_in_one_transaction(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(Some("HAR-2025-003")))
        .await
        .unwrap();
    ProjectRepo::set_status_with_feedback(&pool, project.id, ProjectStatus::Feedback, "menos bateria")
        .await
        .unwrap();

    let (updated, version) =
        ProjectRepo::attach_version(&pool, project.id, &new_version("v2"), ProjectStatus::Waiting)
            .await
            .unwrap();
    assert_eq!(updated.status, ProjectStatus::Waiting);
    assert_eq!(version.project_id, project.id);

    // Attaching to a missing project rolls back: no orphan version row.
    let result =
        ProjectRepo::attach_version(&pool, project.id + 1000, &new_version("v3"), ProjectStatus::Waiting)
            .await;
    assert!(result.is_err());
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM versions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_repointing_recommended_replaces_previous(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(None)).await.unwrap();
    let v1 = VersionRepo::create(&pool, project.id, &new_version("v1")).await.unwrap();
    let v2 = VersionRepo::create(&pool, project.id, &new_version("v2")).await.unwrap();

    let after_v1 = ProjectRepo::set_recommended_version(&pool, project.id, Some(v1.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_v1.recommended_version_id, Some(v1.id));

    // Re-pointing moves the single recommendation; two versions can never
    // both hold it.
    let after_v2 = ProjectRepo::set_recommended_version(&pool, project.id, Some(v2.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after_v2.recommended_version_id, Some(v2.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_recommended_version_clears_pointer(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(None)).await.unwrap();
    let v1 = VersionRepo::create(&pool, project.id, &new_version("v1")).await.unwrap();

    ProjectRepo::set_recommended_version(&pool, project.id, Some(v1.id))
        .await
        .unwrap();
    assert!(VersionRepo::delete(&pool, v1.id).await.unwrap());

    let reloaded = ProjectRepo::find_by_id(&pool, project.id)
        .await
        .unwrap()
        .unwrap();
    assert!(reloaded.recommended_version_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_project_cascades_versions_and_feedback(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project(None)).await.unwrap();
    VersionRepo::create(&pool, project.id, &new_version("v1")).await.unwrap();
    FeedbackRepo::create(&pool, project.id, "nota").await.unwrap();

    assert!(ProjectRepo::delete(&pool, project.id).await.unwrap());

    let versions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM versions")
        .fetch_one(&pool)
        .await
        .unwrap();
    let feedback: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((versions, feedback), (0, 0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_filters_by_client_substring(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project(Some("HAR-2025-001")))
        .await
        .unwrap();
    let mut other = new_project(Some("HAR-2025-002"));
    other.client_name = "Marcos Lima".to_string();
    other.client_email = "marcos@example.com".to_string();
    ProjectRepo::create(&pool, &other).await.unwrap();

    let all = ProjectRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = ProjectRepo::list(&pool, Some("helena")).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].client_name, "Helena Duarte");
}
