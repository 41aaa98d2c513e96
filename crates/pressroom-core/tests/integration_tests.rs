//! Pressroom Core Integration Tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use pressroom_core::application::account::{
    AuthenticateUser, AuthenticateUserInput, CreateUser, CreateUserInput, ListUsers, UpdateUser,
    UpdateUserInput,
};
use pressroom_core::application::category::{
    CreateCategory, CreateCategoryInput, DeleteCategory, GetCategory, ListCategories,
    UpdateCategory, UpdateCategoryInput,
};
use pressroom_core::application::post::{
    CreatePost, CreatePostInput, ImageUpload, UpdatePost, UpdatePostInput,
};
use pressroom_core::domain::account::{UserFilter, UserRepository, UserTokenRepository};
use pressroom_core::domain::category::Category;
use pressroom_core::domain::post::ImageField;
use pressroom_core::domain::search::{RawSearchQuery, SearchParams, SortDirection};
use pressroom_core::domain::SearchableRepository;
use pressroom_core::error::Error;
use pressroom_core::infrastructure::db::{
    Database, DatabaseConfig, SqliteCategoryRepository, SqliteUserRepository,
};
use pressroom_core::infrastructure::memory::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryUserRepository,
    InMemoryUserTokenRepository,
};
use pressroom_core::infrastructure::security::{Argon2PasswordHasher, Ed25519TokenGenerator};
use pressroom_core::infrastructure::LocalMediaStorage;

fn dated_category(name: &str, minutes_ago: i64) -> Category {
    let at = Utc::now() - Duration::minutes(minutes_ago);
    Category::restore(Uuid::new_v4(), name, None, true, at, at)
}

#[tokio::test]
async fn duplicate_category_name_is_rejected_before_persisting() {
    let repo = Arc::new(InMemoryCategoryRepository::new());
    let create = CreateCategory::new(repo.clone());

    create
        .execute(CreateCategoryInput {
            name: "X".into(),
            description: None,
            is_active: true,
        })
        .await
        .expect("first create succeeds");

    let err = create
        .execute(CreateCategoryInput {
            name: "X".into(),
            description: None,
            is_active: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));

    // no second row was persisted
    let result = repo.search(SearchParams::new()).await.unwrap();
    assert_eq!(result.total, 1);
}

#[tokio::test]
async fn listing_past_the_last_page_is_empty_but_truthful() {
    let repo = Arc::new(InMemoryCategoryRepository::new());
    for i in 0..5 {
        repo.insert(&dated_category(&format!("cat-{i}"), 10 - i))
            .await
            .unwrap();
    }

    let list = ListCategories::new(repo);
    let raw: RawSearchQuery =
        serde_json::from_value(json!({"page": 3, "per_page": 10})).unwrap();
    let output = list.execute(raw).await.unwrap();

    assert!(output.items.is_empty());
    assert_eq!(output.total, 5);
    assert_eq!(output.current_page, 3);
    assert_eq!(output.last_page, 1);
}

#[tokio::test]
async fn malformed_raw_input_degrades_to_defaults() {
    let repo = Arc::new(InMemoryCategoryRepository::new());
    repo.insert(&dated_category("Movies", 1)).await.unwrap();

    let list = ListCategories::new(repo);
    let raw: RawSearchQuery = serde_json::from_value(json!({
        "page": "bogus",
        "per_page": {},
        "sort": "",
        "sort_dir": 42,
        "filter": false
    }))
    .unwrap();
    let output = list.execute(raw).await.unwrap();

    assert_eq!(output.current_page, 1);
    assert_eq!(output.per_page, 15);
    assert_eq!(output.total, 1);
}

#[tokio::test]
async fn invalid_category_is_reported_with_every_field_error() {
    let repo = Arc::new(InMemoryCategoryRepository::new());
    let create = CreateCategory::new(repo.clone());

    let err = create
        .execute(CreateCategoryInput {
            name: "".into(),
            description: Some("d".repeat(1025)),
            is_active: true,
        })
        .await
        .unwrap_err();

    match err {
        Error::Validation(notification) => {
            assert!(notification.errors().contains_key("name"));
            assert!(notification.errors().contains_key("description"));
        }
        other => panic!("expected validation failure, got {other}"),
    }

    // nothing was persisted
    let result = repo.search(SearchParams::new()).await.unwrap();
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn category_crud_roundtrip() {
    let repo = Arc::new(InMemoryCategoryRepository::new());
    let created = CreateCategory::new(repo.clone())
        .execute(CreateCategoryInput {
            name: "Movies".into(),
            description: None,
            is_active: true,
        })
        .await
        .unwrap();

    let fetched = GetCategory::new(repo.clone()).execute(created.id).await.unwrap();
    assert_eq!(fetched.name, "Movies");

    let updated = UpdateCategory::new(repo.clone())
        .execute(UpdateCategoryInput {
            id: created.id,
            name: Some("Films".into()),
            description: Some("Feature films".into()),
            is_active: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Films");
    assert!(!updated.is_active);

    DeleteCategory::new(repo.clone()).execute(created.id).await.unwrap();
    let err = GetCategory::new(repo).execute(created.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "Category", .. }));
}

#[tokio::test]
async fn deleting_a_missing_category_reports_not_found() {
    let repo = Arc::new(InMemoryCategoryRepository::new());
    let id = Uuid::new_v4();
    let err = DeleteCategory::new(repo).execute(id).await.unwrap_err();
    match err {
        Error::NotFound { entity, id: missing } => {
            assert_eq!(entity, "Category");
            assert_eq!(missing, id);
        }
        other => panic!("expected not found, got {other}"),
    }
}

async fn seeded_users() -> (Arc<InMemoryUserRepository>, Arc<Argon2PasswordHasher>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let hasher = Arc::new(Argon2PasswordHasher::new());
    CreateUser::new(repo.clone(), hasher.clone())
        .execute(CreateUserInput {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "engine-001".into(),
            is_staff: true,
            is_superuser: false,
            is_active: true,
        })
        .await
        .expect("user creation succeeds");
    (repo, hasher)
}

#[tokio::test]
async fn duplicate_email_is_rejected_on_create_and_update() {
    let (repo, hasher) = seeded_users().await;

    let err = CreateUser::new(repo.clone(), hasher.clone())
        .execute(CreateUserInput {
            name: "Impostor".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));

    let grace = CreateUser::new(repo.clone(), hasher.clone())
        .execute(CreateUserInput {
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            password: "cobol".into(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
        })
        .await
        .unwrap();

    let err = UpdateUser::new(repo, hasher)
        .execute(UpdateUserInput {
            id: grace.id,
            email: Some("ada@example.com".into()),
            name: None,
            password: None,
            is_staff: None,
            is_superuser: None,
            is_active: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
}

#[tokio::test]
async fn list_users_ands_mapping_filter_fields() {
    let (repo, hasher) = seeded_users().await;
    CreateUser::new(repo.clone(), hasher)
        .execute(CreateUserInput {
            name: "Adam Smith".into(),
            email: "adam@elsewhere.org".into(),
            password: "wealth".into(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
        })
        .await
        .unwrap();

    let raw: RawSearchQuery = serde_json::from_value(json!({
        "filter": {"name": "ada", "email": "example.com"}
    }))
    .unwrap();
    let output = ListUsers::new(repo).execute(raw).await.unwrap();

    assert_eq!(output.total, 1);
    assert_eq!(output.items[0].email, "ada@example.com");
}

#[tokio::test]
async fn authentication_issues_a_decodable_token_and_persists_it() {
    let (users, hasher) = seeded_users().await;
    let tokens = Arc::new(InMemoryUserTokenRepository::new());
    let generator = Arc::new(Ed25519TokenGenerator::generate());

    let authenticate =
        AuthenticateUser::new(users.clone(), tokens.clone(), hasher, generator.clone());

    let output = authenticate
        .execute(AuthenticateUserInput {
            email: "ada@example.com".into(),
            password: "engine-001".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.token_type, "Bearer");
    assert_eq!(output.expires_in, 3600);
    assert_eq!(output.user.email, "ada@example.com");

    let claims = generator.decode(&output.token).expect("token verifies");
    assert_eq!(claims.email, "ada@example.com");
    assert!(claims.is_staff);

    let stored = tokens
        .find_by_refresh_token(&output.token)
        .await
        .unwrap()
        .expect("token row persisted");
    let ada = users.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(stored.user_id, ada.id);
}

#[tokio::test]
async fn bad_credentials_are_undifferentiated() {
    let (users, hasher) = seeded_users().await;
    let tokens = Arc::new(InMemoryUserTokenRepository::new());
    let generator = Arc::new(Ed25519TokenGenerator::generate());
    let authenticate = AuthenticateUser::new(users, tokens, hasher, generator);

    let wrong_password = authenticate
        .execute(AuthenticateUserInput {
            email: "ada@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    let unknown_user = authenticate
        .execute(AuthenticateUserInput {
            email: "nobody@example.com".into(),
            password: "engine-001".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    assert!(matches!(wrong_password, Error::InvalidCredentials));
    assert!(matches!(unknown_user, Error::InvalidCredentials));
}

struct PostFixture {
    posts: Arc<InMemoryPostRepository>,
    users: Arc<InMemoryUserRepository>,
    categories: Arc<InMemoryCategoryRepository>,
    storage: Arc<LocalMediaStorage>,
    author_id: Uuid,
    category_id: Uuid,
    _dir: tempfile::TempDir,
}

async fn post_fixture() -> PostFixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let (users, _) = seeded_users().await;
    let categories = Arc::new(InMemoryCategoryRepository::new());
    let category = Category::new("Movies", None, true);
    categories.insert(&category).await.unwrap();

    let author_id = users.find_by_email("ada@example.com").await.unwrap().unwrap().id;
    PostFixture {
        posts: Arc::new(InMemoryPostRepository::new()),
        users,
        categories,
        storage: Arc::new(LocalMediaStorage::new(dir.path())),
        author_id,
        category_id: category.id,
        _dir: dir,
    }
}

#[tokio::test]
async fn create_post_requires_author_and_category() {
    let f = post_fixture().await;
    let create = CreatePost::new(
        f.posts.clone(),
        f.users.clone(),
        f.categories.clone(),
        f.storage.clone(),
    );

    let err = create
        .execute(CreatePostInput {
            author_id: Uuid::new_v4(),
            category_id: f.category_id,
            title: "Hello".into(),
            content: "body".into(),
            is_published: true,
            image: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "User", .. }));

    let err = create
        .execute(CreatePostInput {
            author_id: f.author_id,
            category_id: Uuid::new_v4(),
            title: "Hello".into(),
            content: "body".into(),
            is_published: true,
            image: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound { entity: "Category", .. }));
}

#[tokio::test]
async fn create_post_stores_and_links_an_uploaded_image() {
    let f = post_fixture().await;
    let create = CreatePost::new(
        f.posts.clone(),
        f.users.clone(),
        f.categories.clone(),
        f.storage.clone(),
    );

    let output = create
        .execute(CreatePostInput {
            author_id: f.author_id,
            category_id: f.category_id,
            title: "Hello".into(),
            content: "body".into(),
            is_published: true,
            image: Some(ImageUpload {
                field: ImageField::Banner,
                file_name: "banner.png".into(),
                content: b"png-bytes".to_vec(),
                content_type: "image/png".into(),
            }),
        })
        .await
        .unwrap();

    let banner = output.banner.expect("banner slot is filled");
    assert_eq!(banner.name, "banner.png");
    assert_eq!(banner.location, format!("images/{}/banner.png", output.id));

    let written = std::fs::read(f._dir.path().join(&banner.location)).unwrap();
    assert_eq!(written, b"png-bytes");
}

#[tokio::test]
async fn post_title_uniqueness_is_checked_on_create_and_update() {
    let f = post_fixture().await;
    let create = CreatePost::new(
        f.posts.clone(),
        f.users.clone(),
        f.categories.clone(),
        f.storage.clone(),
    );

    let first = create
        .execute(CreatePostInput {
            author_id: f.author_id,
            category_id: f.category_id,
            title: "Hello".into(),
            content: "body".into(),
            is_published: true,
            image: None,
        })
        .await
        .unwrap();
    let second = create
        .execute(CreatePostInput {
            author_id: f.author_id,
            category_id: f.category_id,
            title: "Other".into(),
            content: "body".into(),
            is_published: true,
            image: None,
        })
        .await
        .unwrap();

    let err = create
        .execute(CreatePostInput {
            author_id: f.author_id,
            category_id: f.category_id,
            title: "Hello".into(),
            content: "body".into(),
            is_published: true,
            image: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));

    let err = UpdatePost::new(f.posts.clone())
        .execute(UpdatePostInput {
            id: second.id,
            title: Some("Hello".into()),
            content: None,
            is_published: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));

    // retitling to the current title is not a collision
    let unchanged = UpdatePost::new(f.posts)
        .execute(UpdatePostInput {
            id: first.id,
            title: Some("Hello".into()),
            content: Some("new body".into()),
            is_published: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(unchanged.content, "new body");
    assert!(!unchanged.is_published);
}

// ========== SQLite contract ==========

async fn sqlite_db() -> Database {
    Database::new(DatabaseConfig::in_memory())
        .await
        .expect("in-memory database opens")
}

#[tokio::test]
async fn sqlite_category_search_matches_the_reference_contract() {
    let db = sqlite_db().await;
    let repo = SqliteCategoryRepository::new(db.pool().clone());

    repo.bulk_insert(&[
        dated_category("Movies", 50),
        dated_category("Documentaries", 40),
        dated_category("Series", 30),
        dated_category("music", 20),
        dated_category("Musicals", 10),
    ])
    .await
    .unwrap();

    // filter: case-insensitive substring, total counted before slicing
    let params = SearchParams::new().with_filter("MUSIC".to_string());
    let result = repo.search(params).await.unwrap();
    assert_eq!(result.total, 2);

    // default sort: created_at descending
    let result = repo.search(SearchParams::new()).await.unwrap();
    let names: Vec<&str> = result.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Musicals", "music", "Series", "Documentaries", "Movies"]
    );

    // allow-listed sort ascending
    let params = SearchParams::new().with_sort("name", SortDirection::Asc);
    let result = repo.search(params).await.unwrap();
    let names: Vec<&str> = result.items.iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    // unknown sort fields fall back silently
    let params = SearchParams::new().with_sort("bogus; DROP TABLE", SortDirection::Asc);
    let result = repo.search(params).await.unwrap();
    assert_eq!(result.items[0].name, "Musicals");

    // out-of-range pages echo the request and keep the true total
    let params = SearchParams::new().with_page(3).with_per_page(10);
    let result = repo.search(params).await.unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.total, 5);
    assert_eq!(result.current_page, 3);
}

#[tokio::test]
async fn sqlite_update_and_delete_follow_the_contract() {
    let db = sqlite_db().await;
    let repo = SqliteCategoryRepository::new(db.pool().clone());

    let ghost = Category::new("Ghost", None, true);
    let err = repo.update(&ghost).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));

    // delete of a missing id stays a no-op
    assert!(repo.delete(Uuid::new_v4()).await.is_ok());

    let mut category = Category::new("Movies", None, true);
    repo.insert(&category).await.unwrap();
    category.change_name("Films");
    repo.update(&category).await.unwrap();

    let found = repo.find_by_id(category.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Films");

    let missing = Uuid::new_v4();
    let found = repo.find_by_ids(&[category.id, missing]).await.unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn sqlite_user_filter_ands_every_set_field() {
    let db = sqlite_db().await;
    let repo = SqliteUserRepository::new(db.pool().clone());

    let ada = pressroom_core::domain::account::User::new(
        "Ada Lovelace",
        "ada@example.com",
        "$argon2id$stub",
    )
    .with_staff(true);
    let grace = pressroom_core::domain::account::User::new(
        "Grace Hopper",
        "grace@example.com",
        "$argon2id$stub",
    );
    let adam = pressroom_core::domain::account::User::new(
        "Adam Smith",
        "adam@elsewhere.org",
        "$argon2id$stub",
    );
    repo.bulk_insert(&[ada.clone(), grace, adam]).await.unwrap();

    let filter = UserFilter {
        name: Some("ada".into()),
        email: Some("example.com".into()),
        ..Default::default()
    };
    let result = repo
        .search(SearchParams::new().with_filter(filter))
        .await
        .unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, ada.id);

    let filter = UserFilter {
        is_staff: Some(true),
        ..Default::default()
    };
    let result = repo
        .search(SearchParams::new().with_filter(filter))
        .await
        .unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].email, "ada@example.com");

    assert!(repo.find_by_email("ada@example.com").await.unwrap().is_some());
    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}
