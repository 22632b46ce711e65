use std::fs;

use csvforge_generate::assets::{LexiconHandle, default_lexicon_path, load_lexicon};
use csvforge_generate::errors::GenerationError;

#[tokio::test]
async fn bundled_lexicon_loads_completely() {
    let lexicon = load_lexicon(&default_lexicon_path())
        .await
        .expect("load bundled lexicon");
    assert!(lexicon.is_complete());
}

#[tokio::test]
async fn missing_lexicon_marks_handle_unavailable() {
    let path = std::env::temp_dir().join(format!("csvforge_missing_{}.json", uuid::Uuid::new_v4()));
    let handle = LexiconHandle::pending();
    assert!(handle.is_pending());

    handle.resolve(load_lexicon(&path).await);

    assert!(!handle.is_ready());
    assert!(!handle.is_pending());
    let reason = handle.get().expect_err("unavailable");
    assert!(reason.contains("not found"), "{reason}");
}

#[tokio::test]
async fn blank_entries_are_dropped() {
    let path = std::env::temp_dir().join(format!("csvforge_lexicon_{}.json", uuid::Uuid::new_v4()));
    fs::write(
        &path,
        r#"{"maleFirstNames":[" Ivan ",""],"femaleFirstNames":["Anna"],"maleLastNames":["Petrov"]}"#,
    )
    .expect("write lexicon");

    let lexicon = load_lexicon(&path).await.expect("load lexicon");
    assert_eq!(lexicon.male_first_names, vec!["Ivan".to_string()]);
    assert!(!lexicon.is_complete());
}

#[tokio::test]
async fn malformed_lexicon_is_an_asset_error() {
    let path = std::env::temp_dir().join(format!("csvforge_lexicon_{}.json", uuid::Uuid::new_v4()));
    fs::write(&path, "not json").expect("write lexicon");

    let err = load_lexicon(&path).await.expect_err("invalid json");
    assert!(matches!(err, GenerationError::Asset(_)));
}

#[test]
fn resolved_handle_ignores_later_outcomes() {
    let handle = LexiconHandle::pending();
    handle.resolve(Err(GenerationError::Asset("boom".to_string())));
    handle.resolve(Ok(Default::default()));
    assert!(!handle.is_ready());
}
