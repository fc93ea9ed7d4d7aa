use std::collections::BTreeMap;
use std::sync::Arc;

use quiz_core::model::{Question, QuestionId};
use services::{Layout, QuizPhase};
use storage::repository::{InMemorySource, QuestionSource, StorageError};

use super::test_harness::setup_view_harness;
use crate::vm::{QuizIntent, QuizVm};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn planet_question() -> Question {
    Question::single_choice(
        QuestionId::new(0),
        "Largest planet?",
        strings(&["Mars", "Jupiter", "Venus"]),
        "Jupiter",
    )
    .unwrap()
}

fn icon_question() -> Question {
    let key: BTreeMap<String, String> = [
        (r#"<i class="fa-brands fa-rust"></i>"#, "Rust"),
        (r#"<i class="fa-brands fa-python"></i>"#, "Python"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    Question::matching(
        QuestionId::new(1),
        "Match the <logo> to its language",
        strings(&[
            r#"<i class="fa-brands fa-rust"></i>"#,
            r#"<i class="fa-brands fa-python" onclick="steal()"></i>"#,
        ]),
        strings(&["Rust", "Python"]),
        key,
    )
    .unwrap()
}

struct FailingSource;

#[async_trait::async_trait]
impl QuestionSource for FailingSource {
    async fn fetch_pool(&self) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }
}

struct StalledSource;

#[async_trait::async_trait]
impl QuestionSource for StalledSource {
    async fn fetch_pool(&self) -> Result<Vec<Question>, StorageError> {
        std::future::pending().await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_loading_before_pool_resolves() {
    let mut harness = setup_view_harness(Arc::new(StalledSource));
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("quiz-loading"), "missing loading line in {html}");
    assert!(!html.contains("Idle"), "internal state leaked in {html}");
    assert!(!html.contains("quiz-error"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let source = Arc::new(InMemorySource::new(vec![planet_question()]));
    let mut harness = setup_view_harness(source);
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("Largest planet?"), "missing prompt in {html}");
    assert!(html.contains("Jupiter"), "missing option in {html}");
    assert!(html.contains(r#"max="10""#), "missing progress max in {html}");
    assert!(html.contains(r#"value="10""#), "missing progress value in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
    assert!(!html.contains("submitted"), "unexpected marker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_runs_to_final_score_and_restarts() {
    let source = Arc::new(InMemorySource::new(vec![planet_question()]));
    let mut harness = setup_view_harness(source);
    harness.start().await;

    let correct = harness.with_vm(|vm| match vm.presentation().map(|p| p.layout()) {
        Some(Layout::Choice { options }) => options.iter().position(|o| o == "Jupiter"),
        _ => None,
    });
    harness.dispatch(QuizIntent::SelectOption(correct.unwrap()));
    harness.dispatch(QuizIntent::Submit);
    assert_eq!(harness.with_vm(QuizVm::phase), QuizPhase::Graded);

    let html = harness.render();
    assert!(html.contains("quiz-container submitted"), "missing marker in {html}");
    assert!(
        html.contains("quiz-question--single-choice correct"),
        "missing verdict in {html}"
    );

    harness.dispatch(QuizIntent::Advance);
    let html = harness.render();
    assert!(
        html.contains("You scored 1 out of 1 possible points!"),
        "missing score in {html}"
    );
    assert!(html.contains("quiz-container final"), "missing final marker in {html}");
    assert!(html.contains("Restart"), "missing restart in {html}");

    harness.dispatch(QuizIntent::Restart);
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Largest planet?"), "missing prompt after restart in {html}");
    assert_eq!(
        harness.with_vm(QuizVm::phase),
        QuizPhase::AwaitingResponse
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_matching_dropdowns_and_markup() {
    let source = Arc::new(InMemorySource::new(vec![icon_question()]));
    let mut harness = setup_view_harness(source);
    harness.start().await;

    let html = harness.render();
    assert!(html.contains("Select"), "missing placeholder in {html}");
    assert!(html.contains("fa-brands fa-rust"), "missing item markup in {html}");
    assert!(!html.contains("steal()"), "unsanitized handler in {html}");
    assert!(html.contains("&lt;logo&gt;"), "prompt not escaped in {html}");

    harness.dispatch(QuizIntent::ToggleDropdown(0));
    harness.dispatch(QuizIntent::ToggleDropdown(1));
    assert_eq!(harness.with_vm(|vm| vm.dropdowns().open_index()), Some(1));
    let html = harness.render();
    assert_eq!(html.matches("dropdown open").count(), 1, "one open dropdown in {html}");

    harness.dispatch(QuizIntent::CloseDropdowns);
    assert_eq!(harness.with_vm(|vm| vm.dropdowns().open_index()), None);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_load_failure() {
    let mut harness = setup_view_harness(Arc::new(FailingSource));
    harness.start().await;
    let html = harness.render();
    assert!(
        html.contains("Questions could not be loaded."),
        "missing error in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_empty_pool() {
    let mut harness = setup_view_harness(Arc::new(InMemorySource::new(vec![])));
    harness.start().await;
    let html = harness.render();
    assert!(html.contains("No questions available."), "missing message in {html}");
}
