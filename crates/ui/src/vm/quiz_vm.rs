use quiz_core::model::{QuestionKind, Response};
use services::{
    Advance, CaptureStatus, Layout, Presentation, QuizLoopService, QuizPhase, QuizProgress,
    QuizSession, QuizSummary, ResponseCapture, SessionError,
};

use crate::views::ViewError;

use super::dropdown_vm::DropdownGroup;
use super::markup::sanitize_item_markup;

/// Every user action on the quiz screen, in display-order indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectOption(usize),
    ToggleDropdown(usize),
    ChooseMatch { item: usize, choice: usize },
    InputText(String),
    /// A click that landed outside every dropdown.
    CloseDropdowns,
    Submit,
    Advance,
    Restart,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Finished(QuizSummary),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceOptionView {
    pub label: String,
    pub selected: bool,
    /// Set on the selected option once graded.
    pub verdict: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRowView {
    /// Sanitized item markup.
    pub item_html: String,
    pub chosen: Option<String>,
    pub open: bool,
    pub verdict: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenBody {
    Choice { options: Vec<ChoiceOptionView> },
    Matching { rows: Vec<MatchRowView>, matches: Vec<String> },
    FillIn { text: String, max_len: usize },
}

/// Render snapshot of the question on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionScreen {
    pub prompt: String,
    pub kind: QuestionKind,
    pub body: ScreenBody,
    pub graded: bool,
    /// Whole-question verdict once graded. `None` for matching, which is graded per item.
    pub verdict: Option<bool>,
    pub can_submit: bool,
    pub can_advance: bool,
    pub progress: QuizProgress,
}

pub struct QuizVm {
    session: QuizSession,
    presentation: Option<Presentation>,
    capture: Option<ResponseCapture>,
    dropdowns: DropdownGroup,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        let mut vm = Self {
            session,
            presentation: None,
            capture: None,
            dropdowns: DropdownGroup::new(),
        };
        vm.present_current();
        vm
    }

    fn present_current(&mut self) {
        self.dropdowns.close_all();
        let Some(question) = self.session.current_question() else {
            self.presentation = None;
            self.capture = None;
            return;
        };
        let presentation = Presentation::present(question);
        self.capture = Some(ResponseCapture::new(&presentation));
        self.presentation = Some(presentation);
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    #[must_use]
    pub fn dropdowns(&self) -> DropdownGroup {
        self.dropdowns
    }

    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        self.session.summary()
    }

    fn edit(
        &mut self,
        apply: impl FnOnce(&mut ResponseCapture, &Presentation) -> Option<Response>,
    ) -> CaptureStatus {
        if self.session.phase() != QuizPhase::AwaitingResponse {
            return CaptureStatus::Ignored;
        }
        let (Some(capture), Some(presentation)) = (self.capture.as_mut(), self.presentation.as_ref())
        else {
            return CaptureStatus::Ignored;
        };
        match apply(capture, presentation) {
            Some(response) => self.session.capture(response),
            None => CaptureStatus::Ignored,
        }
    }

    pub fn select_option(&mut self, index: usize) -> CaptureStatus {
        self.edit(|capture, presentation| capture.select_option(presentation, index))
    }

    pub fn toggle_dropdown(&mut self, item: usize) {
        if self.session.phase() == QuizPhase::AwaitingResponse {
            self.dropdowns.toggle(item);
        }
    }

    pub fn choose_match(&mut self, item: usize, choice: usize) -> CaptureStatus {
        self.dropdowns.close_all();
        self.edit(|capture, presentation| capture.choose_match(presentation, item, choice))
    }

    pub fn input_text(&mut self, text: &str) -> CaptureStatus {
        self.edit(|capture, presentation| capture.input_text(presentation, text))
    }

    pub fn close_dropdowns(&mut self) {
        self.dropdowns.close_all();
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the session rejects the submission.
    pub fn submit(&mut self) -> Result<(), ViewError> {
        self.dropdowns.close_all();
        match self.session.submit() {
            Ok(grade) => {
                tracing::debug!(delta = grade.delta(), "submitted response");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "submit rejected");
                Err(ViewError::Unknown)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the current question is not graded.
    pub fn advance(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizOutcome, ViewError> {
        let advance = quiz_loop.advance(&mut self.session).map_err(|err| {
            tracing::warn!(error = %err, "advance rejected");
            ViewError::Unknown
        })?;
        self.present_current();
        Ok(match advance {
            Advance::Next => QuizOutcome::Continue,
            Advance::Finished(summary) => QuizOutcome::Finished(summary),
        })
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` before the quiz is finished and maps load failures
    /// like [`start_quiz`].
    pub async fn restart(&mut self, quiz_loop: &QuizLoopService) -> Result<(), ViewError> {
        quiz_loop
            .restart(&mut self.session)
            .await
            .map_err(view_error_from_session)?;
        self.present_current();
        Ok(())
    }

    /// Snapshot of the current question, or `None` once finished.
    #[must_use]
    pub fn screen(&self) -> Option<QuestionScreen> {
        let presentation = self.presentation.as_ref()?;
        let capture = self.capture.as_ref()?;
        let grade = self.session.current_grade();

        let body = match presentation.layout() {
            Layout::Choice { options } => ScreenBody::Choice {
                options: options
                    .iter()
                    .enumerate()
                    .map(|(index, label)| {
                        let selected = capture.selected_option() == Some(index);
                        ChoiceOptionView {
                            label: label.clone(),
                            selected,
                            verdict: grade
                                .filter(|_| selected)
                                .and_then(quiz_core::Grade::whole),
                        }
                    })
                    .collect(),
            },
            Layout::Matching { items, matches } => ScreenBody::Matching {
                rows: items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| MatchRowView {
                        item_html: sanitize_item_markup(item),
                        chosen: capture
                            .chosen_match(index)
                            .and_then(|choice| matches.get(choice))
                            .cloned(),
                        open: self.dropdowns.is_open(index),
                        verdict: grade.and_then(|grade| grade.item(item)),
                    })
                    .collect(),
                matches: matches.clone(),
            },
            Layout::FillInBlank { max_len } => ScreenBody::FillIn {
                text: capture.text().to_string(),
                max_len: *max_len,
            },
        };

        Some(QuestionScreen {
            prompt: presentation.prompt().to_string(),
            kind: presentation.kind(),
            body,
            graded: grade.is_some(),
            verdict: grade.and_then(quiz_core::Grade::whole),
            can_submit: self.session.can_submit(),
            can_advance: self.session.can_advance(),
            progress: self.session.progress(),
        })
    }
}

fn view_error_from_session(err: SessionError) -> ViewError {
    match err {
        SessionError::Empty => {
            tracing::warn!("question pool has no usable questions");
            ViewError::EmptySession
        }
        SessionError::Storage(err) => {
            tracing::error!(error = %err, "question pool failed to load");
            ViewError::LoadFailed
        }
        err => {
            tracing::warn!(error = %err, "quiz action rejected");
            ViewError::Unknown
        }
    }
}

/// Load the pool and open a quiz on its first question.
///
/// # Errors
///
/// Returns `ViewError::EmptySession` when no questions are available and
/// `ViewError::LoadFailed` when the pool cannot be fetched.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let session = quiz_loop
        .start_session()
        .await
        .map_err(view_error_from_session)?;
    Ok(QuizVm::new(session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use quiz_core::model::{Question, QuestionId, QuestionSet};
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemorySource;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn matching() -> Question {
        let key: BTreeMap<String, String> = [("A", "W"), ("B", "X")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Question::matching(
            QuestionId::new(1),
            "Match",
            strings(&["A", "B"]),
            strings(&["W", "X"]),
            key,
        )
        .unwrap()
    }

    fn vm(questions: Vec<Question>) -> QuizVm {
        let set = QuestionSet::from_ordered(questions);
        QuizVm::new(QuizSession::new(set, fixed_now()).unwrap())
    }

    fn position(values: &[String], wanted: &str) -> usize {
        values.iter().position(|value| value == wanted).unwrap()
    }

    fn matching_columns(vm: &QuizVm) -> (Vec<String>, Vec<String>) {
        match vm.presentation().unwrap().layout() {
            Layout::Matching { items, matches } => (items.clone(), matches.clone()),
            other => panic!("unexpected layout {other:?}"),
        }
    }

    #[test]
    fn choosing_a_match_closes_the_dropdown() {
        let mut vm = vm(vec![matching()]);
        vm.toggle_dropdown(0);
        vm.toggle_dropdown(1);
        assert_eq!(vm.dropdowns().open_index(), Some(1));

        let (items, matches) = matching_columns(&vm);
        let item = position(&items, "B");
        let choice = position(&matches, "X");
        assert_eq!(vm.choose_match(item, choice), CaptureStatus::Incomplete);
        assert_eq!(vm.dropdowns().open_index(), None);

        let Some(ScreenBody::Matching { rows, .. }) = vm.screen().map(|screen| screen.body) else {
            panic!("expected matching body");
        };
        assert_eq!(rows[item].chosen.as_deref(), Some("X"));
        assert!(rows[1 - item].chosen.is_none());
    }

    #[test]
    fn graded_matching_marks_each_row() {
        let mut vm = vm(vec![matching()]);
        let (items, matches) = matching_columns(&vm);
        let a = position(&items, "A");
        let b = position(&items, "B");
        vm.choose_match(a, position(&matches, "W"));
        assert_eq!(
            vm.choose_match(b, position(&matches, "W")),
            CaptureStatus::Complete
        );
        vm.submit().unwrap();

        let screen = vm.screen().unwrap();
        assert!(screen.graded);
        assert!(screen.can_advance);
        let ScreenBody::Matching { rows, .. } = screen.body else {
            panic!("expected matching body");
        };
        assert_eq!(rows[a].verdict, Some(true));
        assert_eq!(rows[b].verdict, Some(false));

        // Graded questions no longer accept edits or open dropdowns.
        assert_eq!(vm.choose_match(b, position(&matches, "X")), CaptureStatus::Ignored);
        vm.toggle_dropdown(0);
        assert_eq!(vm.dropdowns().open_index(), None);
    }

    #[tokio::test]
    async fn advance_past_last_question_finishes() {
        let question =
            Question::fill_in_blank(QuestionId::new(2), "Capital of France?", strings(&["Paris"]))
                .unwrap();
        let quiz_loop = QuizLoopService::new(
            fixed_clock(),
            Arc::new(InMemorySource::new(vec![question])),
        );
        let mut vm = start_quiz(&quiz_loop).await.unwrap();
        assert!(vm.submit().is_err());

        assert_eq!(vm.input_text("paris"), CaptureStatus::Complete);
        vm.submit().unwrap();
        assert_eq!(vm.screen().unwrap().verdict, Some(true));

        let QuizOutcome::Finished(summary) = vm.advance(&quiz_loop).unwrap() else {
            panic!("expected finish");
        };
        assert_eq!(summary.score_line(), "1 out of 1");
        assert!(vm.screen().is_none());

        vm.restart(&quiz_loop).await.unwrap();
        assert_eq!(vm.phase(), QuizPhase::AwaitingResponse);
        assert!(vm.screen().is_some());
    }

    #[tokio::test]
    async fn empty_pool_maps_to_empty_session() {
        let quiz_loop = QuizLoopService::new(fixed_clock(), Arc::new(InMemorySource::new(vec![])));
        let err = start_quiz(&quiz_loop).await.err();
        assert_eq!(err, Some(ViewError::EmptySession));
    }
}
