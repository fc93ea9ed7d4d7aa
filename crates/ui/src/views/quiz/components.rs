use dioxus::prelude::*;

use quiz_core::model::QuestionKind;
use services::QuizProgress;
use services::QuizSummary;

use super::dropdown::MatchDropdown;
use crate::vm::{ChoiceOptionView, MatchRowView, QuestionScreen, QuizIntent, ScreenBody};

fn verdict_class(verdict: Option<bool>) -> &'static str {
    match verdict {
        Some(true) => "correct",
        Some(false) => "incorrect",
        None => "",
    }
}

fn option_class(option: &ChoiceOptionView) -> String {
    let mut class = String::from("quiz-option");
    if option.selected {
        class.push_str(" selected");
    }
    match option.verdict {
        Some(true) => class.push_str(" correct"),
        Some(false) => class.push_str(" incorrect"),
        None => {}
    }
    class
}

fn kind_class(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::SingleChoice => "quiz-question--single-choice",
        QuestionKind::TrueFalse => "quiz-question--true-false",
        QuestionKind::Matching => "quiz-question--matching",
        QuestionKind::FillInBlank => "quiz-question--fill-in",
    }
}

#[component]
pub fn QuestionPanel(screen: QuestionScreen, on_intent: EventHandler<QuizIntent>) -> Element {
    let QuestionScreen {
        prompt,
        kind,
        body,
        graded,
        verdict,
        can_submit,
        can_advance,
        progress,
    } = screen;
    let question_class = format!(
        "quiz-question {} {}",
        kind_class(kind),
        verdict_class(verdict)
    );
    let disabled = graded;

    rsx! {
        ProgressBar { state: progress }
        div { class: "{question_class}",
            h2 { class: "quiz-prompt", "{prompt}" }
            match body {
                ScreenBody::Choice { options } => rsx! {
                    ChoiceQuestion { options, disabled, on_intent }
                },
                ScreenBody::Matching { rows, matches } => rsx! {
                    MatchingQuestion { rows, matches, disabled, on_intent }
                },
                ScreenBody::FillIn { text, max_len } => rsx! {
                    FillInQuestion { text, max_len, disabled, on_intent }
                },
            }
        }
        div { class: "quiz-actions",
            button {
                class: "btn btn-primary",
                id: "quiz-submit",
                r#type: "button",
                disabled: !can_submit,
                onclick: move |_| on_intent.call(QuizIntent::Submit),
                "Submit"
            }
            button {
                class: "btn btn-secondary",
                id: "quiz-next",
                r#type: "button",
                disabled: !can_advance,
                onclick: move |_| on_intent.call(QuizIntent::Advance),
                "Next"
            }
        }
    }
}

#[component]
fn ChoiceQuestion(
    options: Vec<ChoiceOptionView>,
    disabled: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "quiz-options", role: "radiogroup",
            for (index, option) in options.into_iter().enumerate() {
                label {
                    key: "{index}",
                    class: "{option_class(&option)}",
                    input {
                        r#type: "radio",
                        name: "quiz-option",
                        checked: option.selected,
                        disabled,
                        onchange: move |_| on_intent.call(QuizIntent::SelectOption(index)),
                    }
                    span { "{option.label}" }
                }
            }
        }
    }
}

#[component]
fn MatchingQuestion(
    rows: Vec<MatchRowView>,
    matches: Vec<String>,
    disabled: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        div { class: "quiz-matching",
            for (index, row) in rows.into_iter().enumerate() {
                div {
                    key: "{index}",
                    class: "quiz-matching__row {verdict_class(row.verdict)}",
                    // Item markup is sanitized down to presentational inline tags.
                    span { class: "quiz-matching__item", dangerous_inner_html: "{row.item_html}" }
                    MatchDropdown {
                        index,
                        chosen: row.chosen,
                        open: row.open,
                        matches: matches.clone(),
                        disabled,
                        on_intent,
                    }
                }
            }
        }
    }
}

#[component]
fn FillInQuestion(
    text: String,
    max_len: usize,
    disabled: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        input {
            class: "quiz-fill-in",
            id: "quiz-fill-in",
            r#type: "text",
            autocomplete: "off",
            maxlength: "{max_len}",
            value: "{text}",
            disabled,
            oninput: move |evt: FormEvent| on_intent.call(QuizIntent::InputText(evt.value())),
        }
    }
}

#[component]
fn ProgressBar(state: QuizProgress) -> Element {
    let max = state.bar_max();
    let value = state.bar_value();
    let label = format!("{} / {}", state.position, state.total);
    rsx! {
        div { class: "quiz-progress",
            progress { max: "{max}", value: "{value}" }
            span { class: "quiz-progress__label", "{label}" }
        }
    }
}

#[component]
pub fn FinalSummary(summary: QuizSummary, on_intent: EventHandler<QuizIntent>) -> Element {
    let line = format!("You scored {} possible points!", summary.score_line());
    rsx! {
        div { class: "quiz-final",
            h2 { class: "quiz-final__title", "Quiz complete" }
            p { class: "quiz-final__score", id: "quiz-score", "{line}" }
            button {
                class: "btn btn-primary",
                id: "quiz-restart",
                r#type: "button",
                onclick: move |_| on_intent.call(QuizIntent::Restart),
                "Restart"
            }
        }
    }
}
