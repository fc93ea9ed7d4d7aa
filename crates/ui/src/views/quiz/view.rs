use dioxus::prelude::*;

use services::QuizLoopService;

use super::components::{FinalSummary, QuestionPanel};
use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

fn container_class(graded: bool, finished: bool) -> &'static str {
    match (graded, finished) {
        (_, true) => "quiz-container final",
        (true, false) => "quiz-container submitted",
        (false, false) => "quiz-container",
    }
}

fn apply_intent(
    vm: &mut QuizVm,
    quiz_loop: &QuizLoopService,
    intent: QuizIntent,
) -> Result<(), ViewError> {
    match intent {
        QuizIntent::SelectOption(index) => {
            vm.select_option(index);
        }
        QuizIntent::ToggleDropdown(item) => vm.toggle_dropdown(item),
        QuizIntent::ChooseMatch { item, choice } => {
            vm.choose_match(item, choice);
        }
        QuizIntent::InputText(text) => {
            vm.input_text(&text);
        }
        QuizIntent::CloseDropdowns => vm.close_dropdowns(),
        QuizIntent::Submit => vm.submit()?,
        QuizIntent::Advance => {
            vm.advance(quiz_loop)?;
        }
        // Needs the pool fetch; dispatched on its own task.
        QuizIntent::Restart => {}
    }
    Ok(())
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut vm = vm;
        async move {
            let started = start_quiz(&quiz_loop).await?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(resource);

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let mut error = error;
            let mut vm = vm;

            match intent {
                QuizIntent::Restart => {
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        let taken = vm.write().take();
                        let Some(mut vm_value) = taken else {
                            error.set(Some(ViewError::Unknown));
                            return;
                        };

                        let result = vm_value.restart(&quiz_loop).await;

                        // Put the quiz back even on failure so the summary stays visible.
                        vm.set(Some(vm_value));
                        error.set(result.err());
                    });
                }
                QuizIntent::CloseDropdowns => {
                    let any_open = vm
                        .peek()
                        .as_ref()
                        .is_some_and(|vm| vm.dropdowns().open_index().is_some());
                    if any_open {
                        if let Some(vm) = vm.write().as_mut() {
                            vm.close_dropdowns();
                        }
                    }
                }
                intent => {
                    let result = match vm.write().as_mut() {
                        Some(vm) => apply_intent(vm, &quiz_loop, intent),
                        None => Err(ViewError::Unknown),
                    };
                    error.set(result.err());
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let (screen, summary) = {
        let vm_guard = vm.read();
        (
            vm_guard.as_ref().and_then(QuizVm::screen),
            vm_guard.as_ref().and_then(QuizVm::summary),
        )
    };
    let graded = screen.as_ref().is_some_and(|screen| screen.graded);
    let class = container_class(graded, summary.is_some());

    rsx! {
        div {
            class: "page quiz-page",
            onclick: move |_| dispatch_intent.call(QuizIntent::CloseDropdowns),
            div { class: "{class}", id: "quiz-container",
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { class: "quiz-loading", "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "quiz-error", "{err.message()}" }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(err) = *error.read() {
                            p { class: "quiz-error", "{err.message()}" }
                        }
                        if let Some(summary) = summary {
                            FinalSummary { summary, on_intent: dispatch_intent }
                        } else if let Some(screen) = screen {
                            QuestionPanel { screen, on_intent: dispatch_intent }
                        }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
