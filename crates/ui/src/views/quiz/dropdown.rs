use dioxus::prelude::*;

use crate::vm::QuizIntent;

/// Label shown until a match is chosen.
pub const SELECT_LABEL: &str = "Select";

/// One item's match picker.
///
/// Clicks inside the widget stop propagating so the page-level outside-click handler
/// only sees clicks that missed every dropdown.
#[component]
pub fn MatchDropdown(
    index: usize,
    chosen: Option<String>,
    open: bool,
    matches: Vec<String>,
    disabled: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let label = chosen.unwrap_or_else(|| SELECT_LABEL.to_string());
    let class = if open { "dropdown open" } else { "dropdown" };
    let expanded = if open { "true" } else { "false" };

    rsx! {
        div {
            class: "{class}",
            onclick: move |evt: MouseEvent| evt.stop_propagation(),
            button {
                class: "dropdown__toggle",
                id: "match-toggle-{index}",
                r#type: "button",
                aria_expanded: "{expanded}",
                disabled,
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    on_intent.call(QuizIntent::ToggleDropdown(index));
                },
                "{label}"
            }
            if open {
                ul { class: "dropdown__menu", role: "listbox",
                    for (choice, text) in matches.into_iter().enumerate() {
                        li {
                            key: "{choice}",
                            class: "dropdown__option",
                            role: "option",
                            onclick: move |evt: MouseEvent| {
                                evt.stop_propagation();
                                on_intent.call(QuizIntent::ChooseMatch { item: index, choice });
                            },
                            "{text}"
                        }
                    }
                }
            }
        }
    }
}
