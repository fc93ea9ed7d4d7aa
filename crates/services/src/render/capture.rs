use std::collections::BTreeMap;

use quiz_core::model::Response;

use super::presentation::{Layout, Presentation};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Draft {
    Choice(Option<usize>),
    Matching(Vec<Option<usize>>),
    Text(String),
}

/// Provisional answer for one presentation, tracked by display position.
///
/// Every mutator returns the provisional [`Response`] after the change, or `None` when
/// the event did not apply (out-of-range index, wrong control for the layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCapture {
    draft: Draft,
}

impl ResponseCapture {
    #[must_use]
    pub fn new(presentation: &Presentation) -> Self {
        let draft = match presentation.layout() {
            Layout::Choice { .. } => Draft::Choice(None),
            Layout::Matching { items, .. } => Draft::Matching(vec![None; items.len()]),
            Layout::FillInBlank { .. } => Draft::Text(String::new()),
        };
        Self { draft }
    }

    pub fn select_option(&mut self, presentation: &Presentation, index: usize) -> Option<Response> {
        let Layout::Choice { options } = presentation.layout() else {
            return None;
        };
        let Draft::Choice(selected) = &mut self.draft else {
            return None;
        };
        let option = options.get(index)?;
        *selected = Some(index);
        Some(Response::Choice(option.clone()))
    }

    pub fn choose_match(
        &mut self,
        presentation: &Presentation,
        item: usize,
        choice: usize,
    ) -> Option<Response> {
        let Layout::Matching { matches, .. } = presentation.layout() else {
            return None;
        };
        if choice >= matches.len() {
            return None;
        }
        let Draft::Matching(chosen) = &mut self.draft else {
            return None;
        };
        *chosen.get_mut(item)? = Some(choice);
        self.response(presentation)
    }

    /// Replace the typed text, clipped to the layout's length limit.
    pub fn input_text(&mut self, presentation: &Presentation, text: &str) -> Option<Response> {
        let Layout::FillInBlank { max_len } = presentation.layout() else {
            return None;
        };
        let Draft::Text(current) = &mut self.draft else {
            return None;
        };
        *current = text.chars().take(*max_len).collect();
        Some(Response::Text(current.clone()))
    }

    /// The provisional response, if anything has been captured yet.
    #[must_use]
    pub fn response(&self, presentation: &Presentation) -> Option<Response> {
        match (&self.draft, presentation.layout()) {
            (Draft::Choice(selected), Layout::Choice { options }) => selected
                .and_then(|index| options.get(index))
                .map(|option| Response::Choice(option.clone())),
            (Draft::Matching(chosen), Layout::Matching { items, matches }) => {
                let pairs: BTreeMap<String, String> = items
                    .iter()
                    .zip(chosen)
                    .filter_map(|(item, choice)| {
                        choice
                            .and_then(|index| matches.get(index))
                            .map(|choice| (item.clone(), choice.clone()))
                    })
                    .collect();
                (!pairs.is_empty()).then_some(Response::Matching(pairs))
            }
            (Draft::Text(text), Layout::FillInBlank { .. }) => Some(Response::Text(text.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        match self.draft {
            Draft::Choice(selected) => selected,
            _ => None,
        }
    }

    #[must_use]
    pub fn chosen_match(&self, item: usize) -> Option<usize> {
        match &self.draft {
            Draft::Matching(chosen) => chosen.get(item).copied().flatten(),
            _ => None,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match &self.draft {
            Draft::Text(text) => text,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionId};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn matching_presentation() -> Presentation {
        let question = Question::matching(
            QuestionId::new(1),
            "Match",
            strings(&["A", "B"]),
            strings(&["X", "Y"]),
            BTreeMap::new(),
        )
        .unwrap();
        Presentation::present(&question)
    }

    #[test]
    fn choice_selection_reports_the_option_string() {
        let question =
            Question::true_false(QuestionId::new(2), "Sky is blue", strings(&["True", "False"]), "True")
                .unwrap();
        let presentation = Presentation::present(&question);
        let mut capture = ResponseCapture::new(&presentation);
        assert_eq!(capture.response(&presentation), None);

        let Layout::Choice { options } = presentation.layout() else {
            panic!("expected choice layout");
        };
        let response = capture.select_option(&presentation, 1).unwrap();
        assert_eq!(response, Response::Choice(options[1].clone()));
        assert_eq!(capture.selected_option(), Some(1));
        assert_eq!(capture.select_option(&presentation, 9), None);
        assert_eq!(capture.selected_option(), Some(1));
    }

    #[test]
    fn matching_builds_item_to_choice_map() {
        let presentation = matching_presentation();
        let Layout::Matching { items, matches } = presentation.layout().clone() else {
            panic!("expected matching layout");
        };
        let mut capture = ResponseCapture::new(&presentation);

        let Some(Response::Matching(pairs)) = capture.choose_match(&presentation, 0, 1) else {
            panic!("expected matching response");
        };
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs.get(&items[0]), Some(&matches[1]));

        let Some(Response::Matching(pairs)) = capture.choose_match(&presentation, 1, 0) else {
            panic!("expected matching response");
        };
        assert_eq!(pairs.get(&items[1]), Some(&matches[0]));
        assert_eq!(capture.chosen_match(1), Some(0));
        assert_eq!(capture.choose_match(&presentation, 5, 0), None);
    }

    #[test]
    fn text_input_is_clipped() {
        let question =
            Question::fill_in_blank(QuestionId::new(3), "Word?", strings(&["x"])).unwrap();
        let presentation = Presentation::present(&question);
        let mut capture = ResponseCapture::new(&presentation);
        let long = "a".repeat(40);
        let Some(Response::Text(text)) = capture.input_text(&presentation, &long) else {
            panic!("expected text response");
        };
        assert_eq!(text.chars().count(), 25);
        assert_eq!(capture.text().len(), 25);
        assert_eq!(capture.select_option(&presentation, 0), None);
    }
}
