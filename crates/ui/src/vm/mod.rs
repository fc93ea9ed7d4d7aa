mod dropdown_vm;
mod markup;
mod quiz_vm;

pub use dropdown_vm::DropdownGroup;
pub use markup::sanitize_item_markup;
pub use quiz_vm::{
    ChoiceOptionView, MatchRowView, QuestionScreen, QuizIntent, QuizOutcome, QuizVm, ScreenBody,
    start_quiz,
};
