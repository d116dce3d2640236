mod category_list;
mod category_modal;
mod edit_task_modal;
mod filter_bar;
mod stats_panel;
mod task_form;
mod task_item;
mod task_list;
mod toast_stack;

pub use category_list::CategoryList;
pub use category_modal::CategoryModal;
pub use edit_task_modal::EditTaskModal;
pub use filter_bar::FilterBar;
pub use stats_panel::StatsPanel;
pub use task_form::{
  TaskFields,
  TaskForm
};
pub use task_item::TaskItem;
pub use task_list::TaskList;
pub use toast_stack::ToastStack;
