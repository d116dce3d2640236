//! View-models for everything the page
//! shows. The yew components only turn
//! these into markup, so equal inputs
//! always paint the same page.

use chrono::NaiveDate;
use tally_shared::{
  CategoryDto,
  CategoryId,
  StatsDto,
  TaskDto,
  TaskId,
  TaskPriority
};

use crate::config::Messages;
use crate::filters::{
  category_counts,
  is_overdue
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Severity {
  Success,
  Warning,
  Danger,
  Neutral
}

impl Severity {
  pub fn for_priority(
    priority: &TaskPriority
  ) -> Self {
    match priority {
      | TaskPriority::Low => Self::Success,
      | TaskPriority::Medium => {
        Self::Warning
      }
      | TaskPriority::High => Self::Danger,
      | TaskPriority::Other(_) => {
        Self::Neutral
      }
    }
  }

  pub fn class(self) -> &'static str {
    match self {
      | Self::Success => "bg-success",
      | Self::Warning => "bg-warning",
      | Self::Danger => "bg-danger",
      | Self::Neutral => "bg-secondary"
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct PriorityBadge {
  pub label:    String,
  pub severity: Severity,
  pub value:    String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct CategoryBadge {
  pub name:  String,
  pub color: String
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct DueRow {
  pub text:    String,
  pub overdue: bool
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskCard {
  pub id:          TaskId,
  pub title:       String,
  pub description: String,
  pub completed:   bool,
  pub priority:    Option<PriorityBadge>,
  pub category:    Option<CategoryBadge>,
  pub due:         Option<DueRow>
}

impl TaskCard {
  pub fn is_overdue(&self) -> bool {
    self
      .due
      .as_ref()
      .is_some_and(|due| due.overdue)
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum TaskListView {
  Loading(String),
  Empty(String),
  Cards(Vec<TaskCard>)
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct CategoryEntry {
  pub id:     CategoryId,
  pub name:   String,
  pub color:  String,
  pub count:  usize,
  pub active: bool
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum CategoryListView {
  Empty(String),
  Entries(Vec<CategoryEntry>)
}

#[derive(
  Debug, Clone, PartialEq,
)]
pub struct StatsView {
  pub total:     u64,
  pub completed: u64,
  pub percent:   f64
}

impl StatsView {
  pub fn width_style(&self) -> String {
    format!("width: {}%;", self.percent)
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct SelectOption {
  pub value: String,
  pub label: String
}

pub fn priority_label(
  priority: &TaskPriority,
  messages: &Messages
) -> String {
  match priority {
    | TaskPriority::Low => {
      messages.priority_low.clone()
    }
    | TaskPriority::Medium => {
      messages.priority_medium.clone()
    }
    | TaskPriority::High => {
      messages.priority_high.clone()
    }
    | TaskPriority::Other(raw) => {
      raw.clone()
    }
  }
}

pub fn task_card(
  task: &TaskDto,
  today: NaiveDate,
  date_format: &str,
  messages: &Messages
) -> TaskCard {
  TaskCard {
    id:          task.id,
    title:       task.title.clone(),
    description: task.description.clone(),
    completed:   task.completed,
    priority:    task.priority.as_ref().map(
      |priority| PriorityBadge {
        label:    priority_label(
          priority, messages
        ),
        severity: Severity::for_priority(
          priority
        ),
        value:    priority
          .as_str()
          .to_string()
      }
    ),
    category:    task.category.as_ref().map(
      |category| CategoryBadge {
        name:  category.name.clone(),
        color: category.color.clone()
      }
    ),
    due:         task.due_date.map(|due| {
      DueRow {
        text:    due
          .format(date_format)
          .to_string(),
        overdue: is_overdue(task, today)
      }
    })
  }
}

/// Cards in collection order, or the
/// placeholder when nothing matches.
pub fn task_list_view(
  view: &[TaskDto],
  today: NaiveDate,
  date_format: &str,
  messages: &Messages
) -> TaskListView {
  if view.is_empty() {
    return TaskListView::Empty(
      messages.no_tasks.clone()
    );
  }

  TaskListView::Cards(
    view
      .iter()
      .map(|task| {
        task_card(
          task,
          today,
          date_format,
          messages
        )
      })
      .collect()
  )
}

/// Counts come from `all_tasks`, never
/// from the filtered view.
pub fn category_list_view(
  categories: &[CategoryDto],
  all_tasks: &[TaskDto],
  scope: Option<CategoryId>,
  messages: &Messages
) -> CategoryListView {
  if categories.is_empty() {
    return CategoryListView::Empty(
      messages.no_categories.clone()
    );
  }

  let counts = category_counts(all_tasks);
  CategoryListView::Entries(
    categories
      .iter()
      .map(|category| CategoryEntry {
        id:     category.id,
        name:   category.name.clone(),
        color:  category.color.clone(),
        count:  counts
          .get(&category.id)
          .copied()
          .unwrap_or(0),
        active: scope == Some(category.id)
      })
      .collect()
  )
}

pub fn stats_view(
  stats: &StatsDto
) -> StatsView {
  StatsView {
    total:     stats.total,
    completed: stats.completed,
    percent:   stats
      .completion_rate()
      .clamp(0.0, 100.0)
  }
}

pub fn category_options(
  categories: &[CategoryDto],
  messages: &Messages
) -> Vec<SelectOption> {
  std::iter::once(SelectOption {
    value: String::new(),
    label: messages
      .choose_category
      .clone()
  })
  .chain(categories.iter().map(
    |category| SelectOption {
      value: category.id.to_string(),
      label: category.name.clone()
    }
  ))
  .collect()
}

/// Priority choices for a form. A
/// current value outside the fixed
/// three (blank or unrecognized) is kept
/// as the first option so it stays
/// selected and is sent back unchanged.
pub fn priority_options(
  current: &str,
  messages: &Messages
) -> Vec<SelectOption> {
  let fixed = [
    TaskPriority::Low,
    TaskPriority::Medium,
    TaskPriority::High
  ];
  let known = fixed
    .iter()
    .any(|priority| priority.as_str() == current);

  let kept = (!known).then(|| SelectOption {
    value: current.to_string(),
    label: current.to_string()
  });

  kept
    .into_iter()
    .chain(fixed.iter().map(|priority| {
      SelectOption {
        value: priority.as_str().to_string(),
        label: priority_label(
          priority, messages
        )
      }
    }))
    .collect()
}
