use std::collections::BTreeMap;

use chrono::NaiveDate;
use tally_shared::{
  CategoryId,
  TaskDto
};

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum StatusFilter {
  #[default]
  All,
  Active,
  Completed,
  DueToday,
  Overdue
}

impl StatusFilter {
  pub const ORDERED: [Self; 5] = [
    Self::All,
    Self::Active,
    Self::Completed,
    Self::DueToday,
    Self::Overdue
  ];

  /// Unrecognized tags mean `All`.
  pub fn from_tag(tag: &str) -> Self {
    match tag {
      | "active" => Self::Active,
      | "completed" => Self::Completed,
      | "due-today" => Self::DueToday,
      | "overdue" => Self::Overdue,
      | _ => Self::All
    }
  }

  pub fn tag(self) -> &'static str {
    match self {
      | Self::All => "all",
      | Self::Active => "active",
      | Self::Completed => "completed",
      | Self::DueToday => "due-today",
      | Self::Overdue => "overdue"
    }
  }

  pub fn matches(
    self,
    task: &TaskDto,
    today: NaiveDate
  ) -> bool {
    match self {
      | Self::All => true,
      | Self::Active => !task.completed,
      | Self::Completed => task.completed,
      | Self::DueToday => {
        task.due_date == Some(today)
      }
      | Self::Overdue => {
        is_overdue(task, today)
      }
    }
  }
}

/// The axis that scopes the task view.
/// A status filter and a category scope
/// replace each other.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum PrimaryAxis {
  Status(StatusFilter),
  Category(CategoryId)
}

impl Default for PrimaryAxis {
  fn default() -> Self {
    Self::Status(StatusFilter::All)
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct ViewSelector {
  pub primary: PrimaryAxis,
  pub search:  String
}

impl ViewSelector {
  pub fn select_status(
    &mut self,
    filter: StatusFilter
  ) {
    self.primary =
      PrimaryAxis::Status(filter);
  }

  pub fn select_category(
    &mut self,
    id: CategoryId
  ) {
    self.primary =
      PrimaryAxis::Category(id);
  }

  pub fn set_search(
    &mut self,
    text: impl Into<String>
  ) {
    self.search = text.into();
  }

  /// Highlighted status filter, if the
  /// view is scoped by status.
  pub fn active_status(
    &self
  ) -> Option<StatusFilter> {
    match self.primary {
      | PrimaryAxis::Status(filter) => {
        Some(filter)
      }
      | PrimaryAxis::Category(_) => None
    }
  }

  pub fn category_scope(
    &self
  ) -> Option<CategoryId> {
    match self.primary {
      | PrimaryAxis::Category(id) => {
        Some(id)
      }
      | PrimaryAxis::Status(_) => None
    }
  }
}

/// Due strictly before `today` and
/// still open.
pub fn is_overdue(
  task: &TaskDto,
  today: NaiveDate
) -> bool {
  !task.completed
    && task
      .due_date
      .is_some_and(|due| due < today)
}

pub fn filter_by_status(
  tasks: &[TaskDto],
  filter: StatusFilter,
  today: NaiveDate
) -> Vec<TaskDto> {
  tasks
    .iter()
    .filter(|task| {
      filter.matches(task, today)
    })
    .cloned()
    .collect()
}

pub fn filter_by_category(
  tasks: &[TaskDto],
  category: Option<CategoryId>
) -> Vec<TaskDto> {
  let Some(category) = category else {
    return tasks.to_vec();
  };

  tasks
    .iter()
    .filter(|task| {
      task.category_id() == Some(category)
    })
    .cloned()
    .collect()
}

pub fn filter_by_search(
  tasks: &[TaskDto],
  text: &str
) -> Vec<TaskDto> {
  if text.is_empty() {
    return tasks.to_vec();
  }
  let q = text.to_lowercase();

  tasks
    .iter()
    .filter(|task| {
      task.title.to_lowercase().contains(&q)
        || task
          .description
          .to_lowercase()
          .contains(&q)
    })
    .cloned()
    .collect()
}

/// Tasks to display for `selector`:
/// the primary axis first, then search.
pub fn derive_view(
  tasks: &[TaskDto],
  selector: &ViewSelector,
  today: NaiveDate
) -> Vec<TaskDto> {
  let scoped = match selector.primary {
    | PrimaryAxis::Status(filter) => {
      filter_by_status(tasks, filter, today)
    }
    | PrimaryAxis::Category(id) => {
      filter_by_category(tasks, Some(id))
    }
  };
  filter_by_search(
    &scoped,
    &selector.search
  )
}

/// Tasks per category id over the
/// whole collection.
pub fn category_counts(
  tasks: &[TaskDto]
) -> BTreeMap<CategoryId, usize> {
  let mut counts = BTreeMap::new();
  for task in tasks {
    if let Some(id) = task.category_id() {
      *counts
        .entry(id)
        .or_insert(0_usize) += 1;
    }
  }
  counts
}
