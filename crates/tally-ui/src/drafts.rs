use tally_shared::{
  CategoryCreate,
  CategoryId,
  DEFAULT_CATEGORY_COLOR,
  TaskCreate,
  TaskDto,
  TaskId,
  TaskPatch,
  TaskPriority,
  parse_due_date
};

/// Raw values of a task form, exactly
/// as the inputs hold them.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct TaskDraft {
  pub title:       String,
  pub description: String,
  pub priority:    String,
  pub due_date:    String,
  pub category_id: String
}

impl Default for TaskDraft {
  fn default() -> Self {
    Self {
      title:       String::new(),
      description: String::new(),
      priority:    "medium".to_string(),
      due_date:    String::new(),
      category_id: String::new()
    }
  }
}

impl TaskDraft {
  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      title:       task.title.clone(),
      description: task.description.clone(),
      priority:    task
        .priority
        .as_ref()
        .map(|priority| {
          priority.as_str().to_string()
        })
        .unwrap_or_default(),
      due_date:    task
        .due_date
        .map(|due| {
          due.format("%Y-%m-%d").to_string()
        })
        .unwrap_or_default(),
      category_id: task
        .category_id()
        .map(|id| id.to_string())
        .unwrap_or_default()
    }
  }

  pub fn to_create(&self) -> TaskCreate {
    TaskCreate {
      title:       self.title.clone(),
      description: self.description.clone(),
      priority:    TaskPriority::parse(
        &self.priority
      ),
      due_date:    parse_due_date(
        &self.due_date
      ),
      category_id: parse_category_id(
        &self.category_id
      )
    }
  }

  /// Full patch as the edit form sends
  /// it. An empty category clears it.
  pub fn to_patch(&self) -> TaskPatch {
    TaskPatch {
      title:       Some(self.title.clone()),
      description: Some(
        self.description.clone()
      ),
      completed:   None,
      priority:    TaskPriority::parse(
        &self.priority
      ),
      due_date:    parse_due_date(
        &self.due_date
      ),
      category_id: Some(parse_category_id(
        &self.category_id
      ))
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct EditDraft {
  pub id:     TaskId,
  pub fields: TaskDraft
}

impl EditDraft {
  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      id:     task.id,
      fields: TaskDraft::from_task(task)
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct CategoryDraft {
  pub name:  String,
  pub color: String
}

impl Default for CategoryDraft {
  fn default() -> Self {
    Self {
      name:  String::new(),
      color: DEFAULT_CATEGORY_COLOR
        .to_string()
    }
  }
}

impl CategoryDraft {
  pub fn to_create(
    &self
  ) -> CategoryCreate {
    CategoryCreate {
      name:  self.name.clone(),
      color: self.color.clone()
    }
  }
}

fn parse_category_id(
  value: &str
) -> Option<CategoryId> {
  value.trim().parse().ok().map(CategoryId)
}
