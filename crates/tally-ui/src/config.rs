use std::collections::BTreeMap;

use serde::Deserialize;

use crate::api::Operation;

const CLIENT_CONFIG_TOML: &str =
  include_str!("../assets/client.toml");

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ClientConfig {
  pub api:      ApiConfig,
  pub csrf:     CsrfConfig,
  pub ui:       UiConfig,
  pub messages: BTreeMap<String, Messages>
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ApiConfig {
  /// Prefix put in front of every
  /// `/api/...` path. Empty means same
  /// origin.
  pub base_url: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct CsrfConfig {
  pub cookie: String,
  pub header: String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct UiConfig {
  pub locale:      String,
  pub toast_ms:    u32,
  pub date_format: String
}

/// Localized strings. A locale table
/// may be partial; missing keys keep
/// the English default.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct Messages {
  pub load_tasks_failed:      String,
  pub load_categories_failed: String,
  pub load_stats_failed:      String,
  pub add_task_failed:        String,
  pub add_category_failed:    String,
  pub operation_failed:       String,
  pub task_added:             String,
  pub category_added:         String,
  pub operation_succeeded:    String,
  pub confirm_delete:         String,
  pub no_tasks:               String,
  pub no_categories:          String,
  pub loading:                String,
  pub adding:                 String,
  pub saving:                 String,
  pub choose_category:        String,
  pub priority_low:           String,
  pub priority_medium:        String,
  pub priority_high:          String,
  pub filter_all:             String,
  pub filter_active:          String,
  pub filter_completed:       String,
  pub filter_due_today:       String,
  pub filter_overdue:         String,
  pub search_placeholder:     String,
  pub tasks_heading:          String,
  pub categories_heading:     String,
  pub stats_heading:          String,
  pub total_label:            String,
  pub completed_label:        String,
  pub add_task:               String,
  pub add_category:           String,
  pub edit_task:              String,
  pub save:                   String,
  pub cancel:                 String,
  pub edit:                   String,
  pub delete:                 String,
  pub title_label:            String,
  pub description_label:      String,
  pub priority_label:         String,
  pub due_date_label:         String,
  pub category_label:         String,
  pub name_label:             String,
  pub color_label:            String
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: String::new()
    }
  }
}

impl Default for CsrfConfig {
  fn default() -> Self {
    Self {
      cookie: "csrf_token".to_string(),
      header: "X-CSRFToken".to_string()
    }
  }
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      locale:      "en".to_string(),
      toast_ms:    3_000,
      date_format: "%Y-%m-%d"
        .to_string()
    }
  }
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api:      ApiConfig::default(),
      csrf:     CsrfConfig::default(),
      ui:       UiConfig::default(),
      messages: BTreeMap::new()
    }
  }
}

impl Default for Messages {
  fn default() -> Self {
    let s = |value: &str| {
      value.to_string()
    };
    Self {
      load_tasks_failed:      s(
        "Failed to load tasks"
      ),
      load_categories_failed: s(
        "Failed to load categories"
      ),
      load_stats_failed:      s(
        "Failed to update statistics"
      ),
      add_task_failed:        s(
        "Failed to add the task"
      ),
      add_category_failed:    s(
        "Failed to add the category"
      ),
      operation_failed:       s(
        "The operation failed"
      ),
      task_added:             s(
        "Task added"
      ),
      category_added:         s(
        "Category added"
      ),
      operation_succeeded:    s("Done"),
      confirm_delete:         s(
        "Are you sure you want to \
         delete this task?"
      ),
      no_tasks:               s(
        "No tasks"
      ),
      no_categories:          s(
        "No categories"
      ),
      loading:                s(
        "Loading..."
      ),
      adding:                 s(
        "Adding..."
      ),
      saving:                 s(
        "Saving..."
      ),
      choose_category:        s(
        "-- Choose a category --"
      ),
      priority_low:           s("Low"),
      priority_medium:        s(
        "Medium"
      ),
      priority_high:          s("High"),
      filter_all:             s("All"),
      filter_active:          s(
        "Active"
      ),
      filter_completed:       s(
        "Completed"
      ),
      filter_due_today:       s(
        "Due today"
      ),
      filter_overdue:         s(
        "Overdue"
      ),
      search_placeholder:     s(
        "Search tasks..."
      ),
      tasks_heading:          s(
        "Tasks"
      ),
      categories_heading:     s(
        "Categories"
      ),
      stats_heading:          s(
        "Statistics"
      ),
      total_label:            s(
        "Total tasks"
      ),
      completed_label:        s(
        "Completed"
      ),
      add_task:               s(
        "Add task"
      ),
      add_category:           s(
        "Add category"
      ),
      edit_task:              s(
        "Edit task"
      ),
      save:                   s("Save"),
      cancel:                 s(
        "Cancel"
      ),
      edit:                   s("Edit"),
      delete:                 s(
        "Delete"
      ),
      title_label:            s(
        "Title"
      ),
      description_label:      s(
        "Description"
      ),
      priority_label:         s(
        "Priority"
      ),
      due_date_label:         s(
        "Due date"
      ),
      category_label:         s(
        "Category"
      ),
      name_label:             s("Name"),
      color_label:            s(
        "Color"
      )
    }
  }
}

impl Messages {
  /// Failure text shown when the given
  /// request does not succeed.
  pub fn failure(
    &self,
    operation: Operation
  ) -> &str {
    match operation {
      | Operation::LoadTasks => {
        &self.load_tasks_failed
      }
      | Operation::LoadCategories => {
        &self.load_categories_failed
      }
      | Operation::LoadStats => {
        &self.load_stats_failed
      }
      | Operation::AddTask => {
        &self.add_task_failed
      }
      | Operation::AddCategory => {
        &self.add_category_failed
      }
      | Operation::UpdateTask
      | Operation::DeleteTask => {
        &self.operation_failed
      }
    }
  }
}

impl ClientConfig {
  pub fn parse(
    raw: &str
  ) -> Result<Self, toml::de::Error> {
    toml::from_str(raw)
  }

  /// Embedded configuration, or the
  /// defaults when it does not parse.
  pub fn load() -> Self {
    match Self::parse(CLIENT_CONFIG_TOML)
    {
      | Ok(config) => {
        tracing::debug!(
          locale = %config.ui.locale,
          locales = config.messages.len(),
          "loaded client config"
        );
        config
      }
      | Err(error) => {
        tracing::error!(
          %error,
          "failed parsing embedded \
           client config; using \
           defaults"
        );
        Self::default()
      }
    }
  }

  pub fn messages(&self) -> Messages {
    match self
      .messages
      .get(&self.ui.locale)
    {
      | Some(messages) => {
        messages.clone()
      }
      | None => {
        tracing::warn!(
          locale = %self.ui.locale,
          "no messages for locale; \
           falling back to defaults"
        );
        Messages::default()
      }
    }
  }

  /// Absolute request path for an
  /// `/api/...` path.
  pub fn url(
    &self,
    path: &str
  ) -> String {
    format!(
      "{}{path}",
      self
        .api
        .base_url
        .trim_end_matches('/')
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn embedded_config_parses() {
    let config =
      ClientConfig::parse(
        CLIENT_CONFIG_TOML
      )
      .expect("embedded config parses");
    assert_eq!(
      config.csrf.cookie,
      "csrf_token"
    );
    assert_eq!(
      config.csrf.header,
      "X-CSRFToken"
    );
    assert!(
      config.messages.contains_key("en")
    );
    assert!(
      config.messages.contains_key("ar")
    );
  }

  #[test]
  fn partial_locale_keeps_defaults() {
    let config = ClientConfig::parse(
      r#"
        [ui]
        locale = "fr"

        [messages.fr]
        no_tasks = "Aucune tâche"
      "#
    )
    .expect("config parses");

    let messages = config.messages();
    assert_eq!(
      messages.no_tasks,
      "Aucune tâche"
    );
    assert_eq!(
      messages.load_tasks_failed,
      Messages::default()
        .load_tasks_failed
    );
    assert_eq!(config.ui.toast_ms, 3_000);
  }

  #[test]
  fn failure_messages_are_per_operation(
  ) {
    let messages = Messages::default();
    assert_ne!(
      messages
        .failure(Operation::LoadTasks),
      messages.failure(
        Operation::LoadCategories
      )
    );
    assert_eq!(
      messages
        .failure(Operation::UpdateTask),
      messages
        .failure(Operation::DeleteTask)
    );
  }

  #[test]
  fn url_joins_base_without_double_slash(
  ) {
    let mut config =
      ClientConfig::default();
    assert_eq!(
      config.url("/api/todos"),
      "/api/todos"
    );
    config.api.base_url =
      "https://todo.example/".to_string();
    assert_eq!(
      config.url("/api/stats"),
      "https://todo.example/api/stats"
    );
  }
}
