use std::fmt;

use chrono::NaiveDate;
use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

pub const DEFAULT_CATEGORY_COLOR: &str =
  "#2575fc";

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Priority as the server spells it.
/// Values outside the known three are
/// kept verbatim in `Other`.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum TaskPriority {
  Low,
  Medium,
  High,
  Other(String)
}

impl TaskPriority {
  pub fn as_str(&self) -> &str {
    match self {
      | Self::Low => "low",
      | Self::Medium => "medium",
      | Self::High => "high",
      | Self::Other(raw) => raw
    }
  }

  /// Parses a form value. Blank input
  /// means "no priority".
  pub fn parse(
    value: &str
  ) -> Option<Self> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(Self::from(
        trimmed.to_string()
      ))
    }
  }
}

impl From<String> for TaskPriority {
  fn from(value: String) -> Self {
    match value.as_str() {
      | "low" => Self::Low,
      | "medium" => Self::Medium,
      | "high" => Self::High,
      | _ => Self::Other(value)
    }
  }
}

impl From<TaskPriority> for String {
  fn from(value: TaskPriority) -> Self {
    match value {
      | TaskPriority::Other(raw) => raw,
      | known => {
        known.as_str().to_string()
      }
    }
  }
}

/// Weak reference the server embeds
/// in each task. Only `id` decides
/// membership; name and color are
/// display conveniences.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CategoryRef {
  pub id:    CategoryId,
  #[serde(default)]
  pub name:  String,
  #[serde(default)]
  pub color: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:          TaskId,
  pub title:       String,
  #[serde(
    default,
    deserialize_with = "null_as_empty"
  )]
  pub description: String,
  #[serde(default)]
  pub completed:   bool,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub priority:    Option<TaskPriority>,
  #[serde(
    default,
    with = "due_date_format"
  )]
  pub due_date:    Option<NaiveDate>,
  #[serde(default)]
  pub category:    Option<CategoryRef>
}

impl TaskDto {
  pub fn category_id(
    &self
  ) -> Option<CategoryId> {
    self
      .category
      .as_ref()
      .map(|category| category.id)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CategoryDto {
  pub id:    CategoryId,
  pub name:  String,
  #[serde(
    default = "default_category_color"
  )]
  pub color: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CategoryStatDto {
  pub name:  String,
  pub count: u64
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct StatsDto {
  pub total:      u64,
  pub completed:  u64,
  #[serde(default)]
  pub categories: Vec<CategoryStatDto>
}

impl StatsDto {
  pub fn completion_rate(&self) -> f64 {
    completion_rate(
      self.total,
      self.completed
    )
  }
}

/// Percentage of completed tasks,
/// 0 when there are none.
pub fn completion_rate(
  total: u64,
  completed: u64
) -> f64 {
  if total == 0 {
    return 0.0;
  }
  completed as f64 * 100.0
    / total as f64
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskCreate {
  pub title:       String,
  pub description: String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub priority:    Option<TaskPriority>,
  #[serde(
    default,
    with = "due_date_format"
  )]
  pub due_date:    Option<NaiveDate>,
  pub category_id: Option<CategoryId>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CategoryCreate {
  pub name:  String,
  pub color: String
}

/// Partial update for `PUT
/// /api/todos/{id}`. Absent fields are
/// left out of the body so the server
/// keeps its current value.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(default)]
pub struct TaskPatch {
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub title:       Option<String>,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub completed:   Option<bool>,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub priority:    Option<TaskPriority>,
  #[serde(
    skip_serializing_if = "Option::is_none",
    with = "due_date_format"
  )]
  pub due_date:    Option<NaiveDate>,
  /// `Some(None)` clears the category.
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub category_id:
    Option<Option<CategoryId>>
}

impl TaskPatch {
  pub fn completion(
    completed: bool
  ) -> Self {
    Self {
      completed: Some(completed),
      ..Self::default()
    }
  }
}

/// Accepts `YYYY-MM-DD` as well as an
/// ISO datetime, keeping only its date.
pub fn parse_due_date(
  value: &str
) -> Option<NaiveDate> {
  let trimmed = value.trim();
  let date_part =
    trimmed.get(..10).unwrap_or(trimmed);
  NaiveDate::parse_from_str(
    date_part, "%Y-%m-%d"
  )
  .ok()
}

fn default_category_color() -> String {
  DEFAULT_CATEGORY_COLOR.to_string()
}

fn null_as_empty<'de, D>(
  deserializer: D
) -> Result<String, D::Error>
where
  D: Deserializer<'de>
{
  Ok(
    Option::<String>::deserialize(
      deserializer
    )?
    .unwrap_or_default()
  )
}

fn blank_as_none<'de, D>(
  deserializer: D
) -> Result<Option<TaskPriority>, D::Error>
where
  D: Deserializer<'de>
{
  let raw = Option::<String>::deserialize(
    deserializer
  )?;
  Ok(raw.as_deref().and_then(
    TaskPriority::parse
  ))
}

mod due_date_format {
  use chrono::NaiveDate;
  use serde::de::Error as _;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  pub fn serialize<S>(
    value: &Option<NaiveDate>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    match value {
      | Some(date) => serializer
        .serialize_str(
          &date
            .format("%Y-%m-%d")
            .to_string()
        ),
      | None => serializer.serialize_none()
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<NaiveDate>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      Option::<String>::deserialize(
        deserializer
      )?;
    match raw.as_deref().map(str::trim) {
      | None | Some("") => Ok(None),
      | Some(value) => {
        super::parse_due_date(value)
          .map(Some)
          .ok_or_else(|| {
            D::Error::custom(format!(
              "invalid due date \
               `{value}`"
            ))
          })
      }
    }
  }
}
