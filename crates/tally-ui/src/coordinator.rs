use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;

use tally_shared::{
  CategoryCreate,
  TaskCreate,
  TaskId,
  TaskPatch
};

use crate::api::{
  ApiError,
  Gateway
};
use crate::config::Messages;
use crate::store::{
  self,
  Applied,
  SharedStore
};

/// A control that can be busy while
/// its request is in flight. Toggle and
/// delete of one task share its row.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
)]
pub enum Control {
  TaskForm,
  CategoryForm,
  EditForm,
  TaskRow(TaskId)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Form {
  Task,
  Category,
  Edit
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Phase {
  Idle,
  Submitting,
  Succeeded,
  Failed
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NoticeKind {
  Success,
  Error
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Notice {
  pub kind:    NoticeKind,
  pub message: String
}

impl Notice {
  pub fn success(
    message: impl Into<String>
  ) -> Self {
    Self {
      kind:    NoticeKind::Success,
      message: message.into()
    }
  }

  pub fn error(
    message: impl Into<String>
  ) -> Self {
    Self {
      kind:    NoticeKind::Error,
      message: message.into()
    }
  }
}

/// What the coordinator needs from the
/// page.
pub trait Surface {
  fn notify(&self, notice: Notice);

  fn confirm(&self, prompt: &str) -> bool;

  fn reset_form(&self, form: Form);

  /// Repaint from the current store.
  fn refresh(&self);
}

/// Runs every user action as
/// mutate, reload, repaint, notify.
/// Nothing is applied locally before
/// the server confirms.
pub struct Coordinator<G, S> {
  gateway:  G,
  surface:  S,
  store:    SharedStore,
  messages: Messages,
  phases:   RefCell<BTreeMap<Control, Phase>>
}

/// Returns its control to `Idle` when
/// dropped, on every exit path.
struct InFlight<'a, G, S>
where
  S: Surface
{
  coordinator: &'a Coordinator<G, S>,
  control:     Control
}

impl<G, S> Drop for InFlight<'_, G, S>
where
  S: Surface
{
  fn drop(&mut self) {
    self
      .coordinator
      .phases
      .borrow_mut()
      .remove(&self.control);
    tracing::debug!(
      control = ?self.control,
      "control idle"
    );
    self.coordinator.surface.refresh();
  }
}

enum Reload {
  Tasks,
  TasksAndCategories
}

impl<G, S> Coordinator<G, S>
where
  G: Gateway,
  S: Surface
{
  pub fn new(
    gateway: G,
    surface: S,
    store: SharedStore,
    messages: Messages
  ) -> Self {
    Self {
      gateway,
      surface,
      store,
      messages,
      phases: RefCell::new(BTreeMap::new())
    }
  }

  pub fn store(&self) -> &SharedStore {
    &self.store
  }

  pub fn gateway(&self) -> &G {
    &self.gateway
  }

  pub fn surface(&self) -> &S {
    &self.surface
  }

  pub fn messages(&self) -> &Messages {
    &self.messages
  }

  pub fn phase(
    &self,
    control: Control
  ) -> Phase {
    self
      .phases
      .borrow()
      .get(&control)
      .copied()
      .unwrap_or(Phase::Idle)
  }

  pub fn is_busy(
    &self,
    control: Control
  ) -> bool {
    self.phase(control)
      == Phase::Submitting
  }

  /// Initial load. Each collection
  /// reports its own failure.
  pub async fn load_all(&self) {
    tracing::info!("loading initial state");
    self.reload_tasks().await;
    self.reload_categories().await;
    self.refresh_stats().await;
  }

  pub async fn create_task(
    &self,
    data: TaskCreate
  ) -> Phase {
    self
      .mutate(
        Control::TaskForm,
        Some(Form::Task),
        Reload::Tasks,
        &self.messages.task_added,
        || self.gateway.create_task(&data)
      )
      .await
  }

  pub async fn create_category(
    &self,
    data: CategoryCreate
  ) -> Phase {
    self
      .mutate(
        Control::CategoryForm,
        Some(Form::Category),
        Reload::TasksAndCategories,
        &self.messages.category_added,
        || {
          self
            .gateway
            .create_category(&data)
        }
      )
      .await
  }

  pub async fn edit_task(
    &self,
    id: TaskId,
    patch: TaskPatch
  ) -> Phase {
    self
      .mutate(
        Control::EditForm,
        Some(Form::Edit),
        Reload::Tasks,
        &self.messages.operation_succeeded,
        || {
          self
            .gateway
            .update_task(id, &patch)
        }
      )
      .await
  }

  pub async fn toggle_task(
    &self,
    id: TaskId,
    completed: bool
  ) -> Phase {
    let patch =
      TaskPatch::completion(completed);
    self
      .mutate(
        Control::TaskRow(id),
        None,
        Reload::Tasks,
        &self.messages.operation_succeeded,
        || {
          self
            .gateway
            .update_task(id, &patch)
        }
      )
      .await
  }

  /// Asks first; a declined prompt
  /// touches nothing and returns `Idle`.
  pub async fn delete_task(
    &self,
    id: TaskId
  ) -> Phase {
    if !self
      .surface
      .confirm(&self.messages.confirm_delete)
    {
      tracing::debug!(
        task = %id,
        "delete declined"
      );
      return Phase::Idle;
    }

    self
      .mutate(
        Control::TaskRow(id),
        None,
        Reload::Tasks,
        &self.messages.operation_succeeded,
        || self.gateway.delete_task(id)
      )
      .await
  }

  fn begin(
    &self,
    control: Control
  ) -> Option<InFlight<'_, G, S>> {
    {
      let mut phases =
        self.phases.borrow_mut();
      if phases.get(&control)
        == Some(&Phase::Submitting)
      {
        tracing::debug!(
          ?control,
          "ignoring submit while in \
           flight"
        );
        return None;
      }
      phases
        .insert(control, Phase::Submitting);
    }
    tracing::debug!(
      ?control,
      "control submitting"
    );
    self.surface.refresh();

    Some(InFlight {
      coordinator: self,
      control
    })
  }

  fn settle(
    &self,
    control: Control,
    phase: Phase
  ) {
    self
      .phases
      .borrow_mut()
      .insert(control, phase);
    tracing::debug!(
      ?control,
      ?phase,
      "control settled"
    );
  }

  /// Ends in `Succeeded` or `Failed`;
  /// `Submitting` means the control was
  /// already busy and nothing was sent.
  async fn mutate<F, Fut>(
    &self,
    control: Control,
    form: Option<Form>,
    reload: Reload,
    success: &str,
    request: F
  ) -> Phase
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), ApiError>>
  {
    let Some(_in_flight) =
      self.begin(control)
    else {
      return Phase::Submitting;
    };

    let outcome = match request().await {
      | Ok(()) => {
        if let Some(form) = form {
          self.surface.reset_form(form);
        }
        self.reload_tasks().await;
        if matches!(
          reload,
          Reload::TasksAndCategories
        ) {
          self.reload_categories().await;
        }
        self.refresh_stats().await;
        self
          .surface
          .notify(Notice::success(success));
        Phase::Succeeded
      }
      | Err(err) => {
        self.report(err);
        Phase::Failed
      }
    };

    self.settle(control, outcome);
    outcome
  }

  async fn reload_tasks(&self) {
    let result = store::reload_tasks(
      &self.store,
      &self.gateway
    )
    .await;
    self.after_reload(result);
  }

  async fn reload_categories(&self) {
    let result = store::reload_categories(
      &self.store,
      &self.gateway
    )
    .await;
    self.after_reload(result);
  }

  async fn refresh_stats(&self) {
    let result = store::refresh_stats(
      &self.store,
      &self.gateway
    )
    .await;
    self.after_reload(result);
  }

  fn after_reload(
    &self,
    result: Result<Applied, ApiError>
  ) {
    match result {
      | Ok(Applied::Replaced) => {
        self.surface.refresh()
      }
      | Ok(Applied::Stale) => {}
      | Err(err) => {
        self.report(err);
        // Repaint so a pending loading
        // placeholder goes away.
        self.surface.refresh();
      }
    }
  }

  fn report(&self, err: ApiError) {
    tracing::warn!(
      operation = ?err.operation(),
      error = ?err,
      "request failed"
    );
    self
      .surface
      .notify(Notice::error(err.to_string()));
  }
}
