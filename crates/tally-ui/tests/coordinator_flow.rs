use std::cell::{
  Cell,
  RefCell
};
use std::future::Future;
use std::pin::Pin;
use std::task::{
  Context,
  Poll
};

use futures::executor::block_on;
use tally_shared::{
  CategoryCreate,
  CategoryDto,
  CategoryId,
  CategoryRef,
  StatsDto,
  TaskCreate,
  TaskDto,
  TaskId,
  TaskPatch,
  TaskPriority
};
use tally_ui::api::{
  ApiError,
  Gateway,
  Operation
};
use tally_ui::config::Messages;
use tally_ui::coordinator::{
  Control,
  Coordinator,
  Form,
  Notice,
  NoticeKind,
  Phase,
  Surface
};
use tally_ui::filters::category_counts;
use tally_ui::store::StateStore;

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
enum Call {
  ListTasks,
  ListCategories,
  GetStats,
  CreateTask(String),
  CreateCategory(String),
  UpdateTask(TaskId),
  DeleteTask(TaskId)
}

/// Returns `Pending` once, so a second
/// action can start while the first is
/// in flight.
#[derive(Default)]
struct YieldOnce {
  yielded: bool
}

impl Future for YieldOnce {
  type Output = ();

  fn poll(
    mut self: Pin<&mut Self>,
    cx: &mut Context<'_>
  ) -> Poll<()> {
    if self.yielded {
      return Poll::Ready(());
    }
    self.yielded = true;
    cx.waker().wake_by_ref();
    Poll::Pending
  }
}

/// In-memory task service that records
/// every call it receives.
#[derive(Default)]
struct ScriptedGateway {
  tasks:           RefCell<Vec<TaskDto>>,
  categories:      RefCell<Vec<CategoryDto>>,
  next_id:         Cell<i64>,
  calls:           RefCell<Vec<Call>>,
  fail:            RefCell<Vec<Operation>>,
  yield_on_create: Cell<bool>
}

impl ScriptedGateway {
  fn with_category(
    self,
    id: i64,
    name: &str
  ) -> Self {
    self.categories.borrow_mut().push(
      CategoryDto {
        id:    CategoryId(id),
        name:  name.to_string(),
        color: "#2575fc".to_string()
      }
    );
    self
  }

  fn with_task(
    self,
    id: i64,
    title: &str
  ) -> Self {
    self.tasks.borrow_mut().push(TaskDto {
      id:          TaskId(id),
      title:       title.to_string(),
      description: String::new(),
      completed:   false,
      priority:    Some(TaskPriority::Medium),
      due_date:    None,
      category:    None
    });
    self.next_id.set(id);
    self
  }

  fn failing(
    self,
    operation: Operation
  ) -> Self {
    self.fail.borrow_mut().push(operation);
    self
  }

  fn calls(&self) -> Vec<Call> {
    self.calls.borrow().clone()
  }

  fn record(
    &self,
    call: Call,
    operation: Operation
  ) -> Result<(), ApiError> {
    self.calls.borrow_mut().push(call);
    if self.fail.borrow().contains(&operation)
    {
      return Err(ApiError::RequestFailed {
        operation,
        status: Some(500),
        message: Messages::default()
          .failure(operation)
          .to_string()
      });
    }
    Ok(())
  }

  fn category_ref(
    &self,
    id: Option<CategoryId>
  ) -> Option<CategoryRef> {
    let id = id?;
    self
      .categories
      .borrow()
      .iter()
      .find(|category| category.id == id)
      .map(|category| CategoryRef {
        id:    category.id,
        name:  category.name.clone(),
        color: category.color.clone()
      })
  }

  fn fresh_id(&self) -> i64 {
    let id = self.next_id.get() + 1;
    self.next_id.set(id);
    id
  }
}

impl Gateway for ScriptedGateway {
  async fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, ApiError> {
    self.record(
      Call::ListTasks,
      Operation::LoadTasks
    )?;
    Ok(self.tasks.borrow().clone())
  }

  async fn list_categories(
    &self
  ) -> Result<Vec<CategoryDto>, ApiError>
  {
    self.record(
      Call::ListCategories,
      Operation::LoadCategories
    )?;
    Ok(self.categories.borrow().clone())
  }

  async fn get_stats(
    &self
  ) -> Result<StatsDto, ApiError> {
    self.record(
      Call::GetStats,
      Operation::LoadStats
    )?;
    let tasks = self.tasks.borrow();
    Ok(StatsDto {
      total:      tasks.len() as u64,
      completed:  tasks
        .iter()
        .filter(|task| task.completed)
        .count() as u64,
      categories: Vec::new()
    })
  }

  async fn create_task(
    &self,
    data: &TaskCreate
  ) -> Result<(), ApiError> {
    if self.yield_on_create.get() {
      YieldOnce::default().await;
    }
    self.record(
      Call::CreateTask(data.title.clone()),
      Operation::AddTask
    )?;
    let task = TaskDto {
      id:          TaskId(self.fresh_id()),
      title:       data.title.clone(),
      description: data.description.clone(),
      completed:   false,
      priority:    data.priority.clone(),
      due_date:    data.due_date,
      category:    self
        .category_ref(data.category_id)
    };
    self.tasks.borrow_mut().push(task);
    Ok(())
  }

  async fn create_category(
    &self,
    data: &CategoryCreate
  ) -> Result<(), ApiError> {
    self.record(
      Call::CreateCategory(data.name.clone()),
      Operation::AddCategory
    )?;
    let id = CategoryId(self.fresh_id());
    self.categories.borrow_mut().push(
      CategoryDto {
        id,
        name: data.name.clone(),
        color: data.color.clone()
      }
    );
    Ok(())
  }

  async fn update_task(
    &self,
    id: TaskId,
    patch: &TaskPatch
  ) -> Result<(), ApiError> {
    self.record(
      Call::UpdateTask(id),
      Operation::UpdateTask
    )?;
    let mut tasks = self.tasks.borrow_mut();
    if let Some(task) =
      tasks.iter_mut().find(|task| task.id == id)
    {
      if let Some(completed) = patch.completed
      {
        task.completed = completed;
      }
      if let Some(title) = &patch.title {
        task.title = title.clone();
      }
    }
    Ok(())
  }

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), ApiError> {
    self.record(
      Call::DeleteTask(id),
      Operation::DeleteTask
    )?;
    self
      .tasks
      .borrow_mut()
      .retain(|task| task.id != id);
    Ok(())
  }
}

/// Page stand-in that remembers what the
/// coordinator asked of it.
struct RecordingSurface {
  notices:   RefCell<Vec<Notice>>,
  resets:    RefCell<Vec<Form>>,
  refreshes: Cell<usize>,
  confirms:  Cell<bool>,
  prompts:   RefCell<Vec<String>>
}

impl RecordingSurface {
  fn answering(confirms: bool) -> Self {
    Self {
      notices: RefCell::new(Vec::new()),
      resets: RefCell::new(Vec::new()),
      refreshes: Cell::new(0),
      confirms: Cell::new(confirms),
      prompts: RefCell::new(Vec::new())
    }
  }

  fn notices(&self) -> Vec<Notice> {
    self.notices.borrow().clone()
  }
}

impl Surface for RecordingSurface {
  fn notify(&self, notice: Notice) {
    self.notices.borrow_mut().push(notice);
  }

  fn confirm(&self, prompt: &str) -> bool {
    self
      .prompts
      .borrow_mut()
      .push(prompt.to_string());
    self.confirms.get()
  }

  fn reset_form(&self, form: Form) {
    self.resets.borrow_mut().push(form);
  }

  fn refresh(&self) {
    self
      .refreshes
      .set(self.refreshes.get() + 1);
  }
}

type TestCoordinator =
  Coordinator<ScriptedGateway, RecordingSurface>;

fn coordinator(
  gateway: ScriptedGateway,
  confirms: bool
) -> TestCoordinator {
  Coordinator::new(
    gateway,
    RecordingSurface::answering(confirms),
    StateStore::shared(),
    Messages::default()
  )
}

fn loaded(
  gateway: ScriptedGateway,
  confirms: bool
) -> TestCoordinator {
  let coordinator =
    coordinator(gateway, confirms);
  block_on(coordinator.load_all());
  coordinator.gateway().calls.borrow_mut().clear();
  coordinator
}

fn draft(title: &str) -> TaskCreate {
  TaskCreate {
    title:       title.to_string(),
    description: String::new(),
    priority:    Some(TaskPriority::Medium),
    due_date:    None,
    category_id: None
  }
}

#[test]
fn initial_load_fills_every_collection() {
  let gateway = ScriptedGateway::default()
    .with_category(1, "Work")
    .with_task(5, "Write report");
  let coordinator = coordinator(gateway, true);

  block_on(coordinator.load_all());

  assert_eq!(
    coordinator.gateway().calls(),
    vec![
      Call::ListTasks,
      Call::ListCategories,
      Call::GetStats
    ]
  );
  let store = coordinator.store().borrow();
  assert_eq!(store.tasks().len(), 1);
  assert_eq!(store.categories().len(), 1);
  assert_eq!(store.stats().total, 1);
  assert!(!store.is_loading_tasks());
  assert!(
    coordinator.surface().notices().is_empty()
  );
}

#[test]
fn failed_loads_each_report_their_own_message(
) {
  let gateway = ScriptedGateway::default()
    .with_task(1, "kept out")
    .failing(Operation::LoadTasks)
    .failing(Operation::LoadStats);
  let coordinator = coordinator(gateway, true);

  block_on(coordinator.load_all());

  let messages = Messages::default();
  assert_eq!(
    coordinator.surface().notices(),
    vec![
      Notice::error(
        messages.load_tasks_failed.clone()
      ),
      Notice::error(
        messages.load_stats_failed.clone()
      )
    ]
  );
  let store = coordinator.store().borrow();
  assert!(store.tasks().is_empty());
  assert!(!store.is_loading_tasks());
}

#[test]
fn successful_create_resets_form_and_reloads(
) {
  let coordinator = loaded(
    ScriptedGateway::default(),
    true
  );

  let phase = block_on(
    coordinator.create_task(draft("Buy milk"))
  );

  assert_eq!(phase, Phase::Succeeded);
  assert_eq!(
    coordinator.gateway().calls(),
    vec![
      Call::CreateTask(
        "Buy milk".to_string()
      ),
      Call::ListTasks,
      Call::GetStats
    ]
  );
  assert_eq!(
    *coordinator.surface().resets.borrow(),
    vec![Form::Task]
  );
  assert_eq!(
    coordinator.surface().notices(),
    vec![Notice::success(
      Messages::default().task_added
    )]
  );
  assert_eq!(
    coordinator.phase(Control::TaskForm),
    Phase::Idle
  );
  let store = coordinator.store().borrow();
  assert_eq!(store.tasks().len(), 1);
  assert_eq!(store.stats().total, 1);
}

#[test]
fn failed_create_keeps_form_and_list() {
  let coordinator = loaded(
    ScriptedGateway::default()
      .with_task(1, "Existing")
      .failing(Operation::AddTask),
    true
  );

  let phase = block_on(
    coordinator.create_task(draft("Buy milk"))
  );

  assert_eq!(phase, Phase::Failed);
  assert!(
    coordinator
      .surface()
      .resets
      .borrow()
      .is_empty()
  );
  assert_eq!(
    coordinator.phase(Control::TaskForm),
    Phase::Idle
  );
  assert!(
    !coordinator.is_busy(Control::TaskForm)
  );

  let notices = coordinator.surface().notices();
  assert_eq!(notices.len(), 1);
  assert_eq!(
    notices[0].kind,
    NoticeKind::Error
  );
  assert_eq!(
    notices[0].message,
    Messages::default().add_task_failed
  );

  assert_eq!(
    coordinator.gateway().calls(),
    vec![Call::CreateTask(
      "Buy milk".to_string()
    )]
  );
  let store = coordinator.store().borrow();
  assert_eq!(store.tasks().len(), 1);
  assert_eq!(
    store.tasks()[0].title,
    "Existing"
  );
}

#[test]
fn confirmed_delete_runs_mutate_reload_notify(
) {
  let coordinator = loaded(
    ScriptedGateway::default()
      .with_task(7, "Old"),
    true
  );

  let phase =
    block_on(coordinator.delete_task(TaskId(7)));

  assert_eq!(phase, Phase::Succeeded);
  assert_eq!(
    coordinator.gateway().calls(),
    vec![
      Call::DeleteTask(TaskId(7)),
      Call::ListTasks,
      Call::GetStats
    ]
  );
  assert_eq!(
    *coordinator.surface().prompts.borrow(),
    vec![Messages::default().confirm_delete]
  );
  assert_eq!(
    coordinator.surface().notices(),
    vec![Notice::success(
      Messages::default().operation_succeeded
    )]
  );
  let store = coordinator.store().borrow();
  assert!(store.tasks().is_empty());
  assert_eq!(store.stats().total, 0);
}

#[test]
fn declined_delete_sends_nothing() {
  let coordinator = loaded(
    ScriptedGateway::default()
      .with_task(7, "Keep"),
    false
  );

  let phase =
    block_on(coordinator.delete_task(TaskId(7)));

  assert_eq!(phase, Phase::Idle);
  assert!(coordinator.gateway().calls().is_empty());
  assert!(
    coordinator.surface().notices().is_empty()
  );
  assert_eq!(
    coordinator.store().borrow().tasks().len(),
    1
  );
}

#[test]
fn toggle_reloads_without_local_patch() {
  let coordinator = loaded(
    ScriptedGateway::default()
      .with_task(3, "Walk"),
    true
  );

  let phase = block_on(
    coordinator.toggle_task(TaskId(3), true)
  );

  assert_eq!(phase, Phase::Succeeded);
  assert_eq!(
    coordinator.gateway().calls(),
    vec![
      Call::UpdateTask(TaskId(3)),
      Call::ListTasks,
      Call::GetStats
    ]
  );
  let store = coordinator.store().borrow();
  assert!(store.tasks()[0].completed);
  assert_eq!(store.stats().completed, 1);
}

#[test]
fn failed_toggle_repaints_from_unchanged_store() {
  let coordinator = loaded(
    ScriptedGateway::default()
      .with_task(3, "Walk")
      .failing(Operation::UpdateTask),
    true
  );
  let refreshes_before =
    coordinator.surface().refreshes.get();

  let phase = block_on(
    coordinator.toggle_task(TaskId(3), true)
  );

  assert_eq!(phase, Phase::Failed);
  assert!(
    !coordinator.store().borrow().tasks()[0]
      .completed
  );
  assert!(
    coordinator.surface().refreshes.get()
      > refreshes_before
  );
  assert_eq!(
    coordinator.phase(Control::TaskRow(
      TaskId(3)
    )),
    Phase::Idle
  );
  assert_eq!(
    coordinator.surface().notices(),
    vec![Notice::error(
      Messages::default().operation_failed
    )]
  );
}

#[test]
fn edit_closes_modal_only_on_success() {
  let coordinator = loaded(
    ScriptedGateway::default()
      .with_task(4, "Draft"),
    true
  );
  let patch = TaskPatch {
    title: Some("Final".to_string()),
    ..TaskPatch::default()
  };

  let phase = block_on(
    coordinator.edit_task(TaskId(4), patch)
  );

  assert_eq!(phase, Phase::Succeeded);
  assert_eq!(
    *coordinator.surface().resets.borrow(),
    vec![Form::Edit]
  );
  assert_eq!(
    coordinator.store().borrow().tasks()[0]
      .title,
    "Final"
  );
}

#[test]
fn new_task_in_category_bumps_its_count() {
  let coordinator = loaded(
    ScriptedGateway::default()
      .with_category(1, "Work"),
    true
  );
  assert_eq!(
    category_counts(
      coordinator.store().borrow().tasks()
    )
    .get(&CategoryId(1)),
    None
  );

  let mut data = draft("Report");
  data.category_id = Some(CategoryId(1));
  block_on(coordinator.create_task(data));

  assert!(
    !coordinator
      .gateway()
      .calls()
      .contains(&Call::ListCategories)
  );
  assert_eq!(
    category_counts(
      coordinator.store().borrow().tasks()
    )
    .get(&CategoryId(1)),
    Some(&1)
  );
}

#[test]
fn new_category_reloads_categories() {
  let coordinator = loaded(
    ScriptedGateway::default(),
    true
  );

  let phase = block_on(
    coordinator.create_category(
      CategoryCreate {
        name:  "Home".to_string(),
        color: "#ff0000".to_string()
      }
    )
  );

  assert_eq!(phase, Phase::Succeeded);
  assert_eq!(
    coordinator.gateway().calls(),
    vec![
      Call::CreateCategory(
        "Home".to_string()
      ),
      Call::ListTasks,
      Call::ListCategories,
      Call::GetStats
    ]
  );
  assert_eq!(
    *coordinator.surface().resets.borrow(),
    vec![Form::Category]
  );
  assert_eq!(
    coordinator
      .store()
      .borrow()
      .categories()[0]
      .name,
    "Home"
  );
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
  let gateway = ScriptedGateway::default();
  gateway.yield_on_create.set(true);
  let coordinator = loaded(gateway, true);

  let (first, second) =
    block_on(async {
      futures::join!(
        coordinator
          .create_task(draft("Once")),
        coordinator
          .create_task(draft("Twice"))
      )
    });

  assert_eq!(first, Phase::Succeeded);
  assert_eq!(second, Phase::Submitting);
  let creates = coordinator
    .gateway()
    .calls()
    .into_iter()
    .filter(|call| {
      matches!(call, Call::CreateTask(_))
    })
    .count();
  assert_eq!(creates, 1);
  assert_eq!(
    coordinator.store().borrow().tasks().len(),
    1
  );
}
