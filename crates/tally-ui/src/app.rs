use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::Local;
use gloo::console::log;
use gloo::timers::callback::Timeout;
use tally_shared::{
  CategoryId,
  TaskId
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  UseForceUpdateHandle,
  UseReducerDispatcher,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_memo,
  use_reducer,
  use_state
};

use crate::api::HttpGateway;
use crate::components::{
  CategoryList,
  CategoryModal,
  EditTaskModal,
  FilterBar,
  StatsPanel,
  TaskForm,
  TaskList,
  ToastStack
};
use crate::config::ClientConfig;
use crate::coordinator::{
  Control,
  Coordinator,
  Form,
  Notice,
  Surface
};
use crate::drafts::{
  CategoryDraft,
  EditDraft,
  TaskDraft
};
use crate::filters::{
  StatusFilter,
  ViewSelector,
  derive_view
};
use crate::notify::{
  Toast,
  ToastAction,
  ToastQueue
};
use crate::render::{
  TaskListView,
  category_list_view,
  category_options,
  stats_view,
  task_list_view
};
use crate::store::StateStore;

type AppCoordinator =
  Coordinator<HttpGateway, BrowserSurface>;

/// `Surface` backed by yew hook
/// handles. Setters stay valid across
/// renders, so the handles captured at
/// mount keep working.
pub struct BrowserSurface {
  toasts:         UseReducerDispatcher<ToastQueue>,
  repaint:        UseForceUpdateHandle,
  task_draft:     UseStateHandle<TaskDraft>,
  category_draft: UseStateHandle<CategoryDraft>,
  category_modal: UseStateHandle<bool>,
  edit_draft:
    UseStateHandle<Option<EditDraft>>,
  toast_ms:       u32,
  next_toast:     Cell<u64>
}

impl Surface for BrowserSurface {
  fn notify(&self, notice: Notice) {
    let id = self.next_toast.get() + 1;
    self.next_toast.set(id);
    ui_debug("toast", &notice.message);

    self.toasts.dispatch(
      ToastAction::Push(Toast {
        id,
        notice
      })
    );

    let toasts = self.toasts.clone();
    Timeout::new(self.toast_ms, move || {
      toasts.dispatch(
        ToastAction::Dismiss(id)
      );
    })
    .forget();
  }

  fn confirm(&self, prompt: &str) -> bool {
    gloo::dialogs::confirm(prompt)
  }

  fn reset_form(&self, form: Form) {
    tracing::debug!(?form, "resetting form");
    match form {
      | Form::Task => {
        self
          .task_draft
          .set(TaskDraft::default())
      }
      | Form::Category => {
        self
          .category_draft
          .set(CategoryDraft::default());
        self.category_modal.set(false);
      }
      | Form::Edit => {
        self.edit_draft.set(None)
      }
    }
  }

  fn refresh(&self) {
    self.repaint.force_update();
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_memo((), |_| ClientConfig::load());
  let messages = {
    let config = config.clone();
    use_memo((), move |_| {
      config.messages()
    })
  };
  let toasts =
    use_reducer(ToastQueue::default);
  let repaint = use_force_update();
  let task_draft =
    use_state(TaskDraft::default);
  let category_draft =
    use_state(CategoryDraft::default);
  let category_modal =
    use_state(|| false);
  let edit_draft =
    use_state(|| None::<EditDraft>);
  let selector =
    use_state(ViewSelector::default);

  let coordinator: Rc<AppCoordinator> = {
    let config = config.clone();
    let messages = messages.clone();
    let surface = BrowserSurface {
      toasts:         toasts.dispatcher(),
      repaint:        repaint.clone(),
      task_draft:     task_draft.clone(),
      category_draft: category_draft
        .clone(),
      category_modal: category_modal
        .clone(),
      edit_draft:     edit_draft.clone(),
      toast_ms:       config.ui.toast_ms,
      next_toast:     Cell::new(0)
    };
    use_memo((), move |_| {
      Coordinator::new(
        HttpGateway::new(
          config,
          (*messages).clone()
        ),
        surface,
        StateStore::shared(),
        (*messages).clone()
      )
    })
  };

  {
    let coordinator = coordinator.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "loading tasks, categories and \
         stats"
      );
      wasm_bindgen_futures::spawn_local(
        async move {
          coordinator.load_all().await;
        }
      );
      || ()
    });
  }

  let today = Local::now().date_naive();
  let min_date =
    today.format("%Y-%m-%d").to_string();

  let (
    task_view,
    category_view,
    stats,
    options,
    busy_rows
  ) = {
    let store =
      coordinator.store().borrow();
    let task_view =
      if store.is_loading_tasks() {
        TaskListView::Loading(
          messages.loading.clone()
        )
      } else {
        let visible = derive_view(
          store.tasks(),
          &selector,
          today
        );
        task_list_view(
          &visible,
          today,
          &config.ui.date_format,
          &messages
        )
      };
    let category_view = category_list_view(
      store.categories(),
      store.tasks(),
      selector.category_scope(),
      &messages
    );
    let busy_rows: BTreeSet<TaskId> = store
      .tasks()
      .iter()
      .map(|task| task.id)
      .filter(|id| {
        coordinator
          .is_busy(Control::TaskRow(*id))
      })
      .collect();
    (
      task_view,
      category_view,
      stats_view(store.stats()),
      category_options(
        store.categories(),
        &messages
      ),
      busy_rows
    )
  };

  let on_filter = {
    let selector = selector.clone();
    Callback::from(
      move |filter: StatusFilter| {
        ui_debug(
          "filter.select",
          filter.tag()
        );
        let mut next = (*selector).clone();
        next.select_status(filter);
        selector.set(next);
      }
    )
  };

  let on_search = {
    let selector = selector.clone();
    Callback::from(move |text: String| {
      let mut next = (*selector).clone();
      next.set_search(text);
      selector.set(next);
    })
  };

  let on_category = {
    let selector = selector.clone();
    Callback::from(move |id: CategoryId| {
      ui_debug(
        "category.select",
        &id.to_string()
      );
      let mut next = (*selector).clone();
      next.select_category(id);
      selector.set(next);
    })
  };

  let on_open_category = {
    let category_modal =
      category_modal.clone();
    Callback::from(move |()| {
      category_modal.set(true)
    })
  };

  let on_close_category = {
    let category_modal =
      category_modal.clone();
    Callback::from(move |_: MouseEvent| {
      category_modal.set(false)
    })
  };

  let on_task_submit = {
    let coordinator = coordinator.clone();
    Callback::from(move |draft: TaskDraft| {
      let coordinator = coordinator.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          coordinator
            .create_task(draft.to_create())
            .await;
        }
      );
    })
  };

  let on_category_submit = {
    let coordinator = coordinator.clone();
    Callback::from(
      move |draft: CategoryDraft| {
        let coordinator =
          coordinator.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            coordinator
              .create_category(
                draft.to_create()
              )
              .await;
          }
        );
      }
    )
  };

  let on_edit = {
    let coordinator = coordinator.clone();
    let edit_draft = edit_draft.clone();
    Callback::from(move |id: TaskId| {
      let store =
        coordinator.store().borrow();
      match store.task(id) {
        | Some(task) => {
          edit_draft.set(Some(
            EditDraft::from_task(task)
          ))
        }
        | None => {
          tracing::warn!(
            task = %id,
            "edit requested for task no \
             longer in store"
          )
        }
      }
    })
  };

  let on_edit_submit = {
    let coordinator = coordinator.clone();
    Callback::from(move |draft: EditDraft| {
      let coordinator = coordinator.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          coordinator
            .edit_task(
              draft.id,
              draft.fields.to_patch()
            )
            .await;
        }
      );
    })
  };

  let on_close_edit = {
    let edit_draft = edit_draft.clone();
    Callback::from(move |_: MouseEvent| {
      edit_draft.set(None)
    })
  };

  let on_toggle = {
    let coordinator = coordinator.clone();
    Callback::from(
      move |(id, completed): (TaskId, bool)| {
        let coordinator =
          coordinator.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            coordinator
              .toggle_task(id, completed)
              .await;
          }
        );
      }
    )
  };

  let on_delete = {
    let coordinator = coordinator.clone();
    Callback::from(move |id: TaskId| {
      let coordinator = coordinator.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          coordinator.delete_task(id).await;
        }
      );
    })
  };

  html! {
      <div class="app">
          <div class="sidebar">
              <StatsPanel stats={stats} messages={messages.clone()} />
              <CategoryList
                  view={category_view}
                  messages={messages.clone()}
                  on_select={on_category}
                  on_add={on_open_category}
              />
          </div>
          <div class="main">
              <TaskForm
                  draft={task_draft.clone()}
                  categories={options.clone()}
                  busy={coordinator.is_busy(Control::TaskForm)}
                  messages={messages.clone()}
                  min_date={min_date}
                  on_submit={on_task_submit}
              />
              <FilterBar
                  active={selector.active_status()}
                  search={selector.search.clone()}
                  messages={messages.clone()}
                  on_filter={on_filter}
                  on_search={on_search}
              />
              <TaskList
                  view={task_view}
                  busy_rows={busy_rows}
                  messages={messages.clone()}
                  on_toggle={on_toggle}
                  on_delete={on_delete}
                  on_edit={on_edit}
              />
          </div>
          <CategoryModal
              open={*category_modal}
              draft={category_draft.clone()}
              busy={coordinator.is_busy(Control::CategoryForm)}
              messages={messages.clone()}
              on_submit={on_category_submit}
              on_close={on_close_category}
          />
          <EditTaskModal
              draft={edit_draft.clone()}
              categories={options}
              busy={coordinator.is_busy(Control::EditForm)}
              messages={messages.clone()}
              min_date={String::new()}
              on_submit={on_edit_submit}
              on_close={on_close_edit}
          />
          <ToastStack toasts={toasts.toasts.clone()} />
      </div>
  }
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
