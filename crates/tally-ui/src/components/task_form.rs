use std::rc::Rc;

use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  UseStateHandle,
  function_component,
  html
};

use crate::config::Messages;
use crate::drafts::TaskDraft;
use crate::render::{
  SelectOption,
  priority_options
};

#[derive(Properties, PartialEq)]
pub struct TaskFieldsProps {
  pub draft:      TaskDraft,
  pub categories: Vec<SelectOption>,
  pub messages:   Rc<Messages>,
  /// Earliest selectable due date.
  pub min_date:   String,
  pub on_change:  Callback<TaskDraft>
}

/// Inputs shared by the add form and
/// the edit modal.
#[function_component(TaskFields)]
pub fn task_fields(
  props: &TaskFieldsProps
) -> Html {
  let messages = &props.messages;
  let draft = &props.draft;

  let on_title = {
    let draft = draft.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: InputEvent| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(TaskDraft {
        title: input.value(),
        ..draft.clone()
      });
    })
  };
  let on_description = {
    let draft = draft.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: InputEvent| {
      let input: web_sys::HtmlTextAreaElement =
        e.target_unchecked_into();
      on_change.emit(TaskDraft {
        description: input.value(),
        ..draft.clone()
      });
    })
  };
  let on_priority = {
    let draft = draft.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      on_change.emit(TaskDraft {
        priority: select.value(),
        ..draft.clone()
      });
    })
  };
  let on_due = {
    let draft = draft.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: Event| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      on_change.emit(TaskDraft {
        due_date: input.value(),
        ..draft.clone()
      });
    })
  };
  let on_category = {
    let draft = draft.clone();
    let on_change =
      props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      on_change.emit(TaskDraft {
        category_id: select.value(),
        ..draft.clone()
      });
    })
  };

  let priorities =
    priority_options(&draft.priority, messages);

  html! {
      <>
          <label class="form-label">
              { &messages.title_label }
              <input
                  name="title"
                  class="form-control"
                  required={true}
                  maxlength="100"
                  value={draft.title.clone()}
                  oninput={on_title}
              />
          </label>
          <label class="form-label">
              { &messages.description_label }
              <textarea
                  name="description"
                  class="form-control"
                  maxlength="500"
                  value={draft.description.clone()}
                  oninput={on_description}
              />
          </label>
          <label class="form-label">
              { &messages.priority_label }
              <select name="priority" class="form-select" onchange={on_priority}>
                  {
                      for priorities.iter().map(|option| html! {
                          <option
                              value={option.value.clone()}
                              selected={draft.priority == option.value}
                          >
                              { &option.label }
                          </option>
                      })
                  }
              </select>
          </label>
          <label class="form-label">
              { &messages.due_date_label }
              <input
                  name="due_date"
                  type="date"
                  class="form-control"
                  min={props.min_date.clone()}
                  value={draft.due_date.clone()}
                  onchange={on_due}
              />
          </label>
          <label class="form-label">
              { &messages.category_label }
              <select name="category_id" class="form-select" onchange={on_category}>
                  {
                      for props.categories.iter().map(|option| html! {
                          <option
                              value={option.value.clone()}
                              selected={draft.category_id == option.value}
                          >
                              { &option.label }
                          </option>
                      })
                  }
              </select>
          </label>
      </>
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub draft:      UseStateHandle<TaskDraft>,
  pub categories: Vec<SelectOption>,
  pub busy:       bool,
  pub messages:   Rc<Messages>,
  pub min_date:   String,
  pub on_submit:  Callback<TaskDraft>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let on_change = {
    let draft = props.draft.clone();
    Callback::from(move |next: TaskDraft| {
      draft.set(next)
    })
  };
  let on_submit = {
    let draft = props.draft.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit((*draft).clone());
    })
  };

  html! {
      <form id="todo-form" class="panel" onsubmit={on_submit}>
          <div class="header">{ &props.messages.add_task }</div>
          <TaskFields
              draft={(*props.draft).clone()}
              categories={props.categories.clone()}
              messages={props.messages.clone()}
              min_date={props.min_date.clone()}
              on_change={on_change}
          />
          <button type="submit" class="btn btn-primary" disabled={props.busy}>
              {
                  if props.busy {
                      html! {
                          <>
                              <span class="loading-spinner"></span>
                              { " " }
                              { &props.messages.adding }
                          </>
                      }
                  } else {
                      html! { <>{ &props.messages.add_task }</> }
                  }
              }
          </button>
      </form>
  }
}
