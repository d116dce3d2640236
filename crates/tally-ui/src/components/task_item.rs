use std::rc::Rc;

use tally_shared::TaskId;
use yew::{
  Callback,
  Event,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html
};

use crate::config::Messages;
use crate::render::TaskCard;

#[derive(Properties, PartialEq)]
pub struct TaskItemProps {
  pub card:      TaskCard,
  /// Row request in flight.
  pub busy:      bool,
  pub messages:  Rc<Messages>,
  pub on_toggle: Callback<(TaskId, bool)>,
  pub on_delete: Callback<TaskId>,
  pub on_edit:   Callback<TaskId>
}

#[function_component(TaskItem)]
pub fn task_item(
  props: &TaskItemProps
) -> Html {
  let card = &props.card;
  let id = card.id;

  let on_change = {
    let on_toggle =
      props.on_toggle.clone();
    Callback::from(move |e: Event| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      let requested = input.checked();
      // The box only follows the store;
      // a reload after success flips it.
      input.set_checked(!requested);
      on_toggle.emit((id, requested));
    })
  };
  let on_delete = props.on_delete.clone();
  let on_edit = props.on_edit.clone();

  html! {
      <div class={classes!("todo-item", card.completed.then_some("completed"))}>
          <input
              class="todo-checkbox"
              type="checkbox"
              checked={card.completed}
              disabled={props.busy}
              onchange={on_change}
          />
          <div class="todo-body">
              <div class="todo-title">{ &card.title }</div>
              <div class="todo-description">{ &card.description }</div>
              <div class="todo-meta">
                  {
                      if let Some(priority) = &card.priority {
                          html! {
                              <span
                                  class={classes!("badge", "todo-priority", priority.severity.class())}
                                  data-priority={priority.value.clone()}
                              >
                                  { &priority.label }
                              </span>
                          }
                      } else {
                          html! {}
                      }
                  }
                  {
                      if let Some(category) = &card.category {
                          html! {
                              <span
                                  class="badge todo-category"
                                  style={format!("background-color: {};", category.color)}
                              >
                                  { &category.name }
                              </span>
                          }
                      } else {
                          html! {}
                      }
                  }
                  {
                      if let Some(due) = &card.due {
                          html! {
                              <span class={classes!("todo-due-date", due.overdue.then(|| classes!("text-danger", "fw-bold")))}>
                                  { &due.text }
                              </span>
                          }
                      } else {
                          html! {}
                      }
                  }
              </div>
          </div>
          <div class="todo-actions">
              <button
                  type="button"
                  class="btn btn-sm edit-btn"
                  disabled={props.busy}
                  onclick={move |_| on_edit.emit(id)}
              >
                  { &props.messages.edit }
              </button>
              <button
                  type="button"
                  class="btn btn-sm delete-btn"
                  disabled={props.busy}
                  onclick={move |_| on_delete.emit(id)}
              >
                  {
                      if props.busy {
                          html! { <span class="loading-spinner"></span> }
                      } else {
                          html! { <>{ &props.messages.delete }</> }
                      }
                  }
              </button>
          </div>
      </div>
  }
}
