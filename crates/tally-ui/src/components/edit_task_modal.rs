use std::rc::Rc;

use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  SubmitEvent,
  UseStateHandle,
  function_component,
  html
};

use super::TaskFields;
use crate::config::Messages;
use crate::drafts::{
  EditDraft,
  TaskDraft
};
use crate::render::SelectOption;

#[derive(Properties, PartialEq)]
pub struct EditTaskModalProps {
  /// `None` while the modal is closed.
  pub draft:      UseStateHandle<Option<EditDraft>>,
  pub categories: Vec<SelectOption>,
  pub busy:       bool,
  pub messages:   Rc<Messages>,
  pub min_date:   String,
  pub on_submit:  Callback<EditDraft>,
  pub on_close:   Callback<MouseEvent>
}

#[function_component(EditTaskModal)]
pub fn edit_task_modal(
  props: &EditTaskModalProps
) -> Html {
  let Some(current) = (*props.draft).clone()
  else {
    return html! {};
  };

  let messages = &props.messages;

  let on_change = {
    let draft = props.draft.clone();
    let id = current.id;
    Callback::from(move |fields: TaskDraft| {
      draft.set(Some(EditDraft { id, fields }))
    })
  };
  let on_submit = {
    let on_submit =
      props.on_submit.clone();
    let current = current.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit(current.clone());
    })
  };

  html! {
      <div class="modal-backdrop">
          <form id="edit-todo-form" class="modal-card" onsubmit={on_submit}>
              <div class="header">{ &messages.edit_task }</div>
              <TaskFields
                  draft={current.fields.clone()}
                  categories={props.categories.clone()}
                  messages={props.messages.clone()}
                  min_date={props.min_date.clone()}
                  on_change={on_change}
              />
              <div class="modal-actions">
                  <button
                      type="button"
                      class="btn"
                      disabled={props.busy}
                      onclick={props.on_close.clone()}
                  >
                      { &messages.cancel }
                  </button>
                  <button type="submit" class="btn btn-primary" disabled={props.busy}>
                      {
                          if props.busy {
                              html! {
                                  <>
                                      <span class="loading-spinner"></span>
                                      { " " }
                                      { &messages.saving }
                                  </>
                              }
                          } else {
                              html! { <>{ &messages.save }</> }
                          }
                      }
                  </button>
              </div>
          </form>
      </div>
  }
}
