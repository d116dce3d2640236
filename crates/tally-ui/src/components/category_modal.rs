use std::rc::Rc;

use yew::{
  Callback,
  Html,
  InputEvent,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  UseStateHandle,
  function_component,
  html
};

use crate::config::Messages;
use crate::drafts::CategoryDraft;

#[derive(Properties, PartialEq)]
pub struct CategoryModalProps {
  pub open:      bool,
  pub draft:     UseStateHandle<CategoryDraft>,
  pub busy:      bool,
  pub messages:  Rc<Messages>,
  pub on_submit: Callback<CategoryDraft>,
  pub on_close:  Callback<MouseEvent>
}

#[function_component(CategoryModal)]
pub fn category_modal(
  props: &CategoryModalProps
) -> Html {
  if !props.open {
    return html! {};
  }

  let messages = &props.messages;
  let draft = props.draft.clone();

  let on_name = {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      draft.set(CategoryDraft {
        name: input.value(),
        ..(*draft).clone()
      });
    })
  };
  let on_color = {
    let draft = draft.clone();
    Callback::from(move |e: InputEvent| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      draft.set(CategoryDraft {
        color: input.value(),
        ..(*draft).clone()
      });
    })
  };
  let on_submit = {
    let draft = draft.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit((*draft).clone());
    })
  };

  html! {
      <div class="modal-backdrop">
          <form id="category-form" class="modal-card" onsubmit={on_submit}>
              <div class="header">{ &messages.add_category }</div>
              <label class="form-label">
                  { &messages.name_label }
                  <input
                      name="name"
                      class="form-control"
                      required={true}
                      maxlength="50"
                      value={draft.name.clone()}
                      oninput={on_name}
                  />
              </label>
              <label class="form-label">
                  { &messages.color_label }
                  <input
                      name="color"
                      type="color"
                      class="form-control form-control-color"
                      value={draft.color.clone()}
                      oninput={on_color}
                  />
              </label>
              <div class="modal-actions">
                  <button
                      type="button"
                      class="btn"
                      disabled={props.busy}
                      onclick={props.on_close.clone()}
                  >
                      { &messages.cancel }
                  </button>
                  <button
                      id="save-category-btn"
                      type="submit"
                      class="btn btn-primary"
                      disabled={props.busy}
                  >
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
