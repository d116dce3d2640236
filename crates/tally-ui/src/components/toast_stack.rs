use yew::{
  Html,
  Properties,
  function_component,
  html
};

use crate::notify::Toast;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
  pub toasts: Vec<Toast>
}

#[function_component(ToastStack)]
pub fn toast_stack(
  props: &ToastStackProps
) -> Html {
  html! {
      <div class="toast-container">
          {
              for props.toasts.iter().map(|toast| html! {
                  <div key={toast.id.to_string()} class={toast.class()}>
                      { &toast.notice.message }
                  </div>
              })
          }
      </div>
  }
}
