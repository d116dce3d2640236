use std::rc::Rc;

use yew::{
  Callback,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

use crate::config::Messages;
use crate::filters::StatusFilter;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  /// `None` while a category scopes
  /// the view.
  pub active:    Option<StatusFilter>,
  pub search:    String,
  pub messages:  Rc<Messages>,
  pub on_filter: Callback<StatusFilter>,
  pub on_search: Callback<String>
}

fn filter_label(
  filter: StatusFilter,
  messages: &Messages
) -> &str {
  match filter {
    | StatusFilter::All => {
      &messages.filter_all
    }
    | StatusFilter::Active => {
      &messages.filter_active
    }
    | StatusFilter::Completed => {
      &messages.filter_completed
    }
    | StatusFilter::DueToday => {
      &messages.filter_due_today
    }
    | StatusFilter::Overdue => {
      &messages.filter_overdue
    }
  }
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_search_input = {
    let on_search =
      props.on_search.clone();
    Callback::from(move |e: InputEvent| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      on_search.emit(input.value());
    })
  };

  html! {
      <div class="filter-bar">
          <input
              id="search-input"
              class="form-control"
              type="search"
              placeholder={props.messages.search_placeholder.clone()}
              value={props.search.clone()}
              oninput={on_search_input}
          />
          <div class="btn-group">
              {
                  for StatusFilter::ORDERED.into_iter().map(|filter| {
                      let on_filter = props.on_filter.clone();
                      let class = if props.active == Some(filter) {
                          "btn filter active"
                      } else {
                          "btn filter"
                      };
                      html! {
                          <button
                              type="button"
                              class={class}
                              data-filter={filter.tag()}
                              onclick={move |_| on_filter.emit(filter)}
                          >
                              { filter_label(filter, &props.messages) }
                          </button>
                      }
                  })
              }
          </div>
      </div>
  }
}
