use std::rc::Rc;

use tally_shared::CategoryId;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use crate::config::Messages;
use crate::render::CategoryListView;

#[derive(Properties, PartialEq)]
pub struct CategoryListProps {
  pub view:      CategoryListView,
  pub messages:  Rc<Messages>,
  pub on_select: Callback<CategoryId>,
  pub on_add:    Callback<()>
}

#[function_component(CategoryList)]
pub fn category_list(
  props: &CategoryListProps
) -> Html {
  let on_add = props.on_add.clone();

  let body = match &props.view {
    | CategoryListView::Empty(text) => {
      html! {
          <div class="text-center text-muted p-2">{ text }</div>
      }
    }
    | CategoryListView::Entries(
      entries
    ) => html! {
        <>
        {
            for entries.iter().map(|entry| {
                let id = entry.id;
                let on_select = props.on_select.clone();
                let class = if entry.active {
                    "category-item active"
                } else {
                    "category-item"
                };
                html! {
                    <div
                        key={id.to_string()}
                        class={class}
                        style={format!("border-left: 4px solid {};", entry.color)}
                        onclick={move |_| on_select.emit(id)}
                    >
                        <span class="category-name">{ &entry.name }</span>
                        <span class="category-count badge">{ entry.count }</span>
                    </div>
                }
            })
        }
        </>
    }
  };

  html! {
      <div class="panel">
          <div class="header">
              <span>{ &props.messages.categories_heading }</span>
              <button
                  id="add-category-btn"
                  type="button"
                  class="btn btn-sm"
                  onclick={move |_| on_add.emit(())}
              >
                  { "+" }
              </button>
          </div>
          <div id="categories-list">{ body }</div>
      </div>
  }
}
