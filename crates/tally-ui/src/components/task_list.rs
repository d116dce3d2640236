use std::collections::BTreeSet;
use std::rc::Rc;

use tally_shared::TaskId;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskItem;
use crate::config::Messages;
use crate::render::TaskListView;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:      TaskListView,
  pub busy_rows: BTreeSet<TaskId>,
  pub messages:  Rc<Messages>,
  pub on_toggle: Callback<(TaskId, bool)>,
  pub on_delete: Callback<TaskId>,
  pub on_edit:   Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let body = match &props.view {
    | TaskListView::Loading(text) => {
      html! {
          <div class="text-center p-4">
              <span class="loading-spinner"></span>
              { " " }
              { text }
          </div>
      }
    }
    | TaskListView::Empty(text) => {
      html! {
          <div class="text-center text-muted p-4">{ text }</div>
      }
    }
    | TaskListView::Cards(cards) => html! {
        <>
        {
            for cards.iter().cloned().map(|card| {
                let busy = props.busy_rows.contains(&card.id);
                let key = card.id.to_string();
                html! {
                    <TaskItem
                        key={key}
                        card={card}
                        busy={busy}
                        messages={props.messages.clone()}
                        on_toggle={props.on_toggle.clone()}
                        on_delete={props.on_delete.clone()}
                        on_edit={props.on_edit.clone()}
                    />
                }
            })
        }
        </>
    }
  };

  html! {
      <div class="panel list">
          <div class="header">{ &props.messages.tasks_heading }</div>
          <div id="todos-container">{ body }</div>
      </div>
  }
}
