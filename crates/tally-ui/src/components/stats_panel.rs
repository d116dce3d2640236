use std::rc::Rc;

use yew::{
  Html,
  Properties,
  function_component,
  html
};

use crate::config::Messages;
use crate::render::StatsView;

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
  pub stats:    StatsView,
  pub messages: Rc<Messages>
}

#[function_component(StatsPanel)]
pub fn stats_panel(
  props: &StatsPanelProps
) -> Html {
  let stats = &props.stats;
  let messages = &props.messages;

  html! {
      <div class="panel stats">
          <div class="header">{ &messages.stats_heading }</div>
          <div class="stat">
              <span>{ &messages.total_label }</span>
              <span id="total-tasks" class="badge">{ stats.total }</span>
          </div>
          <div class="stat">
              <span>{ &messages.completed_label }</span>
              <span id="completed-tasks" class="badge">{ stats.completed }</span>
          </div>
          <div class="progress">
              <div
                  id="completion-rate"
                  class="progress-bar"
                  role="progressbar"
                  style={stats.width_style()}
                  aria-valuenow={stats.percent.to_string()}
                  aria-valuemin="0"
                  aria-valuemax="100"
              ></div>
          </div>
      </div>
  }
}
