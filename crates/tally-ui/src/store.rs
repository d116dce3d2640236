use std::cell::RefCell;
use std::rc::Rc;

use tally_shared::{
  CategoryDto,
  StatsDto,
  TaskDto
};

use crate::api::{
  ApiError,
  Gateway
};

pub type SharedStore =
  Rc<RefCell<StateStore>>;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Collection {
  Tasks,
  Categories,
  Stats
}

/// Issued before a fetch, presented
/// when its response is applied.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ReloadTicket {
  collection: Collection,
  generation: u64
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Applied {
  Replaced,
  /// A newer reload already landed;
  /// this response was dropped.
  Stale
}

#[derive(Debug, Default)]
struct Generation {
  issued:  u64,
  applied: u64
}

impl Generation {
  fn issue(&mut self) -> u64 {
    self.issued += 1;
    self.issued
  }

  fn accept(
    &mut self,
    generation: u64
  ) -> bool {
    if generation > self.applied {
      self.applied = generation;
      true
    } else {
      false
    }
  }
}

/// Client-side snapshot of the remote
/// collections. Each collection is only
/// ever replaced as a whole.
#[derive(Debug, Default)]
pub struct StateStore {
  tasks:            Vec<TaskDto>,
  categories:       Vec<CategoryDto>,
  stats:            StatsDto,
  task_gen:         Generation,
  category_gen:     Generation,
  stats_gen:        Generation,
  first_tasks_done: bool
}

impl StateStore {
  pub fn shared() -> SharedStore {
    Rc::new(RefCell::new(Self::default()))
  }

  pub fn tasks(&self) -> &[TaskDto] {
    &self.tasks
  }

  pub fn categories(
    &self
  ) -> &[CategoryDto] {
    &self.categories
  }

  pub fn stats(&self) -> &StatsDto {
    &self.stats
  }

  pub fn task(
    &self,
    id: tally_shared::TaskId
  ) -> Option<&TaskDto> {
    self
      .tasks
      .iter()
      .find(|task| task.id == id)
  }

  /// True until the first task reload
  /// has finished, either way.
  pub fn is_loading_tasks(&self) -> bool {
    !self.first_tasks_done
  }

  pub fn begin(
    &mut self,
    collection: Collection
  ) -> ReloadTicket {
    let generation = match collection {
      | Collection::Tasks => {
        self.task_gen.issue()
      }
      | Collection::Categories => {
        self.category_gen.issue()
      }
      | Collection::Stats => {
        self.stats_gen.issue()
      }
    };
    tracing::debug!(
      ?collection,
      generation,
      "reload started"
    );
    ReloadTicket {
      collection,
      generation
    }
  }

  /// Marks a reload that failed. The
  /// held snapshot is left as it was.
  pub fn abandon(
    &mut self,
    ticket: ReloadTicket
  ) {
    if ticket.collection
      == Collection::Tasks
    {
      self.first_tasks_done = true;
    }
    tracing::debug!(
      collection = ?ticket.collection,
      generation = ticket.generation,
      "reload failed; keeping previous \
       snapshot"
    );
  }

  pub fn apply_tasks(
    &mut self,
    ticket: ReloadTicket,
    tasks: Vec<TaskDto>
  ) -> Applied {
    debug_assert_eq!(
      ticket.collection,
      Collection::Tasks
    );
    self.first_tasks_done = true;
    if !self.task_gen.accept(ticket.generation)
    {
      return stale(ticket);
    }
    self.tasks = tasks;
    Applied::Replaced
  }

  pub fn apply_categories(
    &mut self,
    ticket: ReloadTicket,
    categories: Vec<CategoryDto>
  ) -> Applied {
    debug_assert_eq!(
      ticket.collection,
      Collection::Categories
    );
    if !self
      .category_gen
      .accept(ticket.generation)
    {
      return stale(ticket);
    }
    self.categories = categories;
    Applied::Replaced
  }

  pub fn apply_stats(
    &mut self,
    ticket: ReloadTicket,
    stats: StatsDto
  ) -> Applied {
    debug_assert_eq!(
      ticket.collection,
      Collection::Stats
    );
    if !self.stats_gen.accept(ticket.generation)
    {
      return stale(ticket);
    }
    self.stats = stats;
    Applied::Replaced
  }
}

fn stale(ticket: ReloadTicket) -> Applied {
  tracing::debug!(
    collection = ?ticket.collection,
    generation = ticket.generation,
    "dropping stale reload response"
  );
  Applied::Stale
}

// The borrows below never live across
// an await point.

pub async fn reload_tasks<G>(
  store: &RefCell<StateStore>,
  gateway: &G
) -> Result<Applied, ApiError>
where
  G: Gateway
{
  let ticket = store
    .borrow_mut()
    .begin(Collection::Tasks);
  match gateway.list_tasks().await {
    | Ok(tasks) => {
      tracing::debug!(
        total = tasks.len(),
        "fetched tasks"
      );
      Ok(
        store
          .borrow_mut()
          .apply_tasks(ticket, tasks)
      )
    }
    | Err(err) => {
      store.borrow_mut().abandon(ticket);
      Err(err)
    }
  }
}

pub async fn reload_categories<G>(
  store: &RefCell<StateStore>,
  gateway: &G
) -> Result<Applied, ApiError>
where
  G: Gateway
{
  let ticket = store
    .borrow_mut()
    .begin(Collection::Categories);
  match gateway.list_categories().await {
    | Ok(categories) => {
      tracing::debug!(
        total = categories.len(),
        "fetched categories"
      );
      Ok(
        store.borrow_mut().apply_categories(
          ticket, categories
        )
      )
    }
    | Err(err) => {
      store.borrow_mut().abandon(ticket);
      Err(err)
    }
  }
}

pub async fn refresh_stats<G>(
  store: &RefCell<StateStore>,
  gateway: &G
) -> Result<Applied, ApiError>
where
  G: Gateway
{
  let ticket = store
    .borrow_mut()
    .begin(Collection::Stats);
  match gateway.get_stats().await {
    | Ok(stats) => Ok(
      store
        .borrow_mut()
        .apply_stats(ticket, stats)
    ),
    | Err(err) => {
      store.borrow_mut().abandon(ticket);
      Err(err)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::filters::fixtures::task;

  #[test]
  fn newer_reload_wins_over_late_stale_one(
  ) {
    let mut store = StateStore::default();
    let first = store.begin(Collection::Tasks);
    let second =
      store.begin(Collection::Tasks);

    assert_eq!(
      store.apply_tasks(
        second,
        vec![task(2, "fresh")]
      ),
      Applied::Replaced
    );
    assert_eq!(
      store.apply_tasks(
        first,
        vec![task(1, "stale")]
      ),
      Applied::Stale
    );
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(
      store.tasks()[0].title,
      "fresh"
    );
  }

  #[test]
  fn in_order_reloads_both_apply() {
    let mut store = StateStore::default();
    let first = store.begin(Collection::Tasks);
    assert_eq!(
      store.apply_tasks(first, vec![]),
      Applied::Replaced
    );
    let second =
      store.begin(Collection::Tasks);
    assert_eq!(
      store.apply_tasks(
        second,
        vec![task(1, "a"), task(2, "b")]
      ),
      Applied::Replaced
    );
    assert_eq!(store.tasks().len(), 2);
  }

  #[test]
  fn abandoned_reload_keeps_snapshot() {
    let mut store = StateStore::default();
    let ticket = store.begin(Collection::Tasks);
    store.apply_tasks(
      ticket,
      vec![task(1, "kept")]
    );

    let failed =
      store.begin(Collection::Tasks);
    store.abandon(failed);
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(
      store.tasks()[0].title,
      "kept"
    );
  }

  #[test]
  fn loading_flag_clears_after_first_load(
  ) {
    let mut store = StateStore::default();
    assert!(store.is_loading_tasks());
    let ticket = store.begin(Collection::Tasks);
    assert!(store.is_loading_tasks());
    store.abandon(ticket);
    assert!(!store.is_loading_tasks());
  }

  #[test]
  fn collections_have_independent_generations(
  ) {
    let mut store = StateStore::default();
    let tasks = store.begin(Collection::Tasks);
    let categories =
      store.begin(Collection::Categories);
    let stats = store.begin(Collection::Stats);

    assert_eq!(
      store.apply_categories(
        categories,
        vec![]
      ),
      Applied::Replaced
    );
    assert_eq!(
      store.apply_stats(
        stats,
        StatsDto {
          total:      4,
          completed:  1,
          categories: vec![]
        }
      ),
      Applied::Replaced
    );
    assert_eq!(
      store.apply_tasks(tasks, vec![]),
      Applied::Replaced
    );
    assert_eq!(store.stats().total, 4);
  }
}
