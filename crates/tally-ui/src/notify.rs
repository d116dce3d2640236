use std::rc::Rc;

use yew::Reducible;

use crate::coordinator::{
  Notice,
  NoticeKind
};

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct Toast {
  pub id:     u64,
  pub notice: Notice
}

impl Toast {
  pub fn class(&self) -> &'static str {
    match self.notice.kind {
      | NoticeKind::Success => "toast",
      | NoticeKind::Error => {
        "toast bg-danger text-white"
      }
    }
  }
}

pub enum ToastAction {
  Push(Toast),
  Dismiss(u64)
}

/// Toasts currently on screen, oldest
/// first.
#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct ToastQueue {
  pub toasts: Vec<Toast>
}

impl Reducible for ToastQueue {
  type Action = ToastAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut toasts = self.toasts.clone();
    match action {
      | ToastAction::Push(toast) => {
        toasts.push(toast)
      }
      | ToastAction::Dismiss(id) => {
        toasts.retain(|toast| toast.id != id)
      }
    }
    Rc::new(Self { toasts })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn push_then_dismiss_by_id() {
    let queue = Rc::new(ToastQueue::default());
    let queue = queue.reduce(
      ToastAction::Push(Toast {
        id:     1,
        notice: Notice::success("saved")
      })
    );
    let queue = queue.reduce(
      ToastAction::Push(Toast {
        id:     2,
        notice: Notice::error("failed")
      })
    );
    assert_eq!(queue.toasts.len(), 2);
    assert_eq!(
      queue.toasts[1].class(),
      "toast bg-danger text-white"
    );

    let queue =
      queue.reduce(ToastAction::Dismiss(1));
    assert_eq!(queue.toasts.len(), 1);
    assert_eq!(queue.toasts[0].id, 2);
  }
}
