//! Delayed UI follow-ups owned by a component.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

type Task = Box<dyn FnOnce()>;

/// Starts one-shot timers. Dropping the returned handle cancels the timer.
pub trait Timers {
    type Handle: 'static;

    fn start(&self, delay_ms: u32, callback: Task) -> Self::Handle;
}

/// `setTimeout` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    type Handle = Timeout;

    fn start(&self, delay_ms: u32, callback: Task) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}

/// Something that runs a task once, later.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task);
}

struct Pending<H> {
    task: Option<Task>,
    timer: Option<H>,
}

struct Inner<H> {
    next_key: u64,
    /// Entry whose task is running right now
    firing: Option<u64>,
    pending: HashMap<u64, Pending<H>>,
}

impl<H> Default for Inner<H> {
    fn default() -> Self {
        Self {
            next_key: 0,
            firing: None,
            pending: HashMap::new(),
        }
    }
}

/// Tasks that run once after a delay.
///
/// Owned by the component that schedules them. When the component goes away
/// it calls [`DeferredTasks::flush`], which cancels the timers and runs every
/// task that has not fired yet, so no follow-up is silently lost.
pub struct DeferredTasks<T: Timers = BrowserTimers> {
    timers: T,
    inner: Rc<RefCell<Inner<T::Handle>>>,
}

impl Default for DeferredTasks<BrowserTimers> {
    fn default() -> Self {
        Self::new(BrowserTimers)
    }
}

impl<T: Timers> DeferredTasks<T> {
    pub fn new(timers: T) -> Self {
        Self {
            timers,
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    pub fn schedule(&self, delay_ms: u32, task: impl FnOnce() + 'static) {
        let key = {
            let mut inner = self.inner.borrow_mut();
            // Fired entries only keep their timer handle around. The one
            // running right now must outlive its own callback.
            let firing = inner.firing;
            inner
                .pending
                .retain(|key, p| p.task.is_some() || Some(*key) == firing);
            inner.next_key += 1;
            inner.next_key
        };

        let weak: Weak<RefCell<Inner<T::Handle>>> = Rc::downgrade(&self.inner);
        let timer = self.timers.start(
            delay_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let task = {
                    let mut inner = inner.borrow_mut();
                    let task = inner.pending.get_mut(&key).and_then(|p| p.task.take());
                    if task.is_some() {
                        inner.firing = Some(key);
                    }
                    task
                };
                if let Some(task) = task {
                    task();
                    inner.borrow_mut().firing = None;
                }
            }),
        );

        self.inner.borrow_mut().pending.insert(
            key,
            Pending {
                task: Some(Box::new(task)),
                timer: Some(timer),
            },
        );
    }

    pub fn has_pending(&self) -> bool {
        self.inner
            .borrow()
            .pending
            .values()
            .any(|p| p.task.is_some())
    }

    /// Cancel all timers and run whatever has not fired yet.
    pub fn flush(&self) {
        let drained: Vec<Pending<T::Handle>> = self
            .inner
            .borrow_mut()
            .pending
            .drain()
            .map(|(_, p)| p)
            .collect();

        for mut pending in drained {
            drop(pending.timer.take());
            if let Some(task) = pending.task.take() {
                task();
            }
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

impl<T: Timers> Scheduler for DeferredTasks<T> {
    fn schedule(&self, delay_ms: u32, task: Task) {
        DeferredTasks::schedule(self, delay_ms, task);
    }
}

/// Timers that only fire when told to.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ManualTimers {
    due: Rc<RefCell<Vec<(u32, Task)>>>,
}

#[cfg(test)]
impl ManualTimers {
    pub(crate) fn delays(&self) -> Vec<u32> {
        self.due.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Fire every timer started so far.
    pub(crate) fn fire_all(&self) {
        let due = std::mem::take(&mut *self.due.borrow_mut());
        for (_, callback) in due {
            callback();
        }
    }
}

#[cfg(test)]
impl Timers for ManualTimers {
    type Handle = ();

    fn start(&self, delay_ms: u32, callback: Task) {
        self.due.borrow_mut().push((delay_ms, callback));
    }
}
