use crate::document::Document;

/// Deferred work scheduled with [`Document::set_timeout`].
pub type Task = Box<dyn FnOnce(&mut Document)>;

/// Handle returned by [`Document::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub(crate) struct TimerEntry {
    id: TimerId,
    task: Task,
}

impl Document {
    /// Schedule `task` for the next turn of the event loop.
    pub fn set_timeout(&mut self, task: impl FnOnce(&mut Document) + 'static) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push_back(TimerEntry {
            id,
            task: Box::new(task),
        });
        log::trace!("[timers] scheduled {:?}", id);
        id
    }

    /// Cancel a pending timer. Returns false if it already ran or was
    /// cancelled.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|entry| entry.id != id);
        self.timers.len() != before
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Run one turn: every timer that was pending when this was called, in
    /// scheduling order. Timers scheduled by those tasks wait for the next
    /// turn; timers cancelled by an earlier task in the batch are skipped.
    /// Returns the number of tasks run.
    pub fn run_timers(&mut self) -> usize {
        let batch: Vec<TimerId> = self.timers.iter().map(|entry| entry.id).collect();
        let mut ran = 0;
        for id in batch {
            let Some(position) = self.timers.iter().position(|entry| entry.id == id) else {
                continue;
            };
            if let Some(entry) = self.timers.remove(position) {
                (entry.task)(self);
                ran += 1;
            }
        }
        ran
    }
}
