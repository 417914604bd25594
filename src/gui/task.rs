//! Background work for the UI thread.
//! Jobs run on a detached thread and report over a channel that the
//! app polls once per frame.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// Outcome of polling a background job.
#[derive(Debug, PartialEq)]
pub enum TaskStatus<T> {
    Running,
    Done(T),
    /// The worker went away without reporting (it panicked).
    Lost,
}

/// A single-result background job.
pub struct Pending<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = channel();
        thread::spawn(move || {
            let _ = tx.send(job());
        });
        Self { rx }
    }

    pub fn poll(&self) -> TaskStatus<T> {
        match self.rx.try_recv() {
            Ok(value) => TaskStatus::Done(value),
            Err(TryRecvError::Empty) => TaskStatus::Running,
            Err(TryRecvError::Disconnected) => TaskStatus::Lost,
        }
    }

    /// Block until the job reports.
    #[cfg(test)]
    pub fn wait(self) -> Option<T> {
        self.rx.recv().ok()
    }
}

/// Poll an optional job slot, clearing it once the job has finished.
/// Returns `Some(None)` if the worker was lost.
pub fn take_finished<T: Send + 'static>(slot: &mut Option<Pending<T>>) -> Option<Option<T>> {
    let status = slot.as_ref()?.poll();
    match status {
        TaskStatus::Running => None,
        TaskStatus::Done(value) => {
            *slot = None;
            Some(Some(value))
        }
        TaskStatus::Lost => {
            *slot = None;
            Some(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::sync_channel;

    #[test]
    fn reports_result_once() {
        let (gate_tx, gate_rx) = sync_channel::<()>(0);
        let mut slot = Some(Pending::spawn(move || {
            gate_rx.recv().ok();
            7
        }));

        assert_eq!(take_finished(&mut slot), None);
        gate_tx.send(()).unwrap();

        let mut result = None;
        while result.is_none() {
            result = take_finished(&mut slot);
            thread::yield_now();
        }
        assert_eq!(result, Some(Some(7)));
        assert!(slot.is_none());
    }

    #[test]
    fn panicking_worker_is_lost() {
        let pending: Pending<u8> = Pending::spawn(|| panic!("worker failed"));
        assert_eq!(pending.wait(), None);
    }
}
