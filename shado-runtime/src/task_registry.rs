// Background task registry.
//
// Scripts may run work off the game thread through `spawn_task`. Every task
// receives a `CancelToken` and is expected to poll it; shutdown cancels all
// tasks and joins them. Nothing is ever killed forcibly. Finished tasks that
// nobody joined are reaped on the next spawn.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::JoinHandle;

use crate::error::{ShadoError, ShadoResult};
use crate::ffi_guard::panic_message;
use crate::lock_or_recover;

/// Cooperative cancellation flag handed to every task.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

struct TaskEntry {
    name: String,
    token: CancelToken,
    join: Option<JoinHandle<()>>,
}

fn registry() -> &'static Mutex<HashMap<u64, TaskEntry>> {
    static REGISTRY: OnceLock<Mutex<HashMap<u64, TaskEntry>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Start `f` on a named thread and register it.
///
/// Boundary calls made by the task wait for the scene lock, so they never
/// overlap calls from the game thread.
pub fn spawn_task<F>(name: &str, f: F) -> ShadoResult<TaskHandle>
where
    F: FnOnce(CancelToken) + Send + 'static,
{
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let token = CancelToken::default();
    let thread_token = token.clone();
    let task_name = name.to_owned();
    let join = std::thread::Builder::new()
        .name(format!("shado-task-{name}"))
        .spawn(move || {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(thread_token)));
            if let Err(payload) = result {
                tracing::error!(task = %task_name, "{}", panic_message(payload.as_ref()));
            }
        })
        .map_err(|e| ShadoError::Internal(format!("spawn task {name}: {e}")))?;

    let mut tasks = lock_or_recover(registry());
    reap_finished(&mut tasks);
    tasks.insert(id, TaskEntry { name: name.to_owned(), token: token.clone(), join: Some(join) });
    drop(tasks);
    tracing::debug!(task = name, id, "task started");
    Ok(TaskHandle { id, token })
}

fn reap_finished(tasks: &mut HashMap<u64, TaskEntry>) {
    tasks.retain(|_, entry| entry.join.as_ref().is_some_and(|join| !join.is_finished()));
}

/// Handle to a registered task. Dropping it leaves the task running; it is
/// still joined at shutdown.
#[derive(Debug)]
pub struct TaskHandle {
    id: u64,
    token: CancelToken,
}

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Request cancellation. The task stops when it next polls its token.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        lock_or_recover(registry())
            .get(&self.id)
            .and_then(|entry| entry.join.as_ref())
            .is_none_or(|join| join.is_finished())
    }

    /// Block until the task returns and drop it from the registry.
    pub fn join(self) {
        let entry = lock_or_recover(registry()).remove(&self.id);
        if let Some(join) = entry.and_then(|mut e| e.join.take()) {
            let _ = join.join();
        }
    }
}

/// Registered tasks that have not been joined yet.
pub fn active_count() -> usize {
    lock_or_recover(registry()).len()
}

/// Cancel every task, then wait for each to return. Returns how many were
/// joined.
pub fn shutdown_all() -> usize {
    let entries: Vec<TaskEntry> = lock_or_recover(registry()).drain().map(|(_, e)| e).collect();
    for entry in &entries {
        entry.token.cancel();
    }
    let count = entries.len();
    for mut entry in entries {
        if let Some(join) = entry.join.take() {
            if join.join().is_err() {
                tracing::warn!(task = %entry.name, "task thread did not exit cleanly");
            }
        }
    }
    if count > 0 {
        tracing::info!(count, "background tasks joined");
    }
    count
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;
    use crate::test_support::setup;

    #[test]
    fn shutdown_cancels_and_joins_every_task() {
        let _guard = setup();
        let exited = Arc::new(AtomicUsize::new(0));
        for i in 0..3 {
            let exited = exited.clone();
            spawn_task(&format!("spin{i}"), move |token| {
                while !token.is_cancelled() {
                    std::thread::sleep(Duration::from_millis(1));
                }
                exited.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        assert_eq!(active_count(), 3);
        assert_eq!(shutdown_all(), 3);
        assert_eq!(exited.load(Ordering::SeqCst), 3);
        assert_eq!(active_count(), 0);
    }

    #[test]
    fn cancel_then_join_one_task() {
        let _guard = setup();
        let handle = spawn_task("one", |token| {
            while !token.is_cancelled() {
                std::thread::sleep(Duration::from_millis(1));
            }
        })
        .unwrap();
        assert!(!handle.is_finished());
        handle.cancel();
        handle.join();
        assert_eq!(active_count(), 0);
        assert_eq!(shutdown_all(), 0);
    }

    #[test]
    fn finished_tasks_are_reaped_on_spawn() {
        let _guard = setup();
        let handles: Vec<_> = (0..5).map(|i| spawn_task(&format!("quick{i}"), |_| {}).unwrap()).collect();
        while !handles.iter().all(TaskHandle::is_finished) {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(active_count(), 5);

        let spinner = spawn_task("spinner", |token| {
            while !token.is_cancelled() {
                std::thread::sleep(Duration::from_millis(1));
            }
        })
        .unwrap();
        assert_eq!(active_count(), 1);
        assert!(handles.iter().all(TaskHandle::is_finished));
        spinner.cancel();
        spinner.join();
        assert_eq!(active_count(), 0);
    }

    #[test]
    fn panicking_task_does_not_poison_shutdown() {
        let _guard = setup();
        let handle = spawn_task("bad", |_| panic!("task failed")).unwrap();
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(shutdown_all(), 1);
    }
}
