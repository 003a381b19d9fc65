//! Task completion hooks
//!
//! Hooks are registered against an exact Gradle task name and run, in
//! registration order, after that task completes successfully.

use codsquad_core::error::{Result, ResultExt};
use tracing::{debug, info};

/// Action run after a Gradle task completes
pub trait TaskHook {
    /// Short label used in logs
    fn describe(&self) -> String {
        "hook".to_string()
    }

    /// Run the hook for the completed `task`
    fn run(&self, task: &str) -> Result<()>;
}

impl<F> TaskHook for F
where
    F: Fn(&str) -> Result<()>,
{
    fn run(&self, task: &str) -> Result<()> {
        self(task)
    }
}

/// Registry of hooks keyed by task name
#[derive(Default)]
pub struct TaskHooks {
    registered: Vec<(String, Box<dyn TaskHook>)>,
}

impl TaskHooks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` to run after `task` completes
    pub fn after(&mut self, task: impl Into<String>, hook: impl TaskHook + 'static) -> &mut Self {
        let task = task.into();
        debug!(task = %task, hook = %hook.describe(), "Registered task hook");
        self.registered.push((task, Box::new(hook)));
        self
    }

    /// Number of hooks registered for `task`
    pub fn count_for(&self, task: &str) -> usize {
        self.registered.iter().filter(|(name, _)| name == task).count()
    }

    /// Total number of registered hooks
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Names of tasks that have at least one hook, in registration order
    pub fn tasks(&self) -> Vec<&str> {
        let mut tasks: Vec<&str> = Vec::new();
        for (name, _) in &self.registered {
            if !tasks.contains(&name.as_str()) {
                tasks.push(name);
            }
        }
        tasks
    }

    /// Notify the registry that `task` completed
    ///
    /// Runs every hook registered under exactly this name and returns how many
    /// ran. The first failing hook stops dispatch and its error is returned.
    pub fn task_completed(&self, task: &str) -> Result<usize> {
        let mut fired = 0;
        for (name, hook) in &self.registered {
            if name != task {
                continue;
            }
            debug!(task, hook = %hook.describe(), "Running task hook");
            hook.run(task)
                .context(format!("After task {} ({})", task, hook.describe()))?;
            fired += 1;
        }

        if fired == 0 {
            debug!(task, "No hooks registered for task");
        } else {
            info!(task, fired, "Task hooks completed");
        }
        Ok(fired)
    }
}

impl std::fmt::Debug for TaskHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHooks")
            .field("tasks", &self.tasks())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codsquad_core::error::{Error, ErrorCode};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: Rc<RefCell<Vec<String>>>, label: &'static str) -> impl Fn(&str) -> Result<()> {
        move |task: &str| {
            log.borrow_mut().push(format!("{}:{}", label, task));
            Ok(())
        }
    }

    #[test]
    fn test_fires_only_for_exact_task_name() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = TaskHooks::new();
        hooks.after("assembleDebug", recorder(Rc::clone(&log), "copy"));

        assert_eq!(hooks.task_completed("assembleRelease").unwrap(), 0);
        assert_eq!(hooks.task_completed("assembledebug").unwrap(), 0);
        assert_eq!(hooks.task_completed("assembleDebugAndroidTest").unwrap(), 0);
        assert!(log.borrow().is_empty());

        assert_eq!(hooks.task_completed("assembleDebug").unwrap(), 1);
        assert_eq!(*log.borrow(), vec!["copy:assembleDebug".to_string()]);
    }

    #[test]
    fn test_runs_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = TaskHooks::new();
        hooks
            .after("assembleDebug", recorder(Rc::clone(&log), "first"))
            .after("assembleRelease", recorder(Rc::clone(&log), "other"))
            .after("assembleDebug", recorder(Rc::clone(&log), "second"));

        assert_eq!(hooks.count_for("assembleDebug"), 2);
        assert_eq!(hooks.tasks(), vec!["assembleDebug", "assembleRelease"]);
        assert_eq!(hooks.task_completed("assembleDebug").unwrap(), 2);
        assert_eq!(
            *log.borrow(),
            vec!["first:assembleDebug".to_string(), "second:assembleDebug".to_string()]
        );
    }

    #[test]
    fn test_failing_hook_stops_dispatch() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hooks = TaskHooks::new();
        hooks
            .after("assembleDebug", |_: &str| -> Result<()> {
                Err(Error::new(ErrorCode::PermissionDenied, "read-only target"))
            })
            .after("assembleDebug", recorder(Rc::clone(&log), "later"));

        let err = hooks.task_completed("assembleDebug").unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert!(err.context.unwrap().contains("assembleDebug"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let hooks = TaskHooks::new();
        assert!(hooks.is_empty());
        assert_eq!(hooks.task_completed("assembleDebug").unwrap(), 0);
    }
}
