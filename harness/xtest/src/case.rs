//! Test cases: the unit the driver invokes.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe, Location};

use xtest_core::RunResult;

use crate::{measure, Assertions, Session};

/// Something the driver can run.
///
/// `invoke_test` runs the case's methods to completion and records exactly
/// one [`RunResult`] per method into the session before returning. It must
/// not panic: anything that goes wrong inside a method is turned into a
/// failure record instead.
pub trait TestCase {
    /// Name used to group this case's methods.
    fn name(&self) -> &str;

    fn invoke_test(&self, session: &mut Session<'_>);
}

type TestBody = Box<dyn Fn(&mut Assertions<'_, '_>)>;

struct TestMethod {
    name: String,
    body: TestBody,
    /// Where the method was registered; panics are attributed here.
    location: &'static Location<'static>,
}

/// A named group of test methods, run in registration order.
pub struct Suite {
    name: String,
    methods: Vec<TestMethod>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Suite {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Register a test method.
    #[track_caller]
    #[must_use]
    pub fn test(
        mut self,
        name: impl Into<String>,
        body: impl Fn(&mut Assertions<'_, '_>) + 'static,
    ) -> Self {
        self.methods.push(TestMethod {
            name: name.into(),
            body: Box::new(body),
            location: Location::caller(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Method names in registration order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.methods.iter().map(|m| m.name.as_str())
    }
}

impl TestCase for Suite {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke_test(&self, session: &mut Session<'_>) {
        for method in &self.methods {
            let id = format!("{}.{}", self.name, method.name);
            let run = run_method(&id, method, session);
            session.record(run);
        }
    }
}

/// Run one method body, converting an escaping panic into an unexpected failure.
fn run_method(id: &str, method: &TestMethod, session: &mut Session<'_>) -> RunResult {
    let mut assertions = Assertions::new(id, session);

    let (outcome, duration) = measure(|| {
        panic::catch_unwind(AssertUnwindSafe(|| (method.body)(&mut assertions)))
    });

    if let Err(payload) = outcome {
        tracing::debug!(method = id, "test body panicked");
        let message = panic_message(&*payload);
        assertions.record_at(method.location, "uncaught panic", &message, false);
    }

    RunResult::new(id, duration, assertions.into_failures())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
