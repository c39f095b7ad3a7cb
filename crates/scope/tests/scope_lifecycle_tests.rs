//! Integration tests for the acquire / use / release lifecycle

use proptest::prelude::*;
use scoped_core::{AccessMode, Error, Result};
use scoped_scope::{
    contextmanager, file_manager, settle, with_scope, ContextManager, FileManager, Outcome,
    Suspension,
};
use scoped_utils::ReleaseGuard;
use std::cell::Cell;
use std::fs;
use std::io::Write;
use std::rc::Rc;
use tempfile::TempDir;

/// Counts acquisitions and releases of a fake resource
#[derive(Default)]
struct Counters {
    acquired: Cell<usize>,
    released: Cell<usize>,
}

struct Probe {
    counters: Rc<Counters>,
    handle: Option<Vec<u8>>,
    fail_acquire: bool,
    suppress: bool,
}

impl Probe {
    fn new(counters: &Rc<Counters>) -> Self {
        Self {
            counters: Rc::clone(counters),
            handle: None,
            fail_acquire: false,
            suppress: false,
        }
    }
}

impl ContextManager for Probe {
    type Handle = Vec<u8>;

    fn enter(&mut self) -> Result<&mut Vec<u8>> {
        if self.fail_acquire {
            return Err(Error::acquisition(
                "probe",
                "open",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        self.counters.acquired.set(self.counters.acquired.get() + 1);
        Ok(self.handle.insert(Vec::new()))
    }

    fn exit(&mut self, outcome: Outcome<'_>) -> Result<bool> {
        self.handle = None;
        self.counters.released.set(self.counters.released.get() + 1);
        Ok(self.suppress && outcome.is_failure())
    }
}

#[test]
fn test_hello_world_written_and_released_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("file.txt");
    let releases = Cell::new(0);

    let scope = contextmanager(|cx: &mut Suspension<'_, fs::File>| {
        let file = fs::File::create(&path).map_err(|e| Error::acquisition(&path, "create", e))?;
        let mut file = ReleaseGuard::new(file, "file.txt", |f: fs::File| -> Result<()> {
            f.sync_all()?;
            releases.set(releases.get() + 1);
            Ok(())
        });
        let resumed = cx.suspend(&mut file);
        settle(&path, resumed, file.release())
    });
    scope.run(|f| Ok(f.write_all(b"Hello world")?)).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Hello world");
    assert_eq!(releases.get(), 1);
}

#[test]
fn test_object_form_hello_world() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("file.txt");

    let mut manager = FileManager::new(&path, AccessMode::Write);
    let written = with_scope(&mut manager, |f| {
        f.write_all(b"Hello world")?;
        Ok(11)
    })
    .unwrap();

    assert_eq!(written, Some(11));
    assert!(!manager.is_open());
    assert_eq!(fs::read_to_string(&path).unwrap(), "Hello world");
}

#[test]
fn test_failure_instead_of_write_still_releases() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("file.txt");

    let mut manager = FileManager::new(&path, AccessMode::Write);
    let err = with_scope(&mut manager, |_| -> Result<()> {
        Err(Error::body("Error occured"))
    })
    .unwrap_err();

    assert_eq!(err.to_string(), "Error occured");
    assert!(!manager.is_open());
    // The target was created and truncated on acquisition, then closed
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_suspension_form_failure_observed_by_caller() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.txt");

    let err = file_manager(&path, AccessMode::Write)
        .run(|f| -> Result<()> {
            f.write_all(b"half")?;
            Err(anyhow::anyhow!("gave up").into())
        })
        .unwrap_err();

    assert!(matches!(err, Error::Body { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "half");
}

#[test]
fn test_two_independent_scopes_in_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("file.txt");
    let second = temp_dir.path().join("test.txt");

    let mut a = FileManager::new(&first, AccessMode::Write);
    let mut b = FileManager::new(&second, AccessMode::Write);
    with_scope(&mut a, |f| Ok(f.write_all(b"Test")?)).unwrap();
    assert!(!a.is_open());
    file_manager(&second, AccessMode::Write)
        .run(|f| Ok(f.write_all(b"Test2")?))
        .unwrap();
    with_scope(&mut b, |f| Ok(f.write_all(b"Test3")?)).unwrap();

    assert_eq!(fs::read_to_string(&first).unwrap(), "Test");
    assert_eq!(fs::read_to_string(&second).unwrap(), "Test3");
}

#[test]
fn test_acquisition_failure_never_releases() {
    let counters = Rc::new(Counters::default());
    let mut probe = Probe::new(&counters);
    probe.fail_acquire = true;

    let mut ran = false;
    let err = with_scope(&mut probe, |_| {
        ran = true;
        Ok(())
    })
    .unwrap_err();

    assert!(err.is_acquisition());
    assert!(!ran);
    assert_eq!(counters.released.get(), 0);
}

#[test]
fn test_release_completes_before_scope_returns() {
    let counters = Rc::new(Counters::default());
    let mut probe = Probe::new(&counters);

    let seen_during_body = Cell::new(usize::MAX);
    let result = with_scope(&mut probe, |_| -> Result<()> {
        seen_during_body.set(counters.released.get());
        Err(Error::body("late"))
    });

    assert!(result.is_err());
    assert_eq!(seen_during_body.get(), 0);
    assert_eq!(counters.released.get(), 1);
}

#[test]
fn test_manager_reusable_after_scope() {
    let counters = Rc::new(Counters::default());
    let mut probe = Probe::new(&counters);

    for _ in 0..3 {
        with_scope(&mut probe, |buf| {
            buf.push(1);
            Ok(())
        })
        .unwrap();
    }

    assert_eq!(counters.acquired.get(), 3);
    assert_eq!(counters.released.get(), 3);
}

#[test]
fn test_panic_in_suspension_body_releases_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.txt");

    let result = std::panic::catch_unwind(|| {
        let _ = file_manager(&path, AccessMode::Write).run(|f| -> Result<()> {
            f.write_all(b"before panic")?;
            panic!("Simulated error");
        });
    });

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "before panic");
}

proptest! {
    /// Property: every successful acquisition is released exactly once,
    /// whatever the body does and whether or not the failure is suppressed
    #[test]
    fn release_exactly_once(fail_body in any::<bool>(), suppress in any::<bool>()) {
        let counters = Rc::new(Counters::default());
        let mut probe = Probe::new(&counters);
        probe.suppress = suppress;

        let result = with_scope(&mut probe, |buf| {
            buf.extend_from_slice(b"Hello world");
            if fail_body {
                Err(Error::body("failed"))
            } else {
                Ok(buf.len())
            }
        });

        prop_assert_eq!(counters.acquired.get(), 1);
        prop_assert_eq!(counters.released.get(), 1);
        match (fail_body, suppress) {
            (false, _) => {
                prop_assert_eq!(result.unwrap(), Some(11));
            }
            (true, true) => {
                prop_assert!(matches!(result, Ok(None)));
            }
            (true, false) => {
                prop_assert!(result.is_err());
            }
        }
    }

    /// Property: a suspension-form function is accepted only when it
    /// suspends exactly once
    #[test]
    fn suspension_count_enforced(times in 0usize..4) {
        let runs = Cell::new(0);
        let scope = contextmanager(|cx: &mut Suspension<'_, u8>| {
            let mut handle = 0u8;
            for _ in 0..times {
                cx.suspend(&mut handle)?;
            }
            Ok(())
        });
        let result = scope.run(|_| {
            runs.set(runs.get() + 1);
            Ok(())
        });

        prop_assert_eq!(runs.get(), usize::from(times > 0));
        if times == 1 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.unwrap_err().is_protocol());
        }
    }
}
