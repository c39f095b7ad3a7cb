//! The resource-management walkthrough
//!
//! Each step writes to a file in the demo directory and explains how the
//! file gets closed on the way out.

use scoped_core::{
    AccessMode, Error, Result, ResultExt, DEMO_FILE_NAME, DEMO_MANAGER_FILE_NAME,
    SCOPED_DEMO_DIR_VAR,
};
use scoped_scope::{file_manager, with_scope, FileManager};
use scoped_utils::ReleaseGuard;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn execute(dir: Option<PathBuf>) -> Result<()> {
    let dir = resolve_dir(dir)?;
    fs::create_dir_all(&dir).map_err(|e| Error::file_system(&dir, "create demo directory", e))?;
    tracing::debug!(dir = %dir.display(), "demo_started");

    let file_path = dir.join(DEMO_FILE_NAME);
    let manager_path = dir.join(DEMO_MANAGER_FILE_NAME);

    heading("RESOURCE MANAGEMENT");
    println!("Resources such as files or connections are limited; release them as soon as you stop using them.");

    heading("Manual release");
    manual_release(&file_path)?;
    println!("Opened {DEMO_FILE_NAME}, wrote a line, closed it. If the write had failed, the close would have been skipped.");

    heading("Guaranteed release");
    guaranteed_release(&file_path)?;
    println!("The close sits in a guard that runs on success, on error, and on panic.");

    heading("Scope of a value");
    owned_scope(&file_path)?;
    println!("Dropping the handle at the end of the block closes it, whatever path leaves the block.");

    heading("Own manager as an object");
    let mut manager = FileManager::new(&manager_path, AccessMode::Write);
    with_scope(&mut manager, |f| Ok(f.write_all(b"Test")?))?;
    println!(
        "FileManager::enter opened {DEMO_MANAGER_FILE_NAME}, exit closed it (open now: {}).",
        manager.is_open()
    );

    heading("Own manager as a function");
    file_manager(&manager_path, AccessMode::Write).run(|f| Ok(f.write_all(b"Test2")?))?;
    println!("file_manager acquired, suspended once for the body, then released.");

    heading("Result");
    for path in [&file_path, &manager_path] {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read back", e))?;
        println!("{}: {contents:?}", path.display());
    }

    Ok(())
}

fn resolve_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir);
    }
    if let Ok(dir) = env::var(SCOPED_DEMO_DIR_VAR) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    env::current_dir().context("resolving the demo directory")
}

fn heading(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "-".repeat(40));
}

/// Open, write, close, with nothing protecting the close
fn manual_release(path: &Path) -> Result<()> {
    let mut f = File::create(path).map_err(|e| Error::acquisition(path, "create", e))?;
    f.write_all(b"Hello World")?;
    drop(f);
    Ok(())
}

/// Release placed in a guard so it runs whether or not the write succeeds
fn guaranteed_release(path: &Path) -> Result<()> {
    let f = File::create(path).map_err(|e| Error::acquisition(path, "create", e))?;
    let mut f = ReleaseGuard::new(f, path.display().to_string(), |f: File| f.sync_all());
    if let Err(e) = f.write_all(b"Hello worlds") {
        println!("Error occured: {e}");
    }
    f.release().map_err(|e| Error::release(path, e))
}

/// The handle's own scope closes it
fn owned_scope(path: &Path) -> Result<()> {
    let mut f = File::create(path).map_err(|e| Error::acquisition(path, "create", e))?;
    f.write_all(b"Hello world")?;
    Ok(())
}
