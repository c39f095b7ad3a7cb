use super::Form;
use scoped_core::{Error, ResourceConfig, Result};
use scoped_scope::{file_manager, with_scope, FileManager, LockedFileManager};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Arguments of `scoped write`
pub struct WriteRequest {
    pub path: PathBuf,
    pub text: String,
    pub mode: String,
    pub form: Form,
    pub fail: bool,
    pub json: bool,
}

/// What happened inside one scope
#[derive(Debug, Serialize)]
pub struct ScopeReport {
    pub target: ResourceConfig,
    pub form: Form,
    pub acquired: bool,
    pub released: bool,
    pub bytes_written: usize,
    pub suppressed: bool,
    pub failure: Option<String>,
}

pub fn execute(request: WriteRequest) -> Result<()> {
    let config = ResourceConfig::parse(&request.path, &request.mode)?;
    if !config.mode().is_writable() {
        return Err(Error::configuration(format!(
            "mode '{}' does not allow writing",
            config.mode()
        )));
    }

    let (report, result) = write_through(&config, request.form, &request.text, request.fail);

    if request.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.failure.is_none() {
        println!(
            "Wrote {} bytes to {} ({:?} form); released.",
            report.bytes_written,
            config.path().display(),
            report.form
        );
    }

    result
}

/// Run one scope over `config` and describe it
pub fn write_through(
    config: &ResourceConfig,
    form: Form,
    text: &str,
    fail: bool,
) -> (ScopeReport, Result<()>) {
    let body = |f: &mut File| -> Result<usize> {
        if fail {
            return Err(Error::body("failure requested with --fail"));
        }
        f.write_all(text.as_bytes())?;
        Ok(text.len())
    };

    let result = match form {
        Form::Object => with_scope(&mut FileManager::from_config(config.clone()), body),
        Form::Locked => with_scope(
            &mut LockedFileManager::new(config.path(), config.mode()),
            body,
        ),
        Form::Suspension => file_manager(config.path(), config.mode()).run(body),
    };

    let (bytes_written, suppressed, result) = match result {
        Ok(Some(written)) => (written, false, Ok(())),
        Ok(None) => (0, true, Ok(())),
        Err(e) => (0, false, Err(e)),
    };

    let acquired = !matches!(&result, Err(e) if e.is_acquisition());
    let released = acquired && !matches!(&result, Err(e) if e.is_release());

    let report = ScopeReport {
        target: config.clone(),
        form,
        acquired,
        released,
        bytes_written,
        suppressed,
        failure: result.as_ref().err().map(ToString::to_string),
    };
    (report, result)
}
