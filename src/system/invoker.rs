// src/system/invoker.rs

use crate::models::{ExecOutput, Invocation};
use std::io::Read;
use std::process::{Command as StdCommand, Stdio};
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("'{program}' could not be started: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{program}' exited with status {code}.\n{stderr}")]
    NonZeroExit {
        program: String,
        code: i32,
        stderr: String,
        #[source]
        stream: Option<std::io::Error>,
    },
    #[error("Failed to capture output of '{program}'.")]
    Stream {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs a composed invocation to completion and captures its output.
///
/// The call blocks until the process exits; the only timeout in play is the
/// `--timeout` flag the tool itself accepts. Each invocation launches exactly
/// once, with no retries. Both output pipes are drained on their own threads
/// so a chatty process cannot deadlock against a full pipe while we wait on
/// the other stream.
pub fn invoke(invocation: &Invocation) -> Result<ExecOutput, InvokeError> {
    let Some(program) = invocation.program() else {
        return Err(InvokeError::EmptyCommand);
    };
    let program = program.to_string();

    log::debug!(
        "Launching {:?} (cwd: {})",
        invocation.argv,
        invocation.cwd.display()
    );

    let mut child = StdCommand::new(&program)
        .args(invocation.argv.iter().skip(1))
        .current_dir(&invocation.cwd)
        .env_clear()
        .envs(&invocation.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| InvokeError::Launch {
            program: program.clone(),
            source,
        })?;

    let stdout_reader = child.stdout.take().map(drain_in_background);
    let stderr_reader = child.stderr.take().map(drain_in_background);

    let status = child.wait().map_err(|source| InvokeError::Stream {
        program: program.clone(),
        source,
    })?;

    let (stdout, stdout_err) = collect_stream(stdout_reader);
    let (stderr, stderr_err) = collect_stream(stderr_reader);
    let stream_error = stdout_err.or(stderr_err);

    let exit_code = status.code().unwrap_or(-1);
    if !status.success() && !invocation.ignore_exit_value {
        // A concurrent capture failure never masks the exit status; it rides
        // along as the error's source instead.
        return Err(InvokeError::NonZeroExit {
            program,
            code: exit_code,
            stderr,
            stream: stream_error,
        });
    }
    if let Some(source) = stream_error {
        return Err(InvokeError::Stream { program, source });
    }

    Ok(ExecOutput {
        exit_code,
        stdout,
        stderr,
    })
}

type StreamHandle = thread::JoinHandle<Result<Vec<u8>, std::io::Error>>;

/// Consumes a pipe incrementally on a dedicated thread.
fn drain_in_background<R: Read + Send + 'static>(mut pipe: R) -> StreamHandle {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        pipe.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn collect_stream(handle: Option<StreamHandle>) -> (String, Option<std::io::Error>) {
    let Some(handle) = handle else {
        return (String::new(), None);
    };
    match handle.join() {
        Ok(Ok(bytes)) => (String::from_utf8_lossy(&bytes).into_owned(), None),
        Ok(Err(source)) => (String::new(), Some(source)),
        Err(_) => (
            String::new(),
            Some(std::io::Error::other("output capture thread panicked")),
        ),
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sh(script: &str) -> Invocation {
        Invocation {
            argv: vec!["/bin/sh".to_string(), "-c".to_string(), script.to_string()],
            env: std::env::vars().collect(),
            cwd: std::env::current_dir().unwrap(),
            ignore_exit_value: false,
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_stderr() {
        let output = invoke(&sh("echo visible; echo hidden >&2")).unwrap();
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "visible\n");
        assert_eq!(output.stderr, "hidden\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_preserves_stderr_verbatim() {
        let err = invoke(&sh("echo 'Error: release not found' >&2; exit 1")).unwrap_err();
        match err {
            InvokeError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, 1);
                assert_eq!(stderr, "Error: release not found\n");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_ignore_exit_value_reports_the_real_code() {
        let mut invocation = sh("exit 3");
        invocation.ignore_exit_value = true;
        let output = invoke(&invocation).unwrap();
        assert_eq!(output.exit_code, 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_executable_is_a_launch_failure() {
        let invocation = Invocation {
            argv: vec!["/nonexistent/helm-binary".to_string()],
            env: BTreeMap::new(),
            cwd: std::env::current_dir().unwrap(),
            ignore_exit_value: false,
        };
        let err = invoke(&invocation).unwrap_err();
        assert!(matches!(err, InvokeError::Launch { .. }));
    }

    #[test]
    fn test_empty_argv_is_rejected() {
        let invocation = Invocation {
            argv: Vec::new(),
            env: BTreeMap::new(),
            cwd: PathBuf::from("."),
            ignore_exit_value: false,
        };
        assert!(matches!(
            invoke(&invocation).unwrap_err(),
            InvokeError::EmptyCommand
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_environment_is_exactly_the_descriptor_env() {
        let mut invocation = sh("printf '%s' \"$HELM_HOST\"");
        invocation
            .env
            .insert("HELM_HOST".to_string(), "localhost:44134".to_string());
        let output = invoke(&invocation).unwrap();
        assert_eq!(output.stdout, "localhost:44134");
    }

    #[cfg(unix)]
    #[test]
    fn test_working_directory_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let mut invocation = sh("pwd");
        invocation.cwd = dir.path().to_path_buf();
        let output = invoke(&invocation).unwrap();
        let reported = PathBuf::from(output.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_does_not_deadlock() {
        // Well past any pipe buffer size, on both streams at once.
        let output = invoke(&sh(
            "i=0; while [ $i -lt 20000 ]; do echo 0123456789abcdef; echo fedcba9876543210 >&2; i=$((i+1)); done",
        ))
        .unwrap();
        assert_eq!(output.stdout.lines().count(), 20000);
        assert_eq!(output.stderr.lines().count(), 20000);
    }
}
