use super::{FragmentParams, Fragmenter};
use crate::error::{FragzError, Result};
use crate::model::FragmentMeta;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs the collaborator as a child process, one process per text.
#[derive(Debug, Clone)]
pub struct ProcessFragmenter {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessFragmenter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Arguments placed before `<mode> <target> <tolerance>`.
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, params: &FragmentParams) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(&params.mode)
            .arg(params.target.to_string())
            .arg(params.tolerance.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return child.wait().map_err(|e| failed(format!("wait failed: {}", e)));
        };

        let started = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if started.elapsed() >= timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(failed(format!(
                        "{} timed out after {}s",
                        self.program.display(),
                        timeout.as_secs_f64()
                    )));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(failed(format!("wait failed: {}", e))),
            }
        }
    }
}

impl Fragmenter for ProcessFragmenter {
    fn fragment(&self, text: &str, params: &FragmentParams) -> Result<Vec<FragmentMeta>> {
        log::debug!(
            "Running {} (mode={}, target={}, tolerance={}) on {} bytes",
            self.program.display(),
            params.mode,
            params.target,
            params.tolerance,
            text.len()
        );

        let mut child = self
            .command(params)
            .spawn()
            .map_err(|e| failed(format!("could not start {}: {}", self.program.display(), e)))?;

        // Pipes are serviced on their own threads so a large text cannot
        // fill one buffer while we block on another.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.as_bytes().to_vec();
            thread::spawn(move || stdin.write_all(&input))
        });
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = self.wait(&mut child)?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Ok(())) => {}
                // The child may legitimately exit without reading all input
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(failed(format!("writing input failed: {}", e))),
                Err(_) => return Err(failed("input writer panicked")),
            }
        }
        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;

        let stderr_text = String::from_utf8_lossy(&stderr);
        if !status.success() {
            return Err(failed(format!(
                "{} exited with {}: {}",
                self.program.display(),
                status,
                stderr_text.trim()
            )));
        }
        if !stderr_text.trim().is_empty() {
            log::warn!("Fragmenter stderr: {}", stderr_text.trim());
        }

        let pieces: Vec<FragmentMeta> = serde_json::from_slice(&stdout)
            .map_err(|e| failed(format!("failed to parse fragments: {}", e)))?;
        log::debug!("Fragmenter returned {} pieces", pieces.len());
        Ok(pieces)
    }
}

fn drain<R: Read + Send + 'static>(mut source: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        source.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>> {
    match handle {
        None => Ok(Vec::new()),
        Some(h) => match h.join() {
            Ok(Ok(buf)) => Ok(buf),
            Ok(Err(e)) => Err(failed(format!("reading output failed: {}", e))),
            Err(_) => Err(failed("output reader panicked")),
        },
    }
}

fn failed(msg: impl Into<String>) -> FragzError {
    FragzError::FragmentationFailed(msg.into())
}
