//! Invoke implements the Container Invoker: assembling the container-runtime argv and running it
//! with the envelope piped through stdin/stdout/stderr.

use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use api::{ContainerSpec, StorageMount};
use tracing::{debug, trace};

use crate::Result;

/// Invocation is the outcome of running a function: its captured stdout/stderr and exit status.
pub struct Invocation {
    /// Status is the child process's exit status.
    pub status: ExitStatus,
    /// Stdout is the child's captured standard output (the candidate output envelope).
    pub stdout: Vec<u8>,
    /// Stderr is the child's captured standard error, for diagnostic surfacing.
    pub stderr: Vec<u8>,
}

/// Exec is the seam between "build an argv" and "run a child process". Production callers use
/// [`docker_argv`]; tests substitute a directly-executable program to avoid depending on a
/// container runtime.
pub trait Exec {
    /// Argv returns the program and its arguments, in the exact order they should be passed to
    /// [`std::process::Command`].
    fn argv(&self, spec: &ContainerSpec, network: &str) -> Vec<String>;

    /// Requires_image reports whether this invoker needs `container.image` to have been present
    /// in the function spec. The reference docker runtime does; a test hook that substitutes a
    /// fixed argv does not, per the "argv supplied directly" escape hatch.
    fn requires_image(&self) -> bool {
        true
    }
}

/// DockerRuntime assembles the reference `docker run` invocation.
pub struct DockerRuntime;

impl Exec for DockerRuntime {
    fn argv(&self, spec: &ContainerSpec, network: &str) -> Vec<String> {
        docker_argv(spec, network)
    }
}

/// TestExec substitutes a fixed argv (e.g. `["sed", "s/a/b/"]`), ignoring the container spec
/// entirely, so integration tests can exercise the orchestrator without a container runtime.
pub struct TestExec(pub Vec<String>);

impl Exec for TestExec {
    fn argv(&self, _spec: &ContainerSpec, _network: &str) -> Vec<String> {
        self.0.clone()
    }

    fn requires_image(&self) -> bool {
        false
    }
}

/// Docker_argv builds the exact `docker run` argv for a container spec, per the documented
/// contract: `--rm`, attached stdio, network policy, read-only mounts, then env-var name
/// forwarding, then the image.
pub fn docker_argv(spec: &ContainerSpec, network: &str) -> Vec<String> {
    let mut argv = vec![
        "docker".to_string(),
        "run".to_string(),
        "--rm".to_string(),
        "-i".to_string(),
        "-a".to_string(),
        "STDIN".to_string(),
        "-a".to_string(),
        "STDOUT".to_string(),
        "-a".to_string(),
        "STDERR".to_string(),
        "--network".to_string(),
        network.to_string(),
        "--user".to_string(),
        "nobody".to_string(),
        "--security-opt=no-new-privileges".to_string(),
    ];

    for mount in &spec.mounts {
        argv.push("--mount".to_string());
        argv.push(mount_flag(mount));
    }

    for (name, _) in std::env::vars_os() {
        let Some(name) = name.to_str() else { continue };
        if name.is_empty() {
            continue;
        }
        argv.push("-e".to_string());
        argv.push(name.to_string());
    }

    argv.push(spec.image.clone());
    argv
}

fn mount_flag(mount: &StorageMount) -> String {
    format!("type={},src={},dst={}:ro", mount.kind, mount.src, mount.dst)
}

/// Run executes `exec`'s argv against `spec`, piping `stdin` in and capturing stdout/stderr.
/// Stdin is written from a helper thread so a large envelope cannot deadlock against an
/// unread stdout pipe.
pub fn run(exec: &dyn Exec, spec: &ContainerSpec, network: &str, stdin: &[u8]) -> Result<Invocation> {
    let argv = exec.argv(spec, network);
    debug!(argv = ?argv, "assembled container invocation");

    let (program, args) = argv.split_first().expect("argv always has at least the program name");
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut child_stdin = child.stdin.take().expect("stdin was piped");
    let stdin_bytes = stdin.to_vec();
    let writer = thread::spawn(move || child_stdin.write_all(&stdin_bytes));

    let mut stdout = Vec::new();
    child
        .stdout
        .take()
        .expect("stdout was piped")
        .read_to_end(&mut stdout)?;
    let mut stderr = Vec::new();
    child
        .stderr
        .take()
        .expect("stderr was piped")
        .read_to_end(&mut stderr)?;

    writer.join().expect("stdin writer thread panicked")?;
    let status = child.wait()?;
    trace!(code = ?status.code(), "container exited");

    Ok(Invocation {
        status,
        stdout,
        stderr,
    })
}
