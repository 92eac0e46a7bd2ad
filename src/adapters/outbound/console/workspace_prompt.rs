use crate::inspection::domain::WorkspaceCandidate;
use crate::ports::outbound::WorkspacePrompt;
use crate::shared::Result;
use async_trait::async_trait;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Arc, Mutex};

/// ConsoleWorkspacePrompt adapter printing a numbered list and reading the
/// choice, asking again until a valid number is entered
///
/// Reading happens on tokio's blocking pool so an interrupt is still
/// observed while the prompt waits.
pub struct ConsoleWorkspacePrompt<R, W> {
    io: Arc<Mutex<PromptIo<R, W>>>,
}

struct PromptIo<R, W> {
    input: R,
    output: W,
}

impl ConsoleWorkspacePrompt<BufReader<io::Stdin>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConsoleWorkspacePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Arc::new(Mutex::new(PromptIo { input, output })),
        }
    }
}

fn parse_choice(line: &str, count: usize) -> Option<usize> {
    line.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
        .map(|n| n - 1)
}

impl<R: BufRead, W: Write> PromptIo<R, W> {
    fn choose(&mut self, candidates: &[WorkspaceCandidate]) -> Result<usize> {
        writeln!(self.output, "Available workspaces:")?;
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, candidate)?;
        }

        loop {
            write!(self.output, "Select a workspace [1-{}]: ", candidates.len())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                anyhow::bail!("No workspace selected: input closed");
            }
            match parse_choice(&line, candidates.len()) {
                Some(index) => return Ok(index),
                None => writeln!(
                    self.output,
                    "Invalid selection '{}', try again.",
                    line.trim()
                )?,
            }
        }
    }
}

#[async_trait]
impl<R, W> WorkspacePrompt for ConsoleWorkspacePrompt<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    async fn choose(&self, candidates: &[WorkspaceCandidate]) -> Result<usize> {
        let io = Arc::clone(&self.io);
        let candidates = candidates.to_vec();
        tokio::task::spawn_blocking(move || {
            let mut io = io.lock().map_err(|_| {
                anyhow::anyhow!("Workspace prompt is unusable after an earlier panic")
            })?;
            io.choose(&candidates)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::domain::Workspace;
    use std::io::{Cursor, Read};
    use std::sync::mpsc;
    use std::time::Duration;

    fn candidates() -> Vec<WorkspaceCandidate> {
        ["a", "b", "c"]
            .iter()
            .map(|id| WorkspaceCandidate {
                workspace: Workspace {
                    id: id.to_string(),
                    description: format!("Workspace {id}"),
                },
                tenant: format!("tenant-{id}"),
            })
            .collect()
    }

    fn written(prompt: &ConsoleWorkspacePrompt<Cursor<&'static str>, Vec<u8>>) -> String {
        String::from_utf8(prompt.io.lock().unwrap().output.clone()).unwrap()
    }

    /// Input fed line by line from another task; reads as closed after a
    /// short wait with nothing sent
    struct ChannelInput {
        lines: mpsc::Receiver<String>,
        pending: Vec<u8>,
    }

    impl Read for ChannelInput {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pending.is_empty() {
                match self.lines.recv_timeout(Duration::from_secs(2)) {
                    Ok(line) => self.pending = line.into_bytes(),
                    Err(_) => return Ok(0),
                }
            }
            let n = buf.len().min(self.pending.len());
            buf[..n].copy_from_slice(&self.pending[..n]);
            self.pending.drain(..n);
            Ok(n)
        }
    }

    #[tokio::test]
    async fn test_valid_choice() {
        let prompt = ConsoleWorkspacePrompt::new(Cursor::new("2\n"), Vec::new());
        assert_eq!(prompt.choose(&candidates()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_loops_until_valid() {
        let prompt = ConsoleWorkspacePrompt::new(Cursor::new("0\nabc\n9\n3\n"), Vec::new());
        assert_eq!(prompt.choose(&candidates()).await.unwrap(), 2);

        let output = written(&prompt);
        assert!(output.contains("1) Workspace a (tenant: tenant-a)"));
        assert_eq!(output.matches("Invalid selection").count(), 3);
    }

    #[tokio::test]
    async fn test_closed_input_is_error() {
        let prompt = ConsoleWorkspacePrompt::new(Cursor::new("x\n"), Vec::new());
        let err = prompt.choose(&candidates()).await.unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[tokio::test]
    async fn test_runtime_keeps_running_while_waiting_for_input() {
        // Single-threaded runtime: the answer can only be sent if the read
        // does not occupy the runtime thread
        let (sender, lines) = mpsc::channel();
        let input = BufReader::new(ChannelInput {
            lines,
            pending: Vec::new(),
        });
        let prompt = ConsoleWorkspacePrompt::new(input, Vec::new());

        let answer = tokio::spawn(async move {
            sender.send("3\n".to_string()).unwrap();
        });

        assert_eq!(prompt.choose(&candidates()).await.unwrap(), 2);
        answer.await.unwrap();
    }
}
