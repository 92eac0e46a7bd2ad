/// Git adapter driving the `git` command-line tool
mod git_cli;

pub use git_cli::GitCli;
