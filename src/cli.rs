use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::{DocumentType, OutputFormat};
use crate::config::Overrides;

/// Analyze repositories and SBOMs with the Kusari platform
#[derive(Parser, Debug)]
#[command(name = "kusari")]
#[command(version)]
#[command(about = "Analyze repositories and SBOMs with the Kusari platform", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options accepted by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to a kusari.config.yml (defaults to ./kusari.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print diagnostic logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Platform API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub platform_url: Option<String>,

    /// Authorization server base URL
    #[arg(long, global = true, value_name = "URL")]
    pub auth_endpoint: Option<String>,

    /// Web console base URL used for result links
    #[arg(long, global = true, value_name = "URL")]
    pub console_url: Option<String>,

    /// OAuth client id
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// OAuth client secret; enables non-interactive logins
    #[arg(long, global = true, env = "KUSARI_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Directory holding tokens.json and workspace.json (defaults to ~/.kusari)
    #[arg(long, global = true, env = "KUSARI_STATE_DIR", value_name = "DIR")]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in to or out of the platform
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Analyze a git repository
    #[command(subcommand)]
    Repo(RepoCommand),

    /// Work with documents stored on the platform
    #[command(subcommand)]
    Platform(PlatformCommand),
}

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Log in through the browser, or with the client secret when one is set
    Login {
        /// Seconds to wait for the browser login to complete
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Local port receiving the login redirect (random in 8009-8013 by default)
        #[arg(long, value_name = "PORT")]
        redirect_port: Option<u16>,
    },

    /// Remove the stored session and workspace selection
    Logout,
}

/// `--wait` / `--no-wait` pair, waiting by default
#[derive(Args, Debug, Clone, Copy)]
pub struct WaitArgs {
    /// Wait for the analysis result (default)
    #[arg(long, overrides_with = "no_wait")]
    wait: bool,

    /// Submit and exit without waiting for the result
    #[arg(long, overrides_with = "wait")]
    no_wait: bool,
}

impl WaitArgs {
    pub fn should_wait(&self) -> bool {
        !self.no_wait
    }
}

#[derive(Subcommand, Debug)]
pub enum RepoCommand {
    /// Analyze the changes between a revision and the working tree
    Scan {
        /// Repository directory
        dir: PathBuf,

        /// Revision to diff against (branch, tag or commit)
        rev: String,

        /// Output format: markdown or sarif
        #[arg(long, default_value = "markdown")]
        output_format: OutputFormat,

        /// Write the rendered result to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        output_file: Option<PathBuf>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Run a full repository health check
    RiskCheck {
        /// Repository directory
        dir: PathBuf,

        /// Write the rendered report to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        output_file: Option<PathBuf>,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlatformCommand {
    /// Upload SBOM or VEX documents to the selected tenant
    Upload {
        /// Documents to upload
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Document type: sbom or vex
        #[arg(long, default_value = "sbom")]
        document_type: DocumentType,

        /// Tag attached to every uploaded document
        #[arg(long)]
        tag: Option<String>,

        /// Software the documents belong to
        #[arg(long)]
        software_id: Option<String>,

        /// Check the uploaded SBOMs against the blocked-package list (implies --wait)
        #[arg(long)]
        check_blocked_packages: bool,

        /// Wait until the platform has ingested every document
        #[arg(long)]
        wait: bool,
    },
}

impl Cli {
    /// Configuration overrides given on the command line or in the environment
    pub fn overrides(&self) -> Overrides {
        let (redirect_port, login_timeout_secs) = match &self.command {
            Command::Auth(AuthCommand::Login {
                timeout,
                redirect_port,
            }) => (*redirect_port, *timeout),
            _ => (None, None),
        };

        Overrides {
            platform_url: self.global.platform_url.clone(),
            auth_endpoint: self.global.auth_endpoint.clone(),
            console_url: self.global.console_url.clone(),
            client_id: self.global.client_id.clone(),
            client_secret: self.global.client_secret.clone(),
            redirect_port,
            login_timeout_secs,
            state_dir: self.global.state_dir.clone(),
            verbose: self.global.verbose,
        }
    }
}
