use kusari_cli::adapters::outbound::archive::TarBz2Writer;
use kusari_cli::adapters::outbound::console::{
    ConsoleWorkspacePrompt, StderrProgressReporter, SummaryTable, SystemBrowser,
};
use kusari_cli::adapters::outbound::filesystem::{CredentialFileStore, WorkspaceFileStore};
use kusari_cli::adapters::outbound::git::GitCli;
use kusari_cli::adapters::outbound::network::{
    build_client, draw_redirect_port, HttpBlobStore, LocalCallbackServer, OAuthClient,
    PlatformClient,
};
use kusari_cli::application::dto::{ScanRequest, UploadRequest};
use kusari_cli::application::factories::{FormatterFactory, PresenterFactory};
use kusari_cli::application::use_cases::{
    validate_repository, BlockedPackageChecker, BuildBundleUseCase, CheckedDocument,
    IngestionPoller, LoginUseCase, LogoutUseCase, ResolveWorkspaceUseCase, ResultPoller,
    ScanRepositoryUseCase, TrackedDocument, UploadDocumentsUseCase, WORK_DIR_NAME,
};
use kusari_cli::cli::{AuthCommand, Cli, Command, PlatformCommand, RepoCommand};
use kusari_cli::config::{discover_config, load_config_from_path, Settings};
use kusari_cli::inspection::domain::{Token, WorkspaceSelection};
use kusari_cli::ports::outbound::ProgressReporter;
use kusari_cli::shared::error::{ExitCode, PollError};
use kusari_cli::shared::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const LOG_ENV_VAR: &str = "KUSARI_LOG";

type Reporter<'a> = &'a StderrProgressReporter;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_logging(cli.global.verbose);

    // Dropping `run` on interrupt removes its temporary work directory
    let code = tokio::select! {
        result = run(cli) => match result {
            Ok(code) => code,
            Err(e) => {
                print_error(&e);
                exit_code_for(&e)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\n⚠️  Interrupted");
            ExitCode::Interrupted
        }
    };

    process::exit(code.as_i32());
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn print_error(e: &anyhow::Error) {
    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", e);

    // Display error chain
    let mut source = e.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }

    eprintln!();
}

/// A failed analysis is a check failure, everything else an application error
fn exit_code_for(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<PollError>() {
        Some(PollError::Failed { .. }) => ExitCode::ChecksFailed,
        _ => ExitCode::ApplicationError,
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.global.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let settings = Settings::resolve(config, cli.overrides())?;
    tracing::debug!(
        platform_url = %settings.platform_url,
        auth_endpoint = %settings.auth_endpoint,
        state_dir = %settings.state_dir.display(),
        "settings resolved"
    );

    let reporter = Arc::new(StderrProgressReporter::new());

    match cli.command {
        Command::Auth(AuthCommand::Login { .. }) => login(&settings, &reporter).await,
        Command::Auth(AuthCommand::Logout) => logout(&settings, &reporter),
        Command::Repo(RepoCommand::Scan {
            dir,
            rev,
            output_format,
            output_file,
            wait,
        }) => {
            let request = ScanRequest::diff(dir, rev, output_format, wait.should_wait());
            scan(&settings, request, output_file, &reporter).await
        }
        Command::Repo(RepoCommand::RiskCheck {
            dir,
            output_file,
            wait,
        }) => {
            let request = ScanRequest::full(dir, wait.should_wait());
            scan(&settings, request, output_file, &reporter).await
        }
        Command::Platform(PlatformCommand::Upload {
            files,
            document_type,
            tag,
            software_id,
            check_blocked_packages,
            wait,
        }) => {
            let request = UploadRequest {
                files,
                document_type,
                tag,
                software_id,
                check_blocked_packages,
                wait,
            };
            upload(&settings, request, &reporter).await
        }
    }
}

fn login_use_case<'a>(
    settings: &Settings,
    http: &reqwest::Client,
    reporter: Reporter<'a>,
) -> LoginUseCase<OAuthClient, LocalCallbackServer, CredentialFileStore, SystemBrowser, Reporter<'a>>
{
    let oauth = OAuthClient::new(
        http.clone(),
        &settings.auth_endpoint,
        &settings.client_id,
        settings.client_secret.as_deref(),
    );
    let port = settings.redirect_port.unwrap_or_else(draw_redirect_port);

    LoginUseCase::new(
        oauth,
        LocalCallbackServer::new(port),
        CredentialFileStore::new(settings.state_dir.clone()),
        SystemBrowser::new(),
        reporter,
    )
    .with_timeout(settings.login_timeout)
}

/// Stored token, or a fresh client-credentials login for CI sessions
async fn authenticate(
    settings: &Settings,
    http: &reqwest::Client,
    reporter: Reporter<'_>,
) -> Result<Token> {
    login_use_case(settings, http, reporter)
        .acquire_token(settings.is_non_interactive())
        .await
}

async fn resolve_workspace(
    settings: &Settings,
    client: &PlatformClient,
    reporter: Reporter<'_>,
) -> Result<WorkspaceSelection> {
    let use_case = ResolveWorkspaceUseCase::new(
        WorkspaceFileStore::new(settings.state_dir.clone()),
        client.clone(),
        ConsoleWorkspacePrompt::stdio(),
        reporter,
    );
    use_case
        .execute(&settings.scope(), settings.is_non_interactive())
        .await
}

async fn login(settings: &Settings, reporter: Reporter<'_>) -> Result<ExitCode> {
    let http = build_client()?;
    let use_case = login_use_case(settings, &http, reporter);

    let token = if settings.is_non_interactive() {
        let token = use_case.login_non_interactive().await?;
        reporter.report_completion("✅ Logged in with client credentials");
        token
    } else {
        use_case.login().await?
    };

    let client = PlatformClient::new(http, &settings.platform_url, &token.access_token);
    resolve_workspace(settings, &client, reporter).await?;
    Ok(ExitCode::Success)
}

fn logout(settings: &Settings, reporter: Reporter<'_>) -> Result<ExitCode> {
    LogoutUseCase::new(
        CredentialFileStore::new(settings.state_dir.clone()),
        WorkspaceFileStore::new(settings.state_dir.clone()),
    )
    .execute()?;
    reporter.report_completion("👋 Logged out");
    Ok(ExitCode::Success)
}

async fn scan(
    settings: &Settings,
    request: ScanRequest,
    output_file: Option<PathBuf>,
    shared_reporter: &Arc<StderrProgressReporter>,
) -> Result<ExitCode> {
    let reporter: Reporter<'_> = shared_reporter;

    // Reject a bad directory before any network traffic
    let dir = validate_repository(&request.dir)?;

    let http = build_client()?;
    let token = authenticate(settings, &http, reporter).await?;
    let client = PlatformClient::new(http.clone(), &settings.platform_url, &token.access_token);
    let workspace = resolve_workspace(settings, &client, reporter).await?;
    tracing::debug!(workspace = %workspace.id, tenant = %workspace.tenant, "scanning");

    let work_dir = tempfile::Builder::new()
        .prefix(WORK_DIR_NAME)
        .tempdir()?;
    // git and bzip2 block; keep them off the runtime so Ctrl-C is still seen
    let bundle = {
        let reporter = Arc::clone(shared_reporter);
        let rev = request.rev.clone();
        let scan_type = request.scan_type;
        let work_path = work_dir.path().to_path_buf();
        tokio::task::spawn_blocking(move || {
            BuildBundleUseCase::new(GitCli::new(), TarBz2Writer::new(), &*reporter).execute(
                &dir,
                rev.as_deref(),
                scan_type,
                &work_path,
            )
        })
        .await??
    };

    let poller = ResultPoller::new(client.clone(), reporter, settings.poll);
    let use_case = ScanRepositoryUseCase::new(
        client,
        HttpBlobStore::new(http),
        poller,
        reporter,
        &settings.console_url,
    );
    let outcome = use_case.execute(&bundle, request.wait).await?;
    drop(work_dir);

    if let Some(row) = outcome.result {
        eprintln!("{}", FormatterFactory::progress_message(request.output_format));
        let rendered = FormatterFactory::create(request.output_format).format(&row)?;
        PresenterFactory::create(output_file.into()).present(&rendered)?;
    }
    Ok(ExitCode::Success)
}

async fn upload(
    settings: &Settings,
    request: UploadRequest,
    reporter: Reporter<'_>,
) -> Result<ExitCode> {
    let http = build_client()?;
    let token = authenticate(settings, &http, reporter).await?;
    let client = PlatformClient::new(http.clone(), &settings.platform_url, &token.access_token);
    let workspace = resolve_workspace(settings, &client, reporter).await?;
    let client = client.with_tenant(&workspace.tenant);

    let uploaded = UploadDocumentsUseCase::new(client.clone(), HttpBlobStore::new(http), reporter)
        .execute(&workspace.tenant, &request)
        .await?;
    reporter.report_completion(&format!("✅ Uploaded {} document(s)", uploaded.len()));

    if !request.wait && !request.check_blocked_packages {
        return Ok(ExitCode::Success);
    }

    let table = SummaryTable::for_stderr();
    let mut exit_code = ExitCode::Success;

    let tracked: Vec<TrackedDocument> = uploaded
        .iter()
        .map(|doc| TrackedDocument {
            name: doc.name.clone(),
            doc_ref: doc.doc_ref.clone(),
        })
        .collect();
    let outcomes = IngestionPoller::new(client.clone(), reporter)
        .wait_all(&workspace.tenant, &tracked)
        .await?;
    eprint!("{}", table.ingestion(&outcomes));
    if outcomes.iter().any(|outcome| !outcome.succeeded()) {
        exit_code = ExitCode::ChecksFailed;
    }

    if request.check_blocked_packages {
        // Only documents that were ingested and name a subject can be looked up
        let mut checked = Vec::new();
        let mut skipped = Vec::new();
        for (doc, outcome) in uploaded.into_iter().zip(&outcomes) {
            match doc.subject {
                Some(subject) if outcome.succeeded() => checked.push(CheckedDocument {
                    name: doc.name,
                    subject,
                }),
                _ => skipped.push(doc.name),
            }
        }

        let report = BlockedPackageChecker::new(client, reporter)
            .execute(&checked)
            .await?;
        eprint!("{}", table.blocked(&report, &skipped));
        if report.blocked {
            exit_code = ExitCode::ChecksFailed;
        }
    }

    Ok(exit_code)
}
