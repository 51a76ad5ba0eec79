//! CLI flag definitions, tracing setup, and the end-to-end run.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use url::Url;

use resumekit_core::llm::LlmClient;
use resumekit_core::profile::{ContactDetails, collect_user_profile};
use resumekit_core::{build_record, load_text, render};
use resumekit_shared::{
    AppConfig, AuthPlan, Credentials, FetchConfig, FormLogin, ResumeKitError, ResumeRecord,
    SourceDescriptor, UrlSource, load_config, load_config_from, resolve_api_key,
};

use crate::prompt::TerminalPrompter;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// resumekit: generate a Markdown resume from free-form text.
#[derive(Parser, Debug)]
#[command(
    name = "resumekit",
    version,
    about = "Generate a resume from user-provided text. By default an OpenAI-compatible model \
             writes it; --no-openai uses the built-in heuristic renderer.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Input file (.txt, .docx, .pdf). Reads standard input when no source is given.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output Markdown file [default: resume.md].
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fetch the text from a URL instead of a file.
    #[arg(long)]
    pub url: Option<String>,

    /// Username for HTTP Basic auth or the login form.
    #[arg(long)]
    pub auth_user: Option<String>,

    /// Password for HTTP Basic auth or the login form.
    #[arg(long, env = "RESUMEKIT_AUTH_PASS", hide_env_values = true)]
    pub auth_pass: Option<String>,

    /// Login form endpoint to POST credentials to before fetching --url.
    #[arg(long)]
    pub login_url: Option<String>,

    /// Form field carrying the username [default: username].
    #[arg(long)]
    pub login_user_field: Option<String>,

    /// Form field carrying the password [default: password].
    #[arg(long)]
    pub login_pass_field: Option<String>,

    /// Extra login form field as key=value (repeatable).
    #[arg(long = "login-extra", value_name = "KEY=VALUE")]
    pub login_extra: Vec<String>,

    /// Render with the LLM. This is already the default; accepted for
    /// compatibility with older invocations.
    #[arg(long, conflicts_with = "no_openai")]
    pub use_openai: bool,

    /// Use the built-in template renderer instead of the LLM.
    #[arg(long)]
    pub no_openai: bool,

    /// Model for LLM rendering.
    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Template for --no-openai rendering (placeholders: name, summary, skills, experiences).
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Also write the segmented resume record as JSON.
    #[arg(long)]
    pub emit_record: Option<PathBuf>,

    /// First name (prompted for when missing in LLM mode).
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name (prompted for when missing in LLM mode).
    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Config file [default: ~/.resumekit/resumekit.toml].
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "resumekit=info",
        1 => "resumekit=debug",
        _ => "resumekit=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Acquire, segment, render, and write the resume.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    // Fail before any network or prompting work when the key is missing.
    let api_key = if cli.no_openai {
        None
    } else {
        Some(resolve_api_key(&config)?)
    };

    let descriptor = build_source(&cli, &config)?;
    info!(source = %descriptor.id(), "reading input");

    let spinner = spinner("Reading input");
    let text = load_text(&descriptor, &FetchConfig::from(&config)).await;
    spinner.finish_and_clear();
    let text = text?;

    let record = build_record(&text, full_name(&cli));
    if let Some(path) = &cli.emit_record {
        write_record(path, &record)?;
    }

    let output_text = match api_key {
        None => render_with_template(&cli, &config, &record)?,
        Some(api_key) => render_with_llm(&cli, &config, api_key, text).await?,
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.path));
    std::fs::write(&output, output_text).map_err(|e| ResumeKitError::io(&output, e))?;

    println!("Resume written to {}", output.display());
    Ok(())
}

fn render_with_template(cli: &Cli, config: &AppConfig, record: &ResumeRecord) -> Result<String> {
    let template = cli
        .template
        .clone()
        .or_else(|| config.output.template.as_ref().map(PathBuf::from));

    let rendered = match template {
        Some(path) => render::render_template_file(&path, record)?,
        None => render::render_markdown(record),
    };
    Ok(rendered)
}

async fn render_with_llm(
    cli: &Cli,
    config: &AppConfig,
    api_key: String,
    raw_text: String,
) -> Result<String> {
    let known = ContactDetails {
        first_name: cli.first_name.clone(),
        last_name: cli.last_name.clone(),
        phone: cli.phone.clone(),
        email: cli.email.clone(),
    };

    let profile = tokio::task::spawn_blocking(move || {
        let mut prompter = TerminalPrompter::stdio();
        collect_user_profile(&mut prompter, known)
    })
    .await
    .wrap_err("profile prompt task failed")??;

    let mut client = LlmClient::new(&config.openai, api_key)?;
    if let Some(model) = &cli.model {
        client = client.with_model(model);
    }

    let spinner = spinner(&format!("Generating resume with {}", client.model()));
    let generated = client.generate_resume(&profile, &raw_text).await;
    spinner.finish_and_clear();
    Ok(generated?)
}

fn write_record(path: &Path, record: &ResumeRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json).map_err(|e| ResumeKitError::io(path, e))?;
    info!(path = %path.display(), "resume record written");
    Ok(())
}

// ---------------------------------------------------------------------------
// Flag interpretation
// ---------------------------------------------------------------------------

/// Build the source descriptor: --input, then --url, then standard input.
fn build_source(cli: &Cli, config: &AppConfig) -> Result<SourceDescriptor> {
    if cli.input.is_some() && cli.url.is_some() {
        warn!("both --input and --url given, using --input");
    }

    let url_source = match &cli.url {
        Some(raw) if cli.input.is_none() => {
            let url = Url::parse(raw).map_err(|e| eyre!("invalid --url '{raw}': {e}"))?;
            Some(UrlSource::new(url).with_auth(auth_plan(cli, config)?))
        }
        _ => None,
    };

    Ok(SourceDescriptor::select(cli.input.clone(), url_source))
}

fn auth_plan(cli: &Cli, config: &AppConfig) -> Result<AuthPlan> {
    let credentials = Credentials::from_parts(cli.auth_user.clone(), cli.auth_pass.clone());

    let login = match &cli.login_url {
        Some(raw) => {
            let url = Url::parse(raw).map_err(|e| eyre!("invalid --login-url '{raw}': {e}"))?;
            let mut form = FormLogin::new(url);
            form.user_field = cli
                .login_user_field
                .clone()
                .unwrap_or_else(|| config.login.user_field.clone());
            form.pass_field = cli
                .login_pass_field
                .clone()
                .unwrap_or_else(|| config.login.pass_field.clone());
            form.extra = parse_login_extra(&cli.login_extra)?;
            Some(form)
        }
        None => None,
    };

    Ok(AuthPlan::resolve(credentials, login))
}

/// Parse repeated `key=value` entries, splitting at the first `=`.
fn parse_login_extra(entries: &[String]) -> resumekit_shared::Result<Vec<(String, String)>> {
    entries
        .iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(ResumeKitError::config(format!(
                "invalid --login-extra '{entry}': expected key=value"
            ))),
        })
        .collect()
}

/// Display name from --first-name and --last-name.
fn full_name(cli: &Cli) -> Option<String> {
    let joined = format!(
        "{} {}",
        cli.first_name.as_deref().unwrap_or_default(),
        cli.last_name.as_deref().unwrap_or_default()
    );
    Some(joined.trim().to_string()).filter(|n| !n.is_empty())
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("resumekit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn login_extra_splits_at_first_equals() {
        let parsed = parse_login_extra(&["csrf=a=b".into(), "remember=".into()]).unwrap();
        assert_eq!(
            parsed,
            vec![
                ("csrf".to_string(), "a=b".to_string()),
                ("remember".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn login_extra_without_equals_is_rejected() {
        let err = parse_login_extra(&["csrf".into()]).unwrap_err();
        assert!(matches!(err, ResumeKitError::Config { .. }));
        assert!(err.to_string().contains("csrf"));

        assert!(parse_login_extra(&["=value".into()]).is_err());
    }

    #[test]
    fn full_name_joins_present_parts() {
        assert_eq!(
            full_name(&parse(&["--first-name", "Ada", "--last-name", "Lovelace"])).as_deref(),
            Some("Ada Lovelace")
        );
        assert_eq!(full_name(&parse(&["--last-name", "Hopper"])).as_deref(), Some("Hopper"));
        assert_eq!(full_name(&parse(&[])), None);
    }

    #[test]
    fn use_openai_keeps_llm_rendering() {
        let cli = parse(&["--use-openai"]);
        assert!(cli.use_openai);
        assert!(!cli.no_openai);
    }

    #[test]
    fn use_openai_conflicts_with_no_openai() {
        let err = Cli::try_parse_from(["resumekit", "--use-openai", "--no-openai"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn input_wins_over_url() {
        let cli = parse(&["--input", "cv.txt", "--url", "https://example.com/cv"]);
        let source = build_source(&cli, &AppConfig::default()).unwrap();
        assert_eq!(source, SourceDescriptor::File(PathBuf::from("cv.txt")));
    }

    #[test]
    fn no_source_means_stdin() {
        let source = build_source(&parse(&["--no-openai"]), &AppConfig::default()).unwrap();
        assert_eq!(source, SourceDescriptor::Stdin);
    }

    #[test]
    fn login_flags_build_form_login_plan() {
        let cli = parse(&[
            "--url",
            "https://example.com/cv",
            "--auth-user",
            "alice",
            "--auth-pass",
            "s3cret",
            "--login-url",
            "https://example.com/login",
            "--login-user-field",
            "email",
            "--login-extra",
            "csrf=tok",
        ]);

        let SourceDescriptor::Url(source) = build_source(&cli, &AppConfig::default()).unwrap()
        else {
            panic!("expected a URL source");
        };
        let AuthPlan::FormLogin { login, credentials } = source.auth else {
            panic!("expected a form login plan");
        };
        assert_eq!(login.url.as_str(), "https://example.com/login");
        assert_eq!(login.user_field, "email");
        assert_eq!(login.pass_field, "password");
        assert_eq!(login.extra, vec![("csrf".to_string(), "tok".to_string())]);
        assert_eq!(credentials.username, "alice");
    }

    #[test]
    fn credentials_without_login_url_use_basic_auth() {
        let cli = parse(&[
            "--url",
            "https://example.com/cv",
            "--auth-user",
            "alice",
            "--auth-pass",
            "s3cret",
        ]);
        let SourceDescriptor::Url(source) = build_source(&cli, &AppConfig::default()).unwrap()
        else {
            panic!("expected a URL source");
        };
        assert_eq!(source.auth.kind(), "basic");
    }

    #[test]
    fn invalid_url_is_reported() {
        let err = build_source(&parse(&["--url", "not a url"]), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("invalid --url"));
    }
}
