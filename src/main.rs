use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use ferrule_aws::{Credentials, EcsClient};
use ferrule_host::{RunPolicy, StaticParameterSource};
use ferrule_node::validate_values;
use ferrule_node_ecs::{EcsNode, ExecutionData, description};

/// Ferrule - run workflow nodes from the command line
#[derive(Parser)]
#[command(name = "ferrule")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the ECS node over a batch of input records
  Run {
    /// Path to the input records (a JSON array of payloads)
    records_file: PathBuf,

    /// Path to the node configuration (a JSON object of field values)
    #[arg(long)]
    config: PathBuf,

    /// Path to the credential bundle; falls back to AWS_* environment
    /// variables when omitted
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Append failed records as diagnostics instead of aborting the run
    #[arg(long)]
    continue_on_fail: bool,
  },

  /// Print the node's property schema as JSON
  Describe,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Run {
      records_file,
      config,
      credentials,
      continue_on_fail,
    } => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(async { run_node(records_file, config, credentials, continue_on_fail).await })?;
    }
    Commands::Describe => {
      println!("{}", serde_json::to_string_pretty(&description())?);
    }
  }

  Ok(())
}

async fn run_node(
  records_file: PathBuf,
  config_file: PathBuf,
  credentials_file: Option<PathBuf>,
  continue_on_fail: bool,
) -> Result<()> {
  // Load input records
  let records_content = tokio::fs::read_to_string(&records_file)
    .await
    .with_context(|| format!("failed to read records file: {}", records_file.display()))?;
  let payloads: Vec<serde_json::Value> = serde_json::from_str(&records_content)
    .with_context(|| format!("failed to parse records file: {}", records_file.display()))?;
  let items: Vec<ExecutionData> = payloads.into_iter().map(ExecutionData::new).collect();

  // Load and validate node configuration against the schema before any
  // record is dispatched.
  let config_content = tokio::fs::read_to_string(&config_file)
    .await
    .with_context(|| format!("failed to read config file: {}", config_file.display()))?;
  let config: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&config_content)
    .with_context(|| format!("failed to parse config file: {}", config_file.display()))?;
  validate_values(&description().properties, &config).context("invalid node configuration")?;

  // Credentials are read once for the whole run.
  let credentials = load_credentials(credentials_file).await?;

  let source = StaticParameterSource::new(config);
  let policy = RunPolicy { continue_on_fail };
  let node = EcsNode::new(EcsClient::new(credentials));

  let output = node.execute(items, &source, policy).await?;
  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

async fn load_credentials(path: Option<PathBuf>) -> Result<Credentials> {
  if let Some(path) = path {
    let content = tokio::fs::read_to_string(&path)
      .await
      .with_context(|| format!("failed to read credentials file: {}", path.display()))?;
    let credentials: Credentials = serde_json::from_str(&content)
      .with_context(|| format!("failed to parse credentials file: {}", path.display()))?;
    return Ok(credentials.trimmed());
  }

  let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default();
  let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default();
  let region = std::env::var("AWS_REGION").unwrap_or_default();
  if access_key_id.is_empty() || secret_access_key.is_empty() || region.is_empty() {
    bail!(
      "no credentials file given and AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY/AWS_REGION are not all set"
    );
  }

  let credentials = Credentials::new(&access_key_id, &secret_access_key, &region);
  Ok(match std::env::var("AWS_SESSION_TOKEN") {
    Ok(token) if !token.is_empty() => credentials.with_session_token(&token),
    _ => credentials,
  })
}
