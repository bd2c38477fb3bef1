//! Command-line client for the SnipStash API.

use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use serde::Serialize;
use snipstash_client::{SnippetApi, SnippetSync};
use snipstash_core::constants::DEFAULT_CLI_SERVER_URL;
use snipstash_core::models::snippet::{CreateSnippetRequest, Snippet, UpdateSnippetRequest};
use snipstash_core::models::wire::HealthResponse;
use snipstash_core::SnippetFilter;
use std::io::{self, Read};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "snip", about = "SnipStash CLI", version)]
struct Cli {
    /// Server URL (can also be set via SNIP_SERVER env var)
    #[arg(short, long, global = true, env = "SNIP_SERVER", default_value = DEFAULT_CLI_SERVER_URL)]
    server: String,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for API requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// List snippets, newest first
    List {
        /// Match title or code (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Match language (case-insensitive, partial)
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Print one snippet's code
    Get { id: String },
    /// Create a snippet; code is read from --file or stdin
    New {
        #[arg(long)]
        title: String,
        #[arg(short, long)]
        language: String,
        #[arg(short, long)]
        file: Option<String>,
    },
    /// Change a snippet's title, language or code
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        language: Option<String>,
        /// Replace the code with this file's contents
        #[arg(short, long)]
        file: Option<String>,
    },
    Delete { id: String },
    /// Check that the server is up
    Health,
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn normalize_server(server: &str) -> String {
    let trimmed = server.trim();
    if let Ok(mut url) = reqwest::Url::parse(trimmed) {
        let should_normalize_localhost =
            url.scheme().eq_ignore_ascii_case("http") && url.host_str() == Some("localhost");
        if should_normalize_localhost && url.set_host(Some("127.0.0.1")).is_err() {
            return trimmed.to_string();
        }
        let mut normalized = url.to_string();
        while normalized.ends_with('/') {
            normalized.pop();
        }
        return normalized;
    }
    trimmed.to_string()
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("response encoding error")
}

fn format_list_output(snippets: &[&Snippet], json: bool) -> anyhow::Result<String> {
    if json {
        return to_json(&snippets);
    }
    let rows: Vec<String> = snippets
        .iter()
        .map(|s| format!("{:<36} {:<12} {}", s.id, s.language, s.title))
        .collect();
    Ok(rows.join("\n"))
}

fn format_get_output(snippet: &Snippet, json: bool) -> anyhow::Result<String> {
    if json {
        return to_json(snippet);
    }
    Ok(snippet.code.clone())
}

fn format_health_output(health: &HealthResponse, json: bool) -> anyhow::Result<String> {
    if json {
        return to_json(health);
    }
    Ok(format!(
        "{} ({}, up {:.1}s)",
        health.status, health.environment, health.uptime
    ))
}

fn read_code(file: Option<&str>) -> anyhow::Result<String> {
    match file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read code from stdin")?;
            Ok(buffer)
        }
    }
}

fn build_update(
    title: Option<String>,
    language: Option<String>,
    file: Option<&str>,
) -> anyhow::Result<UpdateSnippetRequest> {
    let code = file.map(|path| read_code(Some(path))).transpose()?;
    let request = UpdateSnippetRequest {
        title,
        language,
        code,
    };
    if request.is_empty() {
        bail!("nothing to update: pass --title, --language or --file");
    }
    Ok(request)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SNIP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        server,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    if let Commands::Completions { shell } = &command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    init_tracing();
    let api = SnippetApi::new(&normalize_server(&server), Duration::from_secs(timeout))?;
    let mut sync = SnippetSync::new(api);
    let started = Instant::now();

    match command {
        Commands::Completions { .. } => unreachable!("completions handled before client setup"),
        Commands::List { search, language } => {
            let filter = SnippetFilter::new(search.as_deref(), language.as_deref());
            sync.refresh(&filter).await.context("List failed")?;
            log_timing(timing, "list", started.elapsed());
            let visible = sync.state().visible();
            let output = format_list_output(&visible, json)?;
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::Get { id } => {
            let snippet = sync.api().get(&id).await.context("Get failed")?;
            log_timing(timing, "get", started.elapsed());
            println!("{}", format_get_output(&snippet, json)?);
        }
        Commands::New {
            title,
            language,
            file,
        } => {
            let code = read_code(file.as_deref())?;
            let request = CreateSnippetRequest {
                title: Some(title),
                language: Some(language),
                code: Some(code),
            };
            let snippet = sync.create(&request).await.context("New failed")?;
            log_timing(timing, "new", started.elapsed());
            if json {
                println!("{}", to_json(&snippet)?);
            } else {
                println!("Created: {} ({})", snippet.title, snippet.id);
            }
        }
        Commands::Edit {
            id,
            title,
            language,
            file,
        } => {
            let request = build_update(title, language, file.as_deref())?;
            let snippet = sync.update(&id, &request).await.context("Edit failed")?;
            log_timing(timing, "edit", started.elapsed());
            if json {
                println!("{}", to_json(&snippet)?);
            } else {
                println!("Updated: {} ({})", snippet.title, snippet.id);
            }
        }
        Commands::Delete { id } => {
            let message = sync.delete(&id).await.context("Delete failed")?;
            log_timing(timing, "delete", started.elapsed());
            if json {
                println!("{}", to_json(&serde_json::json!({ "message": message }))?);
            } else {
                println!("Deleted snippet: {}", id);
            }
        }
        Commands::Health => {
            let health = sync.api().health().await.context("Health check failed")?;
            log_timing(timing, "health", started.elapsed());
            println!("{}", format_health_output(&health, json)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        build_update, format_get_output, format_health_output, format_list_output,
        normalize_server, Cli, Commands,
    };
    use clap::Parser;
    use snipstash_core::constants::DEFAULT_CLI_SERVER_URL;
    use snipstash_core::models::snippet::Snippet;
    use snipstash_core::DEFAULT_PORT;

    fn sample_snippet() -> Snippet {
        serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "title": "demo",
            "language": "rust",
            "code": "fn main() {}",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .expect("snippet")
    }

    #[test]
    fn normalize_server_matrix() {
        let cases = [
            (
                DEFAULT_CLI_SERVER_URL.to_string(),
                format!("http://127.0.0.1:{}", DEFAULT_PORT),
            ),
            (
                format!("https://localhost:{}", DEFAULT_PORT),
                format!("https://localhost:{}", DEFAULT_PORT),
            ),
            (
                format!(" http://127.0.0.1:{}/ ", DEFAULT_PORT),
                format!("http://127.0.0.1:{}", DEFAULT_PORT),
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_server(&input), expected);
        }
    }

    #[test]
    fn default_cli_server_url_uses_default_port_constant() {
        assert_eq!(
            DEFAULT_CLI_SERVER_URL,
            format!("http://localhost:{}", DEFAULT_PORT)
        );
    }

    #[test]
    fn text_output_shows_rows_and_code() {
        let snippet = sample_snippet();
        let list = format_list_output(&[&snippet], false).expect("list");
        assert!(list.starts_with("abc123"));
        assert!(list.contains("rust"));
        assert!(list.ends_with("demo"));

        let get = format_get_output(&snippet, false).expect("get");
        assert_eq!(get, "fn main() {}");
    }

    #[test]
    fn json_output_helpers_preserve_payload_shape() {
        let snippet = sample_snippet();
        let list = format_list_output(&[&snippet], true).expect("list json");
        let parsed: serde_json::Value = serde_json::from_str(&list).expect("valid json");
        assert_eq!(parsed[0]["id"], "abc123");
        assert_eq!(parsed[0]["createdAt"], "2024-01-01T00:00:00Z");

        let get = format_get_output(&snippet, true).expect("get json");
        let parsed: serde_json::Value = serde_json::from_str(&get).expect("valid json");
        assert_eq!(parsed["code"], "fn main() {}");
    }

    #[test]
    fn health_text_output_includes_environment() {
        let health = serde_json::from_value(serde_json::json!({
            "status": "ok",
            "timestamp": "2024-01-01T00:00:00Z",
            "uptime": 12.34,
            "environment": "production"
        }))
        .expect("health");
        let rendered = format_health_output(&health, false).expect("health output");
        assert_eq!(rendered, "ok (production, up 12.3s)");
    }

    #[test]
    fn edit_requires_at_least_one_change() {
        assert!(build_update(None, None, None).is_err());
        let update = build_update(Some("new".to_string()), None, None).expect("update");
        assert_eq!(update.title.as_deref(), Some("new"));
        assert!(update.code.is_none());
    }

    #[test]
    fn cli_parses_list_filters() {
        let cli = Cli::try_parse_from(["snip", "list", "--search", "foo", "-l", "rust"])
            .expect("cli should parse list");
        match cli.command {
            Commands::List { search, language } => {
                assert_eq!(search.as_deref(), Some("foo"));
                assert_eq!(language.as_deref(), Some("rust"));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn cli_parses_new_with_file() {
        let cli = Cli::try_parse_from([
            "snip", "new", "--title", "Hi", "-l", "python", "-f", "hi.py", "--json",
        ])
        .expect("cli should parse new");
        assert!(cli.json);
        match cli.command {
            Commands::New {
                title,
                language,
                file,
            } => {
                assert_eq!(title, "Hi");
                assert_eq!(language, "python");
                assert_eq!(file.as_deref(), Some("hi.py"));
            }
            _ => panic!("expected new command"),
        }
    }
}
