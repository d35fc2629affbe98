use clap::Parser;
use manifest_search::{cli, config, error, interactive, render, transport};
use cli::{Cli, Commands};
use config::Config;
use error::{ManifestSearchError, Result};
use manifest_search_common::{run_cycle, DrawerState, Flow, SearchState};
use render::SpinnerSession;
use tracing_subscriber::EnvFilter;
use transport::HttpTransport;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Search { query, flow, limit, json, icons } => {
            let flow = flow.unwrap_or(config.default_flow);
            tracing::debug!(%flow, %query, "search command");
            let mut search = config.search.clone();
            if let Some(limit) = limit {
                search.result_limit = limit;
                search.validate()?;
            }

            let transport = HttpTransport::new(&search)?;
            let session = SpinnerSession::new();
            run_cycle(&transport, &session, flow, &search, &query).await;

            match session.state() {
                SearchState::Results(set) if json => {
                    println!("{}", serde_json::to_string_pretty(&set)?);
                }
                SearchState::Error { title, detail } => {
                    return Err(ManifestSearchError::Search { title, detail });
                }
                state => println!("{}", render::format_state(&state, &search, icons)),
            }
        }

        Commands::Show { hash, flow, definition_type } => {
            let flow = flow.unwrap_or(config.default_flow);
            tracing::debug!(%flow, %hash, "show command");
            let transport = HttpTransport::new(&config.search)?;
            let session = SpinnerSession::new();
            run_cycle(&transport, &session, flow, &config.search, &hash).await;

            let set = match session.state() {
                SearchState::Results(set) => set,
                SearchState::Error { title, detail } => {
                    return Err(ManifestSearchError::Search { title, detail });
                }
                _ => return Err(ManifestSearchError::NotFound(hash)),
            };

            let item = set
                .flatten()
                .into_iter()
                .filter(|item| item.hash == hash)
                .find(|item| {
                    definition_type
                        .as_deref()
                        .map_or(true, |t| item.definition_type == t)
                })
                .ok_or_else(|| ManifestSearchError::NotFound(hash.clone()))?;

            let mut drawer = DrawerState::default();
            drawer.open(item.payload);
            println!("{}", render::format_drawer(&drawer));
        }

        Commands::Interactive { flow } => {
            let flow = flow.unwrap_or(config.default_flow);
            tracing::debug!(%flow, "interactive session");
            let transport = HttpTransport::new(&config.search)?;
            interactive::run_interactive(&transport, flow, &config.search).await?;
        }

        Commands::Config { set_base_url, set_timeout_ms, set_default_flow, show } => {
            let changed = set_base_url.is_some() || set_timeout_ms.is_some() || set_default_flow.is_some();
            let mut config = config;

            if changed {
                let path = Config::config_path()?;
                config = Config::update_file(&path, |file| {
                    if let Some(base_url) = set_base_url {
                        file.set_base_url(base_url)?;
                    }
                    if let Some(timeout_ms) = set_timeout_ms {
                        file.set_timeout_ms(timeout_ms)?;
                    }
                    if let Some(flow) = set_default_flow {
                        file.default_flow = flow;
                    }
                    Ok(())
                })?;
                println!("✔ 設定を保存しました: {}", path.display());
                // 表示は実際に使われる値（環境変数の上書き込み）
                config.apply_env_overrides(|key| std::env::var(key).ok())?;
            }

            if show || !changed {
                println!("設定:");
                println!("  ベースURL: {}", config.search.base_url);
                println!("  最大件数: {}", config.search.result_limit);
                println!("  タイムアウト: {}ms", config.search.timeout_ms);
                println!("  デバウンス: {}ms", config.search.debounce_ms);
                println!("  デフォルトフロー: {}", config.default_flow);
                for flow in [Flow::Destiny1, Flow::Destiny2] {
                    println!("  {} 最小文字数: {}", flow, flow.policy().min_query_length);
                }
            }
        }
    }

    Ok(())
}
