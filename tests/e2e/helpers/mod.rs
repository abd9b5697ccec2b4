use anyhow::Result;
use freshrss_to_karakeep::cli::Args;
use freshrss_to_karakeep::infrastructure::config::{
    Config, FreshRssConfig, KarakeepConfig, LogFormat,
};
use structopt::StructOpt;
use tokio::net::TcpListener;

pub mod fake_server;

pub use fake_server::{FakeServer, FakeServerOptions, RecordedCall};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const KARAKEEP_KEY: &str = "karakeep-test-key";

pub struct TestContext {
    pub server: FakeServer,
    pub config: Config,
    _log_dir: tempfile::TempDir,
}

impl TestContext {
    pub async fn new(items: &[(&str, &str, &str)]) -> Result<Self> {
        Self::with_options(items, FakeServerOptions::default()).await
    }

    pub async fn with_options(
        items: &[(&str, &str, &str)],
        options: FakeServerOptions,
    ) -> Result<Self> {
        let server = FakeServer::new(items, options);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{}", addr);

        let app = server.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let log_dir = tempfile::tempdir()?;
        let config = Config {
            freshrss: FreshRssConfig {
                host: base_url.clone(),
                username: USERNAME.to_string(),
                password: PASSWORD.to_string(),
            },
            karakeep: KarakeepConfig {
                endpoint: format!("{}/api/v1", base_url),
                api_key: KARAKEEP_KEY.to_string(),
                verify_ssl: true,
            },
            log_file: log_dir.path().join("log.txt"),
            log_format: LogFormat::Pretty,
        };

        Ok(Self {
            server,
            config,
            _log_dir: log_dir,
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.server.calls()
    }

    /// Calls other than the Fever connection check and item listing
    pub fn mutating_calls(&self) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.is_mutating())
            .collect()
    }
}

pub fn args(flags: &[&str]) -> Args {
    let argv = std::iter::once("freshrss-to-karakeep").chain(flags.iter().copied());
    Args::from_iter_safe(argv).expect("valid test arguments")
}

pub fn two_items() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("1001", "http://a.com/x", "A"),
        ("1002", "http://b.com/y", "B"),
    ]
}
