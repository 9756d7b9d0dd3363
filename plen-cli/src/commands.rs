use crate::{
    cli::OutputFormat,
    config::AppConfig,
    error::{CliError, Result},
    output::{OutputManager, write_output},
};
use indicatif::{ProgressBar, ProgressStyle};
use playlist_length::{
    engine::{EventSender, PlaylistCalculator, RunEvent},
    extractor::{ProxyConfig, YouTubeSource, YouTubeSourceConfig, create_client},
};
use std::{path::Path, sync::Arc, time::Duration};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

pub struct CommandExecutor {
    config: AppConfig,
    proxy: Option<ProxyConfig>,
    timeout: Duration,
    concurrency: Option<usize>,
    show_progress: bool,
}

impl CommandExecutor {
    pub fn new(config: AppConfig) -> Self {
        let proxy = config.proxy_config(None, None, None);
        let timeout = Duration::from_secs(config.default_timeout);
        Self {
            config,
            proxy,
            timeout,
            concurrency: None,
            show_progress: true,
        }
    }

    pub fn new_with_proxy(
        config: AppConfig,
        proxy_url: Option<String>,
        proxy_username: Option<String>,
        proxy_password: Option<String>,
    ) -> Self {
        let proxy = config.proxy_config(proxy_url, proxy_username, proxy_password);
        Self {
            proxy,
            ..Self::new(config)
        }
    }

    pub fn with_timeout(mut self, timeout: Option<u64>) -> Self {
        if let Some(seconds) = timeout {
            self.timeout = Duration::from_secs(seconds);
        }
        self
    }

    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Output format requested on the command line, or the configured default.
    pub fn output_format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.config.default_output_format)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn calculate(
        &self,
        url: Option<String>,
        start: usize,
        end: usize,
        api_key: Option<String>,
        output_file: Option<&Path>,
        output_format: OutputFormat,
    ) -> Result<()> {
        let link = match url {
            Some(url) => url,
            None => self.prompt_for_link()?,
        };

        let api_key = api_key
            .or_else(|| self.config.api_key.clone())
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingApiKey)?;

        let client = create_client(self.proxy.clone(), self.timeout)?;
        let mut source_config = YouTubeSourceConfig::new(api_key);
        if let Some(user_agent) = &self.config.user_agent {
            source_config = source_config.with_user_agent(user_agent);
        }
        let source = YouTubeSource::new(source_config, client);
        let calculator = PlaylistCalculator::new(Arc::new(source))
            .with_config(self.config.calculator_config(self.concurrency));
        debug!(config = ?calculator.config(), "Calculator ready");

        let output_manager = OutputManager::new(self.config.colored_output);
        let pb = if self.show_progress {
            self.create_progress_bar("Fetching playlist...")
        } else {
            ProgressBar::hidden()
        };

        let (events, rx) = EventSender::channel();
        let renderer = tokio::spawn(render_events(
            rx,
            pb.clone(),
            OutputManager::new(self.config.colored_output),
        ));

        let result = calculator.submit(&link, start, end, &events).await;
        drop(events);
        if let Err(e) = renderer.await {
            debug!(error = %e, "Progress renderer stopped unexpectedly");
        }
        pb.finish_and_clear();

        let report = result?;
        let output = output_manager.format_report(&report, &output_format)?;
        write_output(&output, output_file)?;
        Ok(())
    }

    #[cfg(feature = "interactive")]
    fn prompt_for_link(&self) -> Result<String> {
        use inquire::{InquireError, Text};

        Text::new("Playlist link:")
            .with_help_message("e.g. https://www.youtube.com/playlist?list=...")
            .prompt()
            .map_err(|e| match e {
                InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                    CliError::user_cancelled()
                }
                other => CliError::invalid_input(other.to_string()),
            })
    }

    #[cfg(not(feature = "interactive"))]
    fn prompt_for_link(&self) -> Result<String> {
        Err(CliError::invalid_input("--url is required"))
    }

    fn create_progress_bar(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
        }
        pb.set_message(message.to_string());
        pb
    }
}

/// Drives the progress bar from run events until the sender side is dropped.
async fn render_events(
    mut rx: UnboundedReceiver<RunEvent>,
    pb: ProgressBar,
    output_manager: OutputManager,
) {
    let mut counting = false;
    while let Some(event) = rx.recv().await {
        match event {
            RunEvent::Progress(update) => {
                if !counting {
                    counting = true;
                    pb.disable_steady_tick();
                    if let Ok(style) = ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    {
                        pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
                    }
                    pb.set_message("Summing durations...");
                }
                pb.set_length(update.total as u64);
                if update.fraction == 0.0 && update.processed == update.total {
                    pb.finish_and_clear();
                } else {
                    pb.set_position(update.processed as u64);
                }
            }
            RunEvent::Warning(warning) => {
                let line = output_manager.format_warning(&warning.to_string());
                pb.suspend(|| eprintln!("{line}"));
            }
            RunEvent::Finished { total_seconds } => {
                debug!(total_seconds, "Run finished");
            }
        }
    }
}
