//! Campaign execution (`dialer run`).

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::super::{Cli, RunArgs};
use super::form::{form_from_args, prompt_missing};

pub async fn cmd_run(project_dir: &Path, cli: &Cli, args: &RunArgs) -> Result<()> {
    use dialer::HttpBackend;
    use dialer::campaign::CampaignOrchestrator;
    use dialer::dialer_config::{CliOverrides, DialerConfig};
    use dialer::ui::CampaignUI;

    let config = DialerConfig::resolve(
        project_dir,
        &CliOverrides {
            backend_url: args.backend_url.clone(),
            max_parallel_calls: args.max_parallel_calls,
        },
    )?;

    let mut form = form_from_args(args)?;
    if args.interactive {
        prompt_missing(&mut form, args.voice.is_none())?;
    }
    let input = form.snapshot();

    let backend = HttpBackend::new(&config.backend_url, config.request_timeout())
        .context("Failed to create backend client")?;
    tracing::debug!(
        backend = %backend.base_url(),
        max_parallel_calls = config.max_parallel_calls,
        "backend configured"
    );

    let ui = if args.json {
        None
    } else {
        let ui = Arc::new(CampaignUI::new(cli.verbose));
        let file_label = input
            .customer_file
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string());
        ui.print_header(&input.caller_number, &file_label, input.voice.id());
        Some(ui)
    };

    let mut orchestrator = CampaignOrchestrator::new(backend, config.orchestrator_config());
    let mut ui_task = None;
    if let Some(ui) = &ui {
        let (tx, mut rx) = mpsc::unbounded_channel();
        orchestrator = orchestrator.with_events(tx);
        let ui = Arc::clone(ui);
        ui_task = Some(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                ui.handle(&event);
            }
        }));
    }

    let result = orchestrator.run(&input).await;
    drop(orchestrator);
    if let Some(task) = ui_task {
        task.await.context("Progress display task failed")?;
    }

    match result {
        Ok(report) => {
            form.record_report(&report);
            if let Some(ui) = &ui {
                ui.finish_success(&report);
            }
            if let Some(text) = form.last_result() {
                println!("{}", text);
            }
            Ok(())
        }
        Err(err) => {
            form.record_error(&err);
            if let Some(ui) = &ui {
                ui.finish_error(&err);
            }
            Err(err.into())
        }
    }
}
