use crate::campaign::{CallOutcome, CampaignEvent, CampaignReport, Step};
use crate::errors::CampaignError;
use crate::ui::icons::{CHECK, CROSS, PHONE, ROCKET, SCRIPT, UPLOAD, VOICE};
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal UI for a campaign run, rendered via `indicatif` progress bars.
///
/// Two bars are stacked vertically:
/// - Step bar: spinner naming the step in flight
/// - Call bar: how many customers have been dialled so far
///
/// Everything is drawn on stderr; stdout is left for the result.
pub struct CampaignUI {
    multi: MultiProgress,
    step_bar: ProgressBar,
    call_bar: ProgressBar,
    verbose: bool,
}

impl CampaignUI {
    pub fn new(verbose: bool) -> Self {
        let multi = MultiProgress::new();

        let step_style = ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {msg}")
            .expect("progress bar template is a valid static string");

        let step_bar = multi.add(ProgressBar::new_spinner());
        step_bar.set_style(step_style);
        step_bar.set_prefix(" Step");

        let call_style = ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is a valid static string")
            .progress_chars("█▓▒░");

        let call_bar = multi.add(ProgressBar::new(0));
        call_bar.set_style(call_style);
        call_bar.set_prefix("Calls");

        Self {
            multi,
            step_bar,
            call_bar,
            verbose,
        }
    }

    /// Print a line via `MultiProgress`, falling back to `eprintln!` if the rich UI fails.
    fn print_line(&self, msg: impl AsRef<str>) {
        if self.multi.println(msg.as_ref()).is_err() {
            eprintln!("{}", msg.as_ref());
        }
    }

    pub fn print_header(&self, caller: &str, customers_file: &str, voice: &str) {
        self.print_line(format!(
            "{}{} {}",
            ROCKET,
            style("Starting campaign").bold(),
            style(format!("(caller {}, voice {})", caller, voice)).dim()
        ));
        self.print_line(format!("    {} {}", style("customers:").dim(), customers_file));
    }

    fn step_icon(step: Step) -> console::Emoji<'static, 'static> {
        match step {
            Step::Upload => UPLOAD,
            Step::Script => SCRIPT,
            Step::Voice => VOICE,
            Step::Calls => PHONE,
        }
    }

    /// Apply one orchestrator event to the bars.
    pub fn handle(&self, event: &CampaignEvent) {
        match event {
            CampaignEvent::StepStarted { step } => {
                self.step_bar
                    .set_message(format!("{}{}", Self::step_icon(*step), step));
                self.step_bar.enable_steady_tick(Duration::from_millis(100));
            }
            CampaignEvent::StepCompleted { step } => {
                if self.verbose {
                    self.print_line(format!("    {}{}", CHECK, style(step).dim()));
                }
            }
            CampaignEvent::CustomersLoaded { count } => {
                self.call_bar.set_length(*count as u64);
                self.print_line(format!(
                    "    {} {}",
                    style("customers loaded:").dim(),
                    style(count).cyan()
                ));
            }
            CampaignEvent::CallStarted { customer, .. } => {
                self.call_bar.set_message(customer.clone());
            }
            CampaignEvent::CallFinished { outcome, .. } => {
                self.call_bar.inc(1);
                self.show_outcome(outcome);
            }
            CampaignEvent::Finished { placed, failed } => {
                self.step_bar.finish_and_clear();
                self.call_bar.finish_with_message(format!(
                    "{} placed, {} failed",
                    style(placed).green(),
                    style(failed).red()
                ));
            }
        }
    }

    fn show_outcome(&self, outcome: &CallOutcome) {
        if outcome.failed {
            self.print_line(format!(
                "    {}{} {}",
                CROSS,
                style(&outcome.customer).bold(),
                style(&outcome.status).red()
            ));
        } else if self.verbose {
            self.print_line(format!(
                "    {}{} {}",
                PHONE,
                style(&outcome.customer).bold(),
                style(&outcome.status).dim()
            ));
        }
    }

    pub fn finish_success(&self, report: &CampaignReport) {
        self.step_bar.finish_and_clear();
        self.print_line(format!(
            "{}{} {}",
            CHECK,
            style("Campaign finished").green().bold(),
            style(format!(
                "({} of {} calls placed)",
                report.placed_count(),
                report.outcomes.len()
            ))
            .dim()
        ));
    }

    pub fn finish_error(&self, error: &CampaignError) {
        self.step_bar.abandon();
        self.call_bar.abandon();
        self.print_line(format!(
            "{}{}",
            CROSS,
            style(format!("Campaign aborted at {} step", error.step()))
                .red()
                .bold()
        ));
    }
}
