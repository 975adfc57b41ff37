//! Progress reporting for round execution

use colored::Colorize;
use consilium_application::ports::progress::{RoundProgressNotifier, RoundStage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports round progress with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: RoundStage) -> &'static str {
        match stage {
            RoundStage::MemberFanOut => "Advisor opinions",
            RoundStage::LeadSynthesis => "Lead synthesis",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: RoundStage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("Starting...");

        *self.stage_bar.lock().unwrap() = Some(pb);
    }

    fn on_advisor_settled(&self, _stage: RoundStage, title: &str, success: bool) {
        if let Some(pb) = self.stage_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), title)
            } else {
                format!("{} {}", "x".red(), title)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: RoundStage) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.finish_with_message(format!(
                "{} complete",
                Self::stage_display_name(stage).green()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RoundProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: RoundStage, total_tasks: usize) {
        println!(
            "{} {} ({} calls)",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold(),
            total_tasks
        );
    }

    fn on_advisor_settled(&self, _stage: RoundStage, title: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), title);
        } else {
            println!("  {} {} (failed)", "x".red(), title);
        }
    }

    fn on_stage_complete(&self, _stage: RoundStage) {
        println!();
    }
}
