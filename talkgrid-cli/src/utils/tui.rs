use indicatif::{ProgressBar, ProgressStyle};
use talkgrid_core::planner::{Confirm, Prompt};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Terminal confirmations through dialoguer. `--yes` skips the question.
pub struct Ask {
    assume_yes: bool,
}

impl Ask {
    pub fn new(assume_yes: bool) -> Self {
        Ask { assume_yes }
    }
}

impl Confirm for Ask {
    fn confirm(&mut self, prompt: &Prompt<'_>) -> bool {
        if self.assume_yes {
            return true;
        }

        match dialoguer::Confirm::new()
            .with_prompt(prompt.to_string())
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                // No terminal to ask on
                tracing::debug!(error = %e, "confirmation unavailable, treating as no");
                false
            }
        }
    }
}
