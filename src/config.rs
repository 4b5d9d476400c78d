use clap::Parser;
use std::time::Duration;

use crate::rate_limit::RateLimitRule;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "fursbliss")]
#[command(about = "Dog health policy service: quiz scoring, dose reminders, subscription checks")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Quiz submissions allowed per client per window
    #[arg(long, default_value_t = 10)]
    pub quiz_rate_limit: u32,

    // Quiz rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub quiz_rate_window: u64,
}

impl Args {
    pub fn quiz_rule(&self) -> RateLimitRule {
        RateLimitRule::new(self.quiz_rate_limit, Duration::from_secs(self.quiz_rate_window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["fursbliss"]);
        assert_eq!(args.port, 8080);
        assert_eq!(args.quiz_rule(), RateLimitRule::per_minute(10));
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "fursbliss",
            "-p",
            "3000",
            "--quiz-rate-limit",
            "3",
            "--quiz-rate-window",
            "3600",
        ]);
        assert_eq!(args.port, 3000);
        assert_eq!(args.quiz_rule(), RateLimitRule::per_hour(3));
    }
}
