//! Star Strike headless runner
//!
//! `star-strike [seed] [seconds] [--quality low|medium|high]` plays an
//! autopilot session at 60 Hz and prints the final HUD as JSON. Useful for
//! soak testing and for checking that a seed replays identically.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;
    use star_strike::QualityPreset;

    #[derive(Parser, Debug)]
    #[command(name = "star-strike")]
    #[command(about = "Run a headless autopilot session and print the final HUD")]
    pub struct Cli {
        /// RNG seed (defaults to the current time)
        pub seed: Option<u64>,
        /// Simulated seconds to play
        #[arg(default_value_t = 120.0)]
        pub seconds: f32,
        /// Override the quality preset from the settings file
        #[arg(long)]
        pub quality: Option<QualityPreset>,
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let cli = Cli::try_parse_from(["star-strike"]).unwrap();
            assert_eq!(cli.seed, None);
            assert_eq!(cli.seconds, 120.0);
            assert_eq!(cli.quality, None);
        }

        #[test]
        fn test_positional_and_quality() {
            let cli =
                Cli::try_parse_from(["star-strike", "42", "30", "--quality", "HIGH"]).unwrap();
            assert_eq!(cli.seed, Some(42));
            assert_eq!(cli.seconds, 30.0);
            assert_eq!(cli.quality, Some(QualityPreset::High));
        }

        #[test]
        fn test_rejects_bad_values() {
            assert!(Cli::try_parse_from(["star-strike", "not-a-seed"]).is_err());
            assert!(Cli::try_parse_from(["star-strike", "1", "2", "--quality", "ultra"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use star_strike::autopilot::autopilot_input;
    use star_strike::persistence::FileStore;
    use star_strike::sim::HudView;
    use star_strike::{Session, Settings};

    const SETTINGS_FILE: &str = "star_strike_settings.json";
    const FRAME: f32 = 1.0 / 60.0;

    env_logger::init();
    let cli = cli::Cli::parse();

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    let seconds = if cli.seconds.is_finite() {
        cli.seconds.max(0.0)
    } else {
        0.0
    };

    let mut settings = Settings::load_from(Path::new(SETTINGS_FILE));
    if let Some(quality) = cli.quality {
        settings.quality = quality;
    }
    let store = FileStore::new(&settings.highscore_file);
    log::info!(
        "Star Strike (native) starting: seed {seed}, {seconds}s, quality {}",
        settings.quality.as_str()
    );

    let mut session = Session::new(settings, store, seed);
    let frames = (seconds / FRAME).round() as u64;
    for _ in 0..frames {
        let input = autopilot_input(session.state());
        session.frame(FRAME, &input);
    }

    let hud = HudView::from_state(session.state());
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to encode HUD: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front-end drives `Session` directly; nothing to do here
}
