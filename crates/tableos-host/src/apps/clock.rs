//! Built-in clock application (`builtin.clock:ClockApp`).
//!
//! Displays the current UTC time through the log on start.  The time
//! format is configurable through `init_kwargs`:
//!
//! ```json
//! { "init_kwargs": { "format": "12h" } }
//! ```
//!
//! Accepted formats are `"24h"` (default) and `"12h"`; anything else is a
//! construction error so the bad manifest is caught at launch, not at
//! render time.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use tableos_core::{AppDescriptor, Application};

use crate::application::loader::ComponentLoader;

/// Wall-clock rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockFormat {
    TwentyFourHour,
    TwelveHour,
}

impl ClockFormat {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "24h" => Ok(Self::TwentyFourHour),
            "12h" => Ok(Self::TwelveHour),
            other => Err(format!(
                "unsupported clock format {other:?} (expected \"24h\" or \"12h\")"
            )),
        }
    }
}

/// Simple clock app exposing the current UTC time.
pub struct ClockApp {
    descriptor: AppDescriptor,
    format: ClockFormat,
}

impl ClockApp {
    pub fn format(&self) -> ClockFormat {
        self.format
    }

    /// Current UTC time rendered in the configured format.
    pub fn current_time(&self) -> String {
        let epoch_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        render_time(epoch_secs, self.format)
    }
}

impl Application for ClockApp {
    fn descriptor(&self) -> &AppDescriptor {
        &self.descriptor
    }

    fn start(&mut self) -> Result<(), String> {
        info!("clock started, current time {}", self.current_time());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), String> {
        info!("clock stopped");
        Ok(())
    }
}

/// Renders seconds-since-epoch as a wall-clock time of day (UTC).
fn render_time(epoch_secs: u64, format: ClockFormat) -> String {
    let secs_of_day = epoch_secs % 86_400;
    let hours = secs_of_day / 3_600;
    let minutes = (secs_of_day % 3_600) / 60;
    let seconds = secs_of_day % 60;

    match format {
        ClockFormat::TwentyFourHour => format!("{hours:02}:{minutes:02}:{seconds:02}"),
        ClockFormat::TwelveHour => {
            let meridiem = if hours < 12 { "AM" } else { "PM" };
            let display_hours = match hours % 12 {
                0 => 12,
                h => h,
            };
            format!("{display_hours}:{minutes:02}:{seconds:02} {meridiem}")
        }
    }
}

/// Registers the clock against the factory table.
pub fn register(loader: &mut ComponentLoader) {
    loader.register(
        "builtin.clock",
        "ClockApp",
        Box::new(|descriptor, args| {
            let format = match args.get("format") {
                Some(value) => {
                    let value = value
                        .as_str()
                        .ok_or_else(|| "init_kwargs 'format' must be a string".to_string())?;
                    ClockFormat::parse(value)?
                }
                None => ClockFormat::TwentyFourHour,
            };
            Ok(Box::new(ClockApp {
                descriptor: descriptor.clone(),
                format,
            }) as Box<dyn Application>)
        }),
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tableos_core::manifest::resolve;

    fn clock_loader() -> ComponentLoader {
        let mut loader = ComponentLoader::new();
        register(&mut loader);
        loader
    }

    #[test]
    fn test_clock_defaults_to_24h_format() {
        // Arrange
        let loader = clock_loader();
        let descriptor = resolve(&json!({
            "name": "Clock",
            "entry_point": "builtin.clock:ClockApp"
        }))
        .unwrap();

        // Act
        let app = loader.instantiate(&descriptor).expect("constructs");

        // Assert – start succeeds and the descriptor round-trips
        assert_eq!(app.descriptor().name, "Clock");
    }

    #[test]
    fn test_clock_accepts_12h_format_via_init_kwargs() {
        // Arrange
        let loader = clock_loader();
        let descriptor = resolve(&json!({
            "name": "Clock",
            "entry_point": "builtin.clock:ClockApp",
            "init_kwargs": { "format": "12h" }
        }))
        .unwrap();

        // Act
        let mut app = loader.instantiate(&descriptor).expect("constructs");

        // Assert
        assert!(app.start().is_ok());
        assert!(app.stop().is_ok());
    }

    #[test]
    fn test_clock_rejects_unknown_format() {
        // Arrange
        let loader = clock_loader();
        let descriptor = resolve(&json!({
            "name": "Clock",
            "entry_point": "builtin.clock:ClockApp",
            "init_kwargs": { "format": "sundial" }
        }))
        .unwrap();

        // Act
        let result = loader.instantiate(&descriptor);

        // Assert
        assert!(result.is_err());
    }

    // ── render_time ───────────────────────────────────────────────────────────

    #[test]
    fn test_render_time_24h() {
        // 13:05:09 UTC
        let epoch = 13 * 3600 + 5 * 60 + 9;
        assert_eq!(render_time(epoch, ClockFormat::TwentyFourHour), "13:05:09");
    }

    #[test]
    fn test_render_time_12h_afternoon() {
        let epoch = 13 * 3600 + 5 * 60 + 9;
        assert_eq!(render_time(epoch, ClockFormat::TwelveHour), "1:05:09 PM");
    }

    #[test]
    fn test_render_time_12h_midnight_and_noon() {
        assert_eq!(render_time(0, ClockFormat::TwelveHour), "12:00:00 AM");
        assert_eq!(
            render_time(12 * 3600, ClockFormat::TwelveHour),
            "12:00:00 PM"
        );
    }
}
