use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where to read the event from. Stdin when unset.
    pub event_file: Option<PathBuf>,
    /// Print the canonical JSON of the parsed event.
    pub echo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let event_file = lookup("SES_EVENT_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let echo = lookup("SES_EVENT_ECHO")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self { event_file, echo }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            config(&[]),
            Config {
                event_file: None,
                echo: false
            }
        );
    }

    #[test]
    fn test_reads_file_and_echo() {
        let cfg = config(&[("SES_EVENT_FILE", "/tmp/event.json"), ("SES_EVENT_ECHO", "TRUE")]);
        assert_eq!(cfg.event_file, Some(PathBuf::from("/tmp/event.json")));
        assert!(cfg.echo);
    }

    #[test]
    fn test_blank_file_means_stdin() {
        let cfg = config(&[("SES_EVENT_FILE", "  "), ("SES_EVENT_ECHO", "0")]);
        assert_eq!(cfg.event_file, None);
        assert!(!cfg.echo);
    }
}
