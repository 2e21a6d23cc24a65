use std::fs;
use std::path::Path;

use anyhow::Context;
use partida_journal::JournalConfig;

/// Reporting configuration from a TOML file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<JournalConfig> {
    let Some(path) = path else {
        return Ok(JournalConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn parse_config(text: &str) -> anyhow::Result<JournalConfig> {
    Ok(toml::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use partida_journal::{BalanceConvention, CircuitPolicy, OpeningBalance};

    use super::*;

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(load_config(None).unwrap(), JournalConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let config = parse_config(
            r#"
            balance_convention = "nature_aware"
            circuit_policy = "lenient"
            opening_balance = "carry_forward"
            "#,
        )
        .unwrap();
        assert_eq!(config.balance_convention, BalanceConvention::NatureAware);
        assert_eq!(config.circuit_policy, CircuitPolicy::Lenient);
        assert_eq!(config.opening_balance, OpeningBalance::CarryForward);
    }

    #[test]
    fn unknown_value_is_an_error() {
        assert!(parse_config(r#"circuit_policy = "sometimes""#).is_err());
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partida.toml");
        fs::write(&path, "opening_balance = \"carry_forward\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.opening_balance, OpeningBalance::CarryForward);
    }
}
