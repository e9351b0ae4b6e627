use crate::config::RuntimeConfig;
use crate::lexical::Dialect;
use crate::syntax::ParseMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How far a compilation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Token trace only
    Lex,
    /// Grammar check against the static keyword table
    Parse,
    /// Grammar plus scoped declaration checks
    Check,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Check => "check",
        }
    }

    /// Parser mode for the parser stages
    pub fn parse_mode(&self) -> Option<ParseMode> {
        match self {
            Stage::Lex => None,
            Stage::Parse => Some(ParseMode::Syntax),
            Stage::Check => Some(ParseMode::Semantic),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lex" | "lexer" => Ok(Stage::Lex),
            "parse" | "syntax" => Ok(Stage::Parse),
            "check" | "semantic" => Ok(Stage::Check),
            other => Err(format!(
                "unknown stage '{}' (expected 'lex', 'parse' or 'check')",
                other
            )),
        }
    }
}

/// Settings for one compilation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub dialect: Dialect,
    pub stage: Stage,
    pub emit_json: bool,
    /// Attach scanner metrics to a lex-stage result
    pub collect_metrics: bool,
}

impl CompileOptions {
    pub fn new(dialect: Dialect, stage: Stage) -> Self {
        Self {
            dialect,
            stage,
            emit_json: false,
            collect_metrics: false,
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            dialect: config.compiler.dialect,
            stage: config.compiler.stage,
            emit_json: config.compiler.emit_json,
            collect_metrics: config.lexical.collect_metrics,
        }
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::new(Dialect::Xpp, Stage::Check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parsing() {
        assert_eq!("lex".parse::<Stage>(), Ok(Stage::Lex));
        assert_eq!("PARSE".parse::<Stage>(), Ok(Stage::Parse));
        assert_eq!("semantic".parse::<Stage>(), Ok(Stage::Check));
        assert!("compile".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_parse_modes() {
        assert_eq!(Stage::Lex.parse_mode(), None);
        assert_eq!(Stage::Parse.parse_mode(), Some(ParseMode::Syntax));
        assert_eq!(Stage::Check.parse_mode(), Some(ParseMode::Semantic));
    }

    #[test]
    fn test_options_from_config() {
        let config = RuntimeConfig::from_toml_str(
            "[compiler]\ndialect = \"minic\"\nstage = \"lex\"\n\n[lexical]\ncollect_metrics = true\n",
        )
        .unwrap();

        let options = CompileOptions::from_config(&config);
        assert_eq!(options.dialect, Dialect::MiniC);
        assert_eq!(options.stage, Stage::Lex);
        assert!(options.collect_metrics);
    }
}
