// Which containers get reported, and under which of their names.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use uuid::Uuid;

/// Match policy as written in config / `MATCH_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum MatchType {
    #[default]
    All,
    NoAgent,
    Uuid,
}

impl FromStr for MatchType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(MatchType::All),
            "NO_CADVISOR" => Ok(MatchType::NoAgent),
            "UUID" => Ok(MatchType::Uuid),
            other => anyhow::bail!(
                "unknown match type {:?} (expected ALL, NO_CADVISOR or UUID)",
                other
            ),
        }
    }
}

impl TryFrom<String> for MatchType {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchType::All => "ALL",
            MatchType::NoAgent => "NO_CADVISOR",
            MatchType::Uuid => "UUID",
        })
    }
}

/// Container selection policy. Built once from config and passed to the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerSelector {
    /// Every container, the monitoring agent's own included.
    MatchAll,
    /// Every container except the one whose names include `agent`.
    MatchAllExceptAgent { agent: String },
    /// Containers with a name that parses as a UUID; the agent is always excluded.
    MatchByIdentifierFormat { agent: String },
}

impl ContainerSelector {
    pub fn new(match_type: MatchType, agent: impl Into<String>) -> Self {
        match match_type {
            MatchType::All => ContainerSelector::MatchAll,
            MatchType::NoAgent => ContainerSelector::MatchAllExceptAgent {
                agent: agent.into(),
            },
            MatchType::Uuid => ContainerSelector::MatchByIdentifierFormat {
                agent: agent.into(),
            },
        }
    }

    /// First of `names` that satisfies the policy, or `None` to skip the container.
    pub fn select(&self, names: &[String]) -> Option<String> {
        match self {
            ContainerSelector::MatchAll => names.first().cloned(),
            ContainerSelector::MatchAllExceptAgent { agent } => {
                if is_agent(names, agent) {
                    return None;
                }
                names.first().cloned()
            }
            ContainerSelector::MatchByIdentifierFormat { agent } => {
                if is_agent(names, agent) {
                    return None;
                }
                names.iter().find(|n| Uuid::parse_str(n).is_ok()).cloned()
            }
        }
    }
}

fn is_agent(names: &[String], agent: &str) -> bool {
    names.iter().any(|n| n == agent)
}

#[cfg(test)]
mod tests {
    use super::*;

    const V1: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn match_all_takes_first_name_including_agent() {
        let s = ContainerSelector::new(MatchType::All, "cadvisor");
        assert_eq!(s.select(&names(&["web", "abc"])), Some("web".into()));
        assert_eq!(s.select(&names(&["cadvisor"])), Some("cadvisor".into()));
        assert_eq!(s.select(&[]), None);
    }

    #[test]
    fn except_agent_skips_agent_by_any_alias() {
        let s = ContainerSelector::new(MatchType::NoAgent, "cadvisor");
        assert_eq!(s.select(&names(&["abc123", "cadvisor"])), None);
        assert_eq!(s.select(&names(&["web"])), Some("web".into()));
    }

    #[test]
    fn identifier_format_accepts_uuid_names_only() {
        let s = ContainerSelector::new(MatchType::Uuid, "cadvisor");
        assert_eq!(s.select(&names(&["web", V1])), Some(V1.into()));
        assert_eq!(s.select(&names(&["not-a-uuid"])), None);
        assert_eq!(s.select(&names(&[V1, "cadvisor"])), None);
        assert_eq!(s.select(&names(&["cadvisor"])), None);
    }

    #[test]
    fn match_type_parses_env_values() {
        assert_eq!("ALL".parse::<MatchType>().unwrap(), MatchType::All);
        assert_eq!("no_cadvisor".parse::<MatchType>().unwrap(), MatchType::NoAgent);
        assert_eq!(" UUID ".parse::<MatchType>().unwrap(), MatchType::Uuid);
        assert!("SOMETHING".parse::<MatchType>().is_err());
    }
}
