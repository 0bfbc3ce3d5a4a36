//! Core data models for the application
//!
//! This module contains the data structures passed between the directive
//! parser, the rule and group generators and the exporter, separated from the
//! logic that operates on them.

pub mod proxy_group_config;
pub mod ruleset;

pub use proxy_group_config::{ProxyGroupConfig, ProxyGroupConfigs, ProxyGroupType};
pub use ruleset::{RuleGroups, RulesetConfig, RulesetPayload};
